//! Outgoing email handoff.
//!
//! # Responsibility
//! - Render a template for one contact into a `MailDraft`.
//! - Hand the draft to the desktop mail client; nothing is sent from here.
//!
//! # Invariants
//! - A draft always has a non-empty recipient.
//! - Handoff tries Apple Mail on macOS, then the `mailto:` URL handler.

use crate::model::contact::Contact;
use crate::model::template::Template;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod apple_mail;
mod client;
mod mailto;

pub use apple_mail::apple_mail_script;
pub use client::{MailClient, MailHandoff, SystemMailClient};
pub use mailto::to_mailto_url;

/// Fully rendered message ready for a mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug)]
pub enum MailError {
    /// The contact has no email address.
    MissingRecipient,
    /// No mail client could be launched.
    Launch(String),
}

impl Display for MailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRecipient => write!(f, "no email for this contact"),
            Self::Launch(details) => write!(f, "could not open email client: {details}"),
        }
    }
}

impl Error for MailError {}

/// Renders `template` for `contact`.
pub fn compose_for_contact(contact: &Contact, template: &Template) -> Result<MailDraft, MailError> {
    let to = contact.email.trim();
    if to.is_empty() {
        return Err(MailError::MissingRecipient);
    }

    let (subject, body) = template.render(contact.name.trim());
    Ok(MailDraft {
        to: to.to_string(),
        subject,
        body,
    })
}
