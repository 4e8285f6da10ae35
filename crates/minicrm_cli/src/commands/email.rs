use super::contacts::require_contact;
use super::Session;
use crate::cli::EmailArgs;
use anyhow::Result;
use minicrm_core::{
    compose_for_contact, to_mailto_url, MailError, MailHandoff, Template, TemplateServiceError,
};
use std::io::Write;

pub const PICK_PROMPT: &str = "Select a template";

pub fn run(session: &mut Session<'_>, args: EmailArgs) -> Result<()> {
    let contact = require_contact(session, args.contact_id)?;
    if !contact.has_email() {
        return Err(MailError::MissingRecipient.into());
    }

    let template = match args.template {
        Some(id) => session.templates().resolve_template(Some(id))?,
        None => match pick_template(session)? {
            Some(template) => template,
            None => {
                writeln!(session.out, "Email cancelled.")?;
                return Ok(());
            }
        },
    };

    let draft = compose_for_contact(&contact, &template)?;
    if args.print {
        writeln!(session.out, "To: {}", draft.to)?;
        writeln!(session.out, "Subject: {}", draft.subject)?;
        writeln!(session.out)?;
        writeln!(session.out, "{}", draft.body)?;
        writeln!(session.out)?;
        writeln!(session.out, "{}", to_mailto_url(&draft))?;
        return Ok(());
    }

    let channel = match session.mail_client.compose(&draft)? {
        MailHandoff::AppleMail => "Apple Mail",
        MailHandoff::MailtoUrl => "the default mail client",
    };
    writeln!(session.out, "Opened email to {} in {channel}.", draft.to)?;
    Ok(())
}

/// A single template is used directly; several ask the user.
fn pick_template(session: &Session<'_>) -> Result<Option<Template>> {
    let mut templates = session.templates().list_templates()?;
    match templates.len() {
        0 => Err(TemplateServiceError::NoTemplates.into()),
        1 => Ok(templates.pop()),
        _ => {
            let names: Vec<String> = templates.iter().map(|t| t.name.clone()).collect();
            Ok(session
                .prompter
                .pick(PICK_PROMPT, &names)?
                .map(|index| templates.swap_remove(index)))
        }
    }
}
