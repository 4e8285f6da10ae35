//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record and its writable draft.
//! - Own the outreach status enumeration and which follow-up dates it tracks.
//!
//! # Invariants
//! - A persisted contact has a non-empty name or a non-empty email.
//! - `date_added` is assigned once, at creation, and never edited.
//! - `date_called` is only meaningful when the status includes a call;
//!   `date_emailed` only when it includes an email.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Row id assigned by SQLite.
pub type ContactId = i64;

/// Storage format for `date_added`.
pub const DATE_ADDED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Storage format for `date_called` / `date_emailed`.
pub const FOLLOW_UP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Outreach state of a contact.
///
/// Order matches the order offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Called,
    Emailed,
    CalledAndEmailed,
    #[default]
    NotContacted,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::Called,
        ContactStatus::Emailed,
        ContactStatus::CalledAndEmailed,
        ContactStatus::NotContacted,
    ];

    /// Human-facing label. Also the persisted value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Called => "Called",
            Self::Emailed => "Emailed",
            Self::CalledAndEmailed => "Called and Emailed",
            Self::NotContacted => "Not Contacted",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Called => "called",
            Self::Emailed => "emailed",
            Self::CalledAndEmailed => "called_and_emailed",
            Self::NotContacted => "not_contacted",
        }
    }

    pub fn shows_date_called(self) -> bool {
        matches!(self, Self::Called | Self::CalledAndEmailed)
    }

    pub fn shows_date_emailed(self) -> bool {
        matches!(self, Self::Emailed | Self::CalledAndEmailed)
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a status string matches no known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl Display for UnknownStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown contact status `{}`; expected one of: Called, Emailed, Called and Emailed, Not Contacted",
            self.0
        )
    }
}

impl Error for UnknownStatus {}

impl FromStr for ContactStatus {
    type Err = UnknownStatus;

    /// Accepts labels case-insensitively and snake_case keys.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| {
                status.label().eq_ignore_ascii_case(trimmed) || status.key() == trimmed
            })
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Validation failures for contact writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    MissingNameAndEmail,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNameAndEmail => write!(f, "provide at least a name or email"),
        }
    }
}

impl Error for ContactValidationError {}

/// Writable fields of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub status: ContactStatus,
    pub notes: String,
    pub date_called: Option<NaiveDate>,
    pub date_emailed: Option<NaiveDate>,
}

impl ContactDraft {
    /// Creates a draft with only a name and email set.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() && self.email.trim().is_empty() {
            return Err(ContactValidationError::MissingNameAndEmail);
        }
        Ok(())
    }

    /// Drops follow-up dates the current status does not track.
    pub fn without_hidden_dates(mut self) -> Self {
        if !self.status.shows_date_called() {
            self.date_called = None;
        }
        if !self.status.shows_date_emailed() {
            self.date_emailed = None;
        }
        self
    }
}

/// Persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub status: ContactStatus,
    pub notes: String,
    /// Local wall-clock time the contact was first saved.
    pub date_added: Option<NaiveDateTime>,
    pub date_called: Option<NaiveDate>,
    pub date_emailed: Option<NaiveDate>,
}

impl Contact {
    /// Returns the writable subset of this contact.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            status: self.status,
            notes: self.notes.clone(),
            date_called: self.date_called,
            date_emailed: self.date_emailed,
        }
    }

    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
