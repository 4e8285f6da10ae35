//! Email template model and placeholder rendering.
//!
//! # Invariants
//! - Template names are non-empty after trimming and unique in storage.
//! - `{{name}}` is the only placeholder; a missing contact name renders as
//!   an empty string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row id assigned by SQLite.
pub type TemplateId = i64;

static NAME_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*name\s*\}\}").expect("valid placeholder regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValidationError {
    MissingName,
}

impl Display for TemplateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "please provide a template name"),
        }
    }
}

impl Error for TemplateValidationError {}

/// Writable fields of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    pub subject: String,
    pub body: String,
}

impl TemplateDraft {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        if self.name.trim().is_empty() {
            return Err(TemplateValidationError::MissingName);
        }
        Ok(())
    }
}

/// Persisted template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub subject: String,
    pub body: String,
}

impl Template {
    /// Renders `(subject, body)` for one recipient name.
    pub fn render(&self, contact_name: &str) -> (String, String) {
        (
            fill_name_placeholder(&self.subject, contact_name),
            fill_name_placeholder(&self.body, contact_name),
        )
    }

    pub fn to_draft(&self) -> TemplateDraft {
        TemplateDraft::new(self.name.clone(), self.subject.clone(), self.body.clone())
    }
}

/// Replaces every `{{name}}` occurrence in `text` with `contact_name`.
pub fn fill_name_placeholder(text: &str, contact_name: &str) -> String {
    NAME_PLACEHOLDER_RE
        .replace_all(text, regex::NoExpand(contact_name))
        .into_owned()
}
