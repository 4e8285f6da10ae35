//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Turn form-level intents (save, delete, pick a template) into
//!   repository calls.
//! - Keep front-ends (CLI, FFI) free of storage details.

pub mod contact_service;
pub mod template_service;

/// Result of a save that either inserted or updated a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(i64),
    Updated(i64),
}

impl SaveOutcome {
    pub fn id(self) -> i64 {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }

    pub fn is_created(self) -> bool {
        matches!(self, Self::Created(_))
    }
}
