//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for contacts and templates.
//! - Keep SQL details out of service and front-end code.
//!
//! # Invariants
//! - Write paths validate drafts before any SQL mutation.
//! - Update/delete of a missing row is `RepoError::NotFound`, never a silent
//!   no-op.

use crate::db::DbError;
use crate::model::contact::ContactValidationError;
use crate::model::template::TemplateValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_repo;
pub mod template_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by contact and template persistence.
#[derive(Debug)]
pub enum RepoError {
    ContactValidation(ContactValidationError),
    TemplateValidation(TemplateValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    DuplicateTemplateName(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactValidation(err) => write!(f, "{err}"),
            Self::TemplateValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateTemplateName(name) => {
                write!(f, "a template named `{name}` already exists")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ContactValidation(err) => Some(err),
            Self::TemplateValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateTemplateName(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::ContactValidation(value)
    }
}

impl From<TemplateValidationError> for RepoError {
    fn from(value: TemplateValidationError) -> Self {
        Self::TemplateValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
