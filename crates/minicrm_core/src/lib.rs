//! Core domain logic for MiniCRM.
//! This crate is the single source of truth for contact and template rules.

pub mod db;
pub mod form;
pub mod logging;
pub mod mail;
pub mod model;
pub mod repo;
pub mod service;

pub use form::contact_form::{ContactForm, DateVisibility, SelectionChange};
pub use form::table::{render_text_table, ContactRow, CONTACT_COLUMNS};
pub use form::template_form::TemplateForm;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mail::{
    compose_for_contact, to_mailto_url, MailClient, MailDraft, MailError, MailHandoff,
    SystemMailClient,
};
pub use model::contact::{Contact, ContactDraft, ContactId, ContactStatus, ContactValidationError};
pub use model::template::{Template, TemplateDraft, TemplateId, TemplateValidationError};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::template_repo::{SqliteTemplateRepository, TemplateRepository};
pub use repo::{RepoError, RepoResult};
pub use service::contact_service::ContactService;
pub use service::template_service::{TemplateService, TemplateServiceError};
pub use service::SaveOutcome;

/// Minimal health-check API for front-end wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
