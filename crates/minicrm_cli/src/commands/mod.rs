//! Subcommand handlers.
//!
//! Handlers write to an injected sink and ask questions through
//! [`Prompter`], so they run unchanged against a terminal or in tests.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use minicrm_core::{MailClient, SqliteContactRepository, SqliteTemplateRepository};
use minicrm_core::{ContactService, TemplateService};
use rusqlite::Connection;
use std::io::Write;

pub mod contacts;
pub mod email;
pub mod statuses;
pub mod templates;

/// Interactive questions a handler may need answered.
pub trait Prompter {
    fn confirm(&self, message: &str) -> Result<bool>;
    /// Returns `None` when the user cancels.
    fn pick(&self, message: &str, items: &[String]) -> Result<Option<usize>>;
}

/// Terminal prompts.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()?)
    }

    fn pick(&self, message: &str, items: &[String]) -> Result<Option<usize>> {
        Ok(Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()?)
    }
}

/// Everything one command invocation works against.
pub struct Session<'a> {
    pub conn: &'a Connection,
    pub today: NaiveDate,
    pub out: &'a mut dyn Write,
    pub prompter: &'a dyn Prompter,
    pub mail_client: &'a dyn MailClient,
}

impl<'a> Session<'a> {
    pub fn contacts(&self) -> ContactService<SqliteContactRepository<'a>> {
        ContactService::new(SqliteContactRepository::new(self.conn))
    }

    pub fn templates(&self) -> TemplateService<SqliteTemplateRepository<'a>> {
        TemplateService::new(SqliteTemplateRepository::new(self.conn))
    }
}
