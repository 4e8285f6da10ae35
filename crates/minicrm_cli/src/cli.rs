//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use minicrm_core::ContactStatus;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minicrm", version, about = "Local contact and outreach tracker")]
pub struct Cli {
    /// SQLite database file (default: <data dir>/minicrm.sqlite3)
    #[arg(long, global = true, env = "MINICRM_DB_PATH", value_name = "PATH")]
    pub db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "MINICRM_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files (default: <data dir>/logs)
    #[arg(long, global = true, env = "MINICRM_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage contacts
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Manage email templates
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Open a templated email to a contact in the mail client
    Email(EmailArgs),
    /// List contact statuses and the follow-up dates each one tracks
    Statuses,
}

#[derive(Subcommand, Debug)]
pub enum ContactsCommand {
    /// Show the contacts table, newest first
    List {
        /// Output JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Show one contact
    Show { id: i64 },
    /// Add a contact
    Add(ContactFields),
    /// Edit a contact; omitted fields keep their stored values
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete a contact
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ContactFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    /// Called | Emailed | "Called and Emailed" | "Not Contacted"
    #[arg(long)]
    pub status: Option<ContactStatus>,
    #[arg(long)]
    pub notes: Option<String>,
    /// YYYY-MM-DD, used when the status includes a call (default: today)
    #[arg(long, value_name = "DATE")]
    pub date_called: Option<NaiveDate>,
    /// YYYY-MM-DD, used when the status includes an email (default: today)
    #[arg(long, value_name = "DATE")]
    pub date_emailed: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List templates by name
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one template
    Show { id: i64 },
    /// Create a template
    Add(TemplateFields),
    /// Edit a template; omitted fields keep their stored values
    Edit {
        id: i64,
        #[command(flatten)]
        fields: TemplateFields,
    },
    /// Delete a template
    Delete {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct TemplateFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Subject line; `{{name}}` is replaced with the contact name
    #[arg(long)]
    pub subject: Option<String>,
    /// Body text; `{{name}}` is replaced with the contact name
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,
    /// Read the body from a file
    #[arg(long, value_name = "PATH")]
    pub body_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EmailArgs {
    pub contact_id: i64,
    /// Template id; prompts for one when omitted and several exist
    #[arg(long)]
    pub template: Option<i64>,
    /// Print the rendered email and mailto URL instead of opening a client
    #[arg(long)]
    pub print: bool,
}
