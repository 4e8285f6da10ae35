//! `minicrm` command-line front-end.
//!
//! # Responsibility
//! - Resolve paths, start file logging and open the contact store.
//! - Dispatch one subcommand against `minicrm_core`.

mod cli;
mod commands;
mod config;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Command};
use commands::{Session, TerminalPrompter};
use config::RuntimeConfig;
use log::{error, info};
use minicrm_core::db::open_db;
use minicrm_core::SystemMailClient;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RuntimeConfig::resolve(&cli)?;

    // File logging is best-effort; the command still runs without it.
    if let Err(err) =
        minicrm_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())
    {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("opening database {}", config.db_path.display()))?;

    let command_name = command_name(&cli.command);
    info!("event=cli_command module=cli status=start command={command_name}");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut session = Session {
        conn: &conn,
        today: Local::now().date_naive(),
        out: &mut out,
        prompter: &TerminalPrompter,
        mail_client: &SystemMailClient,
    };

    let result = match cli.command {
        Command::Contacts(command) => commands::contacts::run(&mut session, command),
        Command::Templates(command) => commands::templates::run(&mut session, command),
        Command::Email(args) => commands::email::run(&mut session, args),
        Command::Statuses => commands::statuses::run(&mut session),
    };

    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command={command_name}"),
        Err(_) => error!("event=cli_command module=cli status=error command={command_name}"),
    }
    result
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Contacts(_) => "contacts",
        Command::Templates(_) => "templates",
        Command::Email(_) => "email",
        Command::Statuses => "statuses",
    }
}
