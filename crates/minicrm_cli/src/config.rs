//! Resolved runtime paths and levels.

use crate::cli::Cli;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

const DB_FILE_NAME: &str = "minicrm.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl RuntimeConfig {
    /// Flags and env vars win; otherwise paths live in the platform data dir.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let data_dir = || -> Result<PathBuf> {
            ProjectDirs::from("", "", "minicrm")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| anyhow!("no home directory; pass --db and --log-dir"))
        };

        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => data_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match &cli.log_dir {
            Some(dir) => dir.clone(),
            None => data_dir()?.join(LOG_DIR_NAME),
        };
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            std::env::current_dir()
                .context("resolving relative log directory")?
                .join(log_dir)
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| minicrm_core::default_log_level().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RuntimeConfig;
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn explicit_paths_are_used_verbatim() {
        let cli = Cli::try_parse_from([
            "minicrm",
            "--db",
            "/data/crm.sqlite3",
            "--log-dir",
            "/data/logs",
            "--log-level",
            "warn",
            "statuses",
        ])
        .unwrap();

        let config = RuntimeConfig::resolve(&cli).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/crm.sqlite3"));
        assert_eq!(config.log_dir, PathBuf::from("/data/logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let cli = Cli::try_parse_from([
            "minicrm",
            "--db",
            "crm.sqlite3",
            "--log-dir",
            "logs",
            "statuses",
        ])
        .unwrap();

        let config = RuntimeConfig::resolve(&cli).unwrap();
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("logs"));
    }
}
