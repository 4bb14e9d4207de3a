//! Global flags and path defaults

use clap::{Args, ValueEnum};
use setvault_core::errors::{ExError, ExErrorKind};
use setvault_core::logging_facility::Profile;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Runner database [default: ~/Documents/rnbo/oscqueryrunner.sqlite]
    #[arg(long, global = true, env = "SETVAULT_DB")]
    pub db: Option<PathBuf>,

    /// Snapshot base directory [default: ~/Documents/rnbo-set-manager-data]
    #[arg(long, global = true, env = "SETVAULT_DIR")]
    pub dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn log_profile(&self) -> Profile {
        match (self.log_format, self.verbose) {
            (LogFormat::Json, _) => Profile::Production,
            (LogFormat::Human, true) => Profile::Development,
            (LogFormat::Human, false) => Profile::Operator,
        }
    }

    pub fn db_path(&self) -> Result<PathBuf, ExError> {
        match &self.db {
            Some(path) => Ok(path.clone()),
            None => home_relative(&["Documents", "rnbo", "oscqueryrunner.sqlite"], "--db"),
        }
    }

    pub fn base_dir(&self) -> Result<PathBuf, ExError> {
        match &self.dir {
            Some(path) => Ok(path.clone()),
            None => home_relative(&["Documents", "rnbo-set-manager-data"], "--dir"),
        }
    }
}

fn home_relative(parts: &[&str], flag: &str) -> Result<PathBuf, ExError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("resolve_path")
            .with_message(format!("Could not determine home directory, pass {}", flag))
    })?;
    Ok(parts.iter().fold(home, |acc, p| acc.join(p)))
}

/// The runner database must already exist; it is never created implicitly
pub fn require_db(path: &Path) -> Result<(), ExError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ExError::new(ExErrorKind::NotFound)
            .with_op("open_db")
            .with_entity_id(path.display().to_string())
            .with_message("Runner database does not exist"))
    }
}
