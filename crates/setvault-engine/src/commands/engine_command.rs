//! Engine-level commands for the two snapshot pipelines.

#![allow(clippy::result_large_err)]

use crate::commands::export::{export_set, ExportConfig, ExportReport};
use crate::commands::import::{import_set, ImportConfig, ImportOutcome};
use crate::version::VersionSource;
use setvault_store::errors::Result;
use rusqlite::Connection;

/// Engine-level commands that touch the store and the archive.
#[derive(Debug)]
pub enum EngineCommand {
    /// Write a snapshot of one set; `versions` supplies the runner version
    /// half of its natural key.
    ExportSet {
        config: ExportConfig,
        versions: Box<dyn VersionSource>,
    },
    /// Restore a snapshot as a new set.
    ImportSet(ImportConfig),
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Exported(ExportReport),
    Imported(ImportOutcome),
}

/// Apply an engine command.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::ExportSet { config, versions } => {
            export_set(conn, &config, versions.as_ref()).map(EngineCommandResult::Exported)
        }
        EngineCommand::ImportSet(config) => {
            import_set(conn, &config).map(EngineCommandResult::Imported)
        }
    }
}
