//! Import command

use crate::config::{require_db, GlobalArgs};
use clap::{Args, ValueEnum};
use setvault_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use setvault_engine::commands::import::ImportConfig;
use setvault_store::archive::SnapshotOrdering;
use setvault_store::db;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderBy {
    /// Latest directory modification time
    Mtime,
    /// Latest timestamp in the directory name
    Name,
}

impl From<OrderBy> for SnapshotOrdering {
    fn from(o: OrderBy) -> Self {
        match o {
            OrderBy::Mtime => SnapshotOrdering::ModifiedTime,
            OrderBy::Name => SnapshotOrdering::NameTimestamp,
        }
    }
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Name the set was exported under
    pub set: String,

    /// Snapshot to import (YYYYMMDD-HHMMSS); most recent when omitted
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Name for the new set [default: <set>_<timestamp>_restored_<now>]
    #[arg(long)]
    pub name: Option<String>,

    /// How the most recent snapshot is chosen
    #[arg(long, value_enum, default_value_t = OrderBy::Mtime)]
    pub order_by: OrderBy,

    /// Run every insert, then roll back
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: ImportArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = global.db_path()?;
    let base_dir = global.base_dir()?;
    require_db(&db_path)?;

    let mut conn = db::open_existing(&db_path)?;
    db::configure(&conn)?;

    let cmd = EngineCommand::ImportSet(ImportConfig {
        base_dir,
        set_name: args.set,
        timestamp: args.timestamp,
        new_name: args.name,
        ordering: args.order_by.into(),
        dry_run: args.dry_run,
    });

    let outcome = match apply_engine_command(cmd, &mut conn) {
        Ok(EngineCommandResult::Imported(outcome)) => outcome,
        Ok(other) => return Err(format!("Unexpected engine result: {:?}", other).into()),
        Err(e) if e.is_partial_import() => {
            eprintln!("WARNING - INCOMPLETE IMPORT, CONSIDER RESTORING A BACKUP");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let report = &outcome.report;
    if report.dry_run {
        println!("Dry run, nothing imported");
    } else {
        println!("Importing set complete");
    }
    println!("  snapshot:          {}", outcome.snapshot_dir.display());
    println!("  new set name:      {}", report.new_set_name);
    println!("  new set id:        {}", report.new_set_id);
    println!("  connections:       {}", report.connections);
    println!("  patcher instances: {}", report.patcher_instances);
    println!("  presets:           {}", report.presets);
    if !report.dry_run {
        println!("Restart the runner to see the imported set");
    }

    Ok(())
}
