//! Export command

use crate::config::{require_db, GlobalArgs};
use crate::inventory::{DpkgInventory, DPKG_STATUS_PATH, RUNNER_PACKAGE};
use clap::Args;
use setvault_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use setvault_engine::commands::export::ExportConfig;
use setvault_engine::version::{ExplicitVersion, VersionSource};
use setvault_store::db;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Name of the set to export
    pub set: String,

    /// Runner version; detected from the package inventory when omitted
    #[arg(long)]
    pub rnbo_version: Option<String>,

    /// dpkg status database used for version detection
    #[arg(long, env = "SETVAULT_DPKG_STATUS", default_value = DPKG_STATUS_PATH, hide = true)]
    pub dpkg_status: PathBuf,
}

pub fn execute(args: ExportArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = global.db_path()?;
    let base_dir = global.base_dir()?;
    require_db(&db_path)?;

    let versions: Box<dyn VersionSource> = match args.rnbo_version {
        Some(v) => Box::new(ExplicitVersion(v)),
        None => Box::new(DpkgInventory::new(args.dpkg_status, RUNNER_PACKAGE)),
    };

    let mut conn = db::open_read_only(&db_path)?;
    db::configure(&conn)?;

    let cmd = EngineCommand::ExportSet {
        config: ExportConfig {
            base_dir,
            set_name: args.set,
        },
        versions,
    };

    match apply_engine_command(cmd, &mut conn)? {
        EngineCommandResult::Exported(report) => {
            println!("Export completed");
            println!("  rnbo version:      {}", report.version);
            println!("  set id:            {}", report.set_id);
            println!("  connections:       {}", report.connections);
            println!("  patcher instances: {}", report.patcher_instances);
            println!("  presets:           {}", report.presets);
            println!("  directory:         {}", report.dir.display());
        }
        other => return Err(format!("Unexpected engine result: {:?}", other).into()),
    }

    Ok(())
}
