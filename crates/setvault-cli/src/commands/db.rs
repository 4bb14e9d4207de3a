//! Database maintenance commands

use crate::config::GlobalArgs;
use clap::{Args, Subcommand};
use setvault_store::{db, migrations};

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Create the set tables where they are missing
    Init,
}

pub fn execute(args: DbArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        DbCommand::Init => execute_init(global),
    }
}

fn execute_init(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = global.db_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = db::open(&db_path)?;
    migrations::apply_migrations(&mut conn)?;

    println!("Database ready: {}", db_path.display());
    for id in migrations::applied_migrations(&conn)? {
        println!("  {}", id);
    }

    Ok(())
}
