//! setvault CLI
//!
//! Command-line interface for backing up and restoring rnbo runner sets

use clap::{Parser, Subcommand};
use setvault_core::logging_facility;

mod commands;
mod config;
mod inventory;

#[derive(Debug, Parser)]
#[command(name = "setvault", version)]
#[command(about = "setvault - Export and restore rnbo runner sets", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: config::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export a set from the runner database to a timestamped snapshot
    Export(commands::export::ExportArgs),
    /// Import a snapshot into the runner database as a new set
    ///
    /// Back up the runner database before importing.
    Import(commands::import::ImportArgs),
    /// List the snapshots held for a set
    List(commands::list::ListArgs),
    /// Database maintenance
    Db(commands::db::DbArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.global.log_profile());

    let result = match cli.command {
        Commands::Export(args) => commands::export::execute(args, &cli.global),
        Commands::Import(args) => commands::import::execute(args, &cli.global),
        Commands::List(args) => commands::list::execute(args, &cli.global),
        Commands::Db(args) => commands::db::execute(args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
