//! List command

use crate::config::GlobalArgs;
use clap::Args;
use setvault_store::archive::list_snapshots;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Set name
    pub set: String,
}

pub fn execute(args: ListArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let base_dir = global.base_dir()?;
    let entries = list_snapshots(&base_dir, &args.set)?;

    if entries.is_empty() {
        println!("No snapshots for {}", args.set);
        return Ok(());
    }

    for entry in entries {
        let artifacts: Vec<String> = entry.artifacts.iter().map(|a| a.to_string()).collect();
        let note = match (&entry.stamp, entry.is_restorable()) {
            (_, false) => " (missing set artifact)",
            (None, true) => " (non-standard name)",
            (Some(_), true) => "",
        };
        println!("{}  [{}]{}", entry.name, artifacts.join(", "), note);
    }

    Ok(())
}
