//! Snapshot artifact naming
//!
//! A snapshot directory holds one JSON file per collection:
//! `{set}_set.json`, `{set}_connections.json`, `{set}_patcher_instances.json`
//! and `{set}_presets.json`.

use std::fmt;

/// One of the four files making up a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    Set,
    Connections,
    PatcherInstances,
    Presets,
}

impl Artifact {
    /// Write order; also the order used when listing
    pub const ALL: [Artifact; 4] = [
        Artifact::Set,
        Artifact::Connections,
        Artifact::PatcherInstances,
        Artifact::Presets,
    ];

    pub fn stem(&self) -> &'static str {
        match self {
            Artifact::Set => "set",
            Artifact::Connections => "connections",
            Artifact::PatcherInstances => "patcher_instances",
            Artifact::Presets => "presets",
        }
    }

    /// `{set_name}_{stem}.json`
    pub fn file_name(&self, set_name: &str) -> String {
        format!("{}_{}.json", set_name, self.stem())
    }

    /// Only the root artifact is required for a restore
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Artifact::Set)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let names: Vec<String> = Artifact::ALL.iter().map(|a| a.file_name("Live-1")).collect();
        assert_eq!(
            names,
            vec![
                "Live-1_set.json",
                "Live-1_connections.json",
                "Live-1_patcher_instances.json",
                "Live-1_presets.json",
            ]
        );
    }

    #[test]
    fn test_only_set_is_mandatory() {
        let mandatory: Vec<Artifact> = Artifact::ALL
            .into_iter()
            .filter(Artifact::is_mandatory)
            .collect();
        assert_eq!(mandatory, vec![Artifact::Set]);
    }
}
