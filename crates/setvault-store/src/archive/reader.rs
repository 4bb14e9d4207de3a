//! Snapshot reader
//!
//! The set artifact is required. A missing child artifact reads as an empty
//! collection. Any artifact that is present but malformed fails the whole
//! read.

#![allow(clippy::result_large_err)]

use crate::errors::{artifact_missing, decode_error, io_error, Result};
use serde::de::DeserializeOwned;
use setvault_core::artifact::Artifact;
use setvault_core::{SetAggregate, SetRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Decode the snapshot for `name` held in `dir`
///
/// ## Errors
///
/// - `ExErrorKind::NotFound`: `<name>_set.json` is absent
/// - `ExErrorKind::Io`: an artifact exists but could not be read
/// - `ExErrorKind::Serialization`: an artifact could not be decoded
pub fn read_snapshot(dir: &Path, name: &str) -> Result<SetAggregate> {
    let set_path = dir.join(Artifact::Set.file_name(name));
    let set: SetRecord = match read_artifact(dir, name, Artifact::Set)? {
        Some(set) => set,
        None => return Err(artifact_missing(&set_path)),
    };

    let connections = read_rows(dir, name, Artifact::Connections)?;
    let patcher_instances = read_rows(dir, name, Artifact::PatcherInstances)?;
    let presets = read_rows(dir, name, Artifact::Presets)?;

    Ok(SetAggregate {
        set,
        connections,
        patcher_instances,
        presets,
    })
}

/// Read a child collection; absent file or JSON `null` is empty
fn read_rows<T: DeserializeOwned>(dir: &Path, name: &str, artifact: Artifact) -> Result<Vec<T>> {
    match read_artifact::<Option<Vec<T>>>(dir, name, artifact)? {
        Some(rows) => Ok(rows.unwrap_or_default()),
        None => {
            tracing::warn!(
                artifact = artifact.stem(),
                dir = %dir.display(),
                "Artifact missing, treating as empty"
            );
            Ok(Vec::new())
        }
    }
}

/// `Ok(None)` when the artifact file does not exist
fn read_artifact<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
    artifact: Artifact,
) -> Result<Option<T>> {
    let path = dir.join(artifact.file_name(name));
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error("read_artifact", &path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| decode_error(artifact, &path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use setvault_core::ExErrorKind;
    use tempfile::TempDir;

    const SET_JSON: &str = r#"{"Id":3,"Name":"Live-1","Filename":"live-1.json","Runner_rnbo_version":"1.3.3","Created_at":"2024-06-15 11:58:02","Meta":""}"#;

    #[test]
    fn test_only_set_artifact_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Live-1_set.json"), SET_JSON).unwrap();

        let agg = read_snapshot(dir.path(), "Live-1").unwrap();

        assert_eq!(agg.set.id, 3);
        assert_eq!(agg.child_counts(), (0, 0, 0));
    }

    #[test]
    fn test_null_collection_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Live-1_set.json"), SET_JSON).unwrap();
        fs::write(dir.path().join("Live-1_connections.json"), "null").unwrap();

        let agg = read_snapshot(dir.path(), "Live-1").unwrap();

        assert!(agg.connections.is_empty());
    }

    #[test]
    fn test_missing_set_is_not_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Live-1_connections.json"), "[]").unwrap();

        let err = read_snapshot(dir.path(), "Live-1").unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.op(), Some("read_snapshot"));
    }

    #[test]
    fn test_malformed_child_fails_whole_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Live-1_set.json"), SET_JSON).unwrap();
        fs::write(dir.path().join("Live-1_presets.json"), "[{\"Id\":").unwrap();

        let err = read_snapshot(dir.path(), "Live-1").unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert!(err.message().contains("presets"));
    }

    #[test]
    fn test_other_set_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Live-1_set.json"), SET_JSON).unwrap();
        fs::write(dir.path().join("Other_connections.json"), "not json").unwrap();

        assert!(read_snapshot(dir.path(), "Live-1").is_ok());
    }
}
