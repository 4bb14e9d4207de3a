//! Error handling for setvault-store
//!
//! Wraps setvault-core ExError with store-specific helpers

use setvault_core::artifact::Artifact;
use setvault_core::errors::{ExError, ExErrorKind, SetVaultError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
///
/// Text columns holding bytes that are not UTF-8 surface as a
/// `Serialization` error naming the column.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    if let rusqlite::Error::FromSqlConversionFailure(_, _, inner) = &err {
        if let Some(bad) = inner.downcast_ref::<NonUtf8Column>() {
            return ExError::new(ExErrorKind::Serialization)
                .with_op("read_set")
                .with_entity_id(bad.column)
                .with_message(bad.to_string());
        }
    }

    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// A text column whose stored bytes are not valid UTF-8
#[derive(Debug)]
pub struct NonUtf8Column {
    /// `table.column`
    pub column: &'static str,
    pub source: std::str::Utf8Error,
}

impl std::fmt::Display for NonUtf8Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Column {} holds bytes that are not valid UTF-8: {}",
            self.column, self.source
        )
    }
}

impl std::error::Error for NonUtf8Column {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_entity_id(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an artifact decode error
pub fn decode_error(artifact: Artifact, path: &Path, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("read_snapshot")
        .with_entity_id(path.display().to_string())
        .with_message(format!("Failed to decode {} artifact: {}", artifact, err))
}

/// Create an artifact encode error
pub fn encode_error(artifact: Artifact, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("write_snapshot")
        .with_message(format!("Failed to encode {} artifact: {}", artifact, err))
}

/// No set row matches `(name, version)`
pub fn set_not_found(name: &str, version: &str) -> ExError {
    SetVaultError::SetNotFound {
        name: name.to_string(),
        version: version.to_string(),
    }
    .into()
}

/// No snapshot directory at `path`
pub fn snapshot_not_found(path: &Path) -> ExError {
    SetVaultError::SnapshotNotFound {
        path: path.display().to_string(),
    }
    .into()
}

/// Mandatory artifact absent at `path`
pub fn artifact_missing(path: &Path) -> ExError {
    SetVaultError::ArtifactMissing {
        path: path.display().to_string(),
    }
    .into()
}

/// A row insert failed during import; the transaction was rolled back
pub fn insert_failed(collection: &str, index: usize, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("import_set")
        .with_entity_id(format!("{}[{}]", collection, index))
        .with_message(format!(
            "Insert failed, import rolled back, store unchanged: {}",
            err
        ))
}

/// A row insert failed and the rollback failed too
pub fn partial_import(cause: ExError, rollback_err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::PartialImport)
        .with_op("import_set")
        .with_message(format!(
            "WARNING - INCOMPLETE IMPORT, rollback failed ({}); consider restoring a backup",
            rollback_err
        ))
        .with_source(cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_failed_names_row() {
        let err = insert_failed(
            "presets",
            2,
            rusqlite::Error::InvalidParameterName("x".to_string()),
        );
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.entity_id(), Some("presets[2]"));
        assert!(err.message().contains("rolled back"));
    }

    #[test]
    fn test_non_utf8_column_maps_to_serialization() {
        let source = std::str::from_utf8(&[0xFF, 0x00]).unwrap_err();
        let err = from_rusqlite(rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            Box::new(NonUtf8Column {
                column: "sets_patcher_instances.config",
                source,
            }),
        ));
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.entity_id(), Some("sets_patcher_instances.config"));
        assert!(err.message().contains("not valid UTF-8"));
    }

    #[test]
    fn test_partial_import_keeps_cause() {
        let cause = ExError::new(ExErrorKind::Persistence).with_message("constraint failed");
        let err = partial_import(cause, rusqlite::Error::InvalidQuery);
        assert!(err.is_partial_import());
        assert_eq!(err.source_error().map(|e| e.message()), Some("constraint failed"));
    }
}
