//! Snapshot timestamps and restored-set naming
//!
//! Snapshot directories are named `YYYYMMDD-HHMMSS` in the exporting host's
//! local time. The format is fixed-width so names sort lexically in time
//! order.

use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;

use crate::errors::SetVaultError;

/// chrono format string for snapshot directory names
pub const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const STAMP_LEN: usize = 15;

/// Second-resolution local timestamp used to name a snapshot directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotStamp(NaiveDateTime);

impl SnapshotStamp {
    /// Capture the current local time, truncated to whole seconds
    pub fn now_local() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Wrap an explicit time (sub-second precision is dropped)
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for SnapshotStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

impl FromStr for SnapshotStamp {
    type Err = SetVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SetVaultError::InvalidStamp {
            value: s.to_string(),
        };
        if s.len() != STAMP_LEN || !s.is_ascii() {
            return Err(invalid());
        }
        let dt = NaiveDateTime::parse_from_str(s, STAMP_FORMAT).map_err(|_| invalid())?;
        // chrono accepts unpadded fields; only the canonical rendering is valid
        if dt.format(STAMP_FORMAT).to_string() != s {
            return Err(invalid());
        }
        Ok(Self(dt))
    }
}

/// Name given to an imported set when the operator does not choose one
///
/// `{original}_{source_stamp}_restored_{now}`. `source_stamp` is the snapshot
/// directory name exactly as resolved.
pub fn restored_set_name(original: &str, source_stamp: &str, now: &SnapshotStamp) -> String {
    format!("{}_{}_restored_{}", original, source_stamp, now)
}

/// Reject names that cannot be used as a single path component
pub fn validate_set_name(name: &str) -> Result<(), SetVaultError> {
    let reason = if name.is_empty() {
        Some("set name must not be empty")
    } else if name == "." || name == ".." {
        Some("set name must not be a relative path component")
    } else if name.contains('/') || name.contains('\\') {
        Some("set name must not contain path separators")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(SetVaultError::InvalidSetName {
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Check the name a restored set will be stored under
///
/// The name is only a column value, so path characters are fine; it must be
/// non-empty and must not repeat the snapshot's own set name.
pub fn validate_new_set_name(new_name: &str, original: &str) -> Result<(), SetVaultError> {
    let reason = if new_name.trim().is_empty() {
        Some("new set name must not be empty".to_string())
    } else if new_name == original {
        Some(format!(
            "new set name must differ from the snapshot's set name {:?}",
            original
        ))
    } else {
        None
    };
    match reason {
        Some(reason) => Err(SetVaultError::InvalidSetName { reason }),
        None => Ok(()),
    }
}
