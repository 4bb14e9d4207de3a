//! Tool version resolution
//!
//! The runner's version is half of a set's natural key. Where it comes from
//! (a flag, the host package inventory) is the caller's business; the engine
//! only sees a `VersionSource`.

#![allow(clippy::result_large_err)]

use setvault_core::errors::SetVaultError;
use setvault_store::errors::Result;

/// Something that can report the installed runner version
pub trait VersionSource: std::fmt::Debug {
    /// What is being resolved, for error reporting (e.g. a package name)
    fn describe(&self) -> &str;

    /// `Ok(None)` when the source answered but knows no version
    fn resolve(&self) -> Result<Option<String>>;
}

/// A version supplied up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitVersion(pub String);

impl VersionSource for ExplicitVersion {
    fn describe(&self) -> &str {
        "explicit version"
    }

    fn resolve(&self) -> Result<Option<String>> {
        let v = self.0.trim();
        Ok((!v.is_empty()).then(|| v.to_string()))
    }
}

/// Resolve a version or fail with `InvalidInput`
///
/// ## Errors
///
/// - `ExErrorKind::InvalidInput`: the source reported no version
/// - whatever the source itself returns
pub fn resolve_version(source: &dyn VersionSource) -> Result<String> {
    match source.resolve()? {
        Some(version) => Ok(version),
        None => Err(SetVaultError::VersionUnresolved {
            package: source.describe().to_string(),
        }
        .into()),
    }
}
