//! Runner version from the host package inventory
//!
//! Reads the dpkg status database directly and reports the installed version
//! of the runner package.

use setvault_core::errors::{ExError, ExErrorKind};
use setvault_engine::version::VersionSource;
use std::fs;
use std::path::PathBuf;

/// Package that ships the runner
pub const RUNNER_PACKAGE: &str = "rnbooscquery";

/// Default dpkg status database
pub const DPKG_STATUS_PATH: &str = "/var/lib/dpkg/status";

#[derive(Debug, Clone)]
pub struct DpkgInventory {
    status_path: PathBuf,
    package: String,
}

impl DpkgInventory {
    pub fn new(status_path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            status_path: status_path.into(),
            package: package.into(),
        }
    }
}

impl VersionSource for DpkgInventory {
    fn describe(&self) -> &str {
        &self.package
    }

    fn resolve(&self) -> Result<Option<String>, ExError> {
        let status = fs::read_to_string(&self.status_path).map_err(|e| {
            ExError::new(ExErrorKind::ExternalService)
                .with_op("query_package_inventory")
                .with_entity_id(self.status_path.display().to_string())
                .with_message(format!(
                    "Could not read package inventory ({}), pass --rnbo-version",
                    e
                ))
        })?;
        Ok(installed_version(&status, &self.package))
    }
}

/// Version of `package` if the status database lists it as installed
fn installed_version(status: &str, package: &str) -> Option<String> {
    status.split("\n\n").find_map(|stanza| {
        let mut name = None;
        let mut version = None;
        let mut installed = true;
        for line in stanza.lines() {
            // Continuation lines belong to multi-line fields
            if line.starts_with([' ', '\t']) {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key {
                "Package" => name = Some(value),
                "Version" => version = Some(value),
                "Status" => installed = value.ends_with(" installed"),
                _ => {}
            }
        }
        match (name, version) {
            (Some(n), Some(v)) if n == package && installed => Some(v.to_string()),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use setvault_engine::version::resolve_version;

    const STATUS: &str = "\
Package: libc6
Status: install ok installed
Version: 2.36-9
Description: GNU C Library
 multi-line description: with a colon

Package: rnbooscquery
Status: install ok installed
Architecture: armhf
Version: 1.3.3

Package: rnbooscquery-old
Status: deinstall ok config-files
Version: 1.0.0
";

    #[test]
    fn test_finds_installed_runner() {
        assert_eq!(
            installed_version(STATUS, RUNNER_PACKAGE),
            Some("1.3.3".to_string())
        );
    }

    #[test]
    fn test_ignores_removed_and_absent_packages() {
        assert_eq!(installed_version(STATUS, "rnbooscquery-old"), None);
        assert_eq!(installed_version(STATUS, "nope"), None);
    }

    #[test]
    fn test_unreadable_inventory_is_external_service_error() {
        let inventory = DpkgInventory::new("/nonexistent/dpkg/status", RUNNER_PACKAGE);
        let err = resolve_version(&inventory).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
    }

    #[test]
    fn test_missing_package_is_invalid_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("status");
        fs::write(&path, "Package: libc6\nStatus: install ok installed\nVersion: 2.36\n").unwrap();

        let err = resolve_version(&DpkgInventory::new(&path, RUNNER_PACKAGE)).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.entity_id(), Some(RUNNER_PACKAGE));
    }
}
