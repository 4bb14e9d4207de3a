//! Snapshot extraction
//!
//! Loads a set and every child row that references it. All reads happen
//! inside one deferred transaction so the aggregate reflects a single
//! instant of the store.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, set_not_found, Result};
use crate::repo::SetRepo;
use rusqlite::{Connection, TransactionBehavior};
use setvault_core::SetAggregate;

/// Load the aggregate whose natural key is `(name, version)`
///
/// ## Errors
///
/// - `ExErrorKind::NotFound`: no set row has this name and version
/// - `ExErrorKind::Serialization`: a text column holds bytes that are not
///   UTF-8; the error names the column
/// - `ExErrorKind::Persistence`: any query failed (no partial aggregate is returned)
pub fn extract_set(conn: &mut Connection, name: &str, version: &str) -> Result<SetAggregate> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .map_err(from_rusqlite)?;

    let set = SetRepo::find_set(&tx, name, version)?.ok_or_else(|| set_not_found(name, version))?;

    let connections = SetRepo::list_connections(&tx, set.id)?;
    let patcher_instances = SetRepo::list_patcher_instances(&tx, set.id)?;
    let presets = SetRepo::list_presets(&tx, set.id)?;

    // Read-only; nothing to commit
    tx.finish().map_err(from_rusqlite)?;

    tracing::debug!(
        set_id = set.id,
        connections = connections.len(),
        patcher_instances = patcher_instances.len(),
        presets = presets.len(),
        "Extracted set aggregate"
    );

    Ok(SetAggregate {
        set,
        connections,
        patcher_instances,
        presets,
    })
}
