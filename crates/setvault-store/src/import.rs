//! Aggregate import
//!
//! Appends a copy of a set aggregate under a freshly minted set identity.
//!
//! ## Order
//!
//! 1. Root set row (new name, original filename/version/meta)
//! 2. Patcher instances
//! 3. Connections
//! 4. Presets
//!
//! Every child gets the new set id; every other field, including patcher
//! references, is copied unchanged. The whole import is one transaction:
//! the first failing insert rolls everything back.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, insert_failed, partial_import, Result};
use crate::repo::SetRepo;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use setvault_core::errors::ExError;
use setvault_core::SetAggregate;

/// Options for an import
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// If true, run every insert and then roll back
    pub dry_run: bool,
}

/// Outcome of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Identity of the new set row (the would-be identity in dry-run)
    pub new_set_id: i64,
    pub new_set_name: String,
    pub connections: usize,
    pub patcher_instances: usize,
    pub presets: usize,
    pub dry_run: bool,
}

/// Insert `aggregate` under `new_name` and return what was written
///
/// `new_name` must already be resolved by the caller; the aggregate's own
/// name is never reused.
///
/// ## Errors
///
/// - `ExErrorKind::Persistence`: an insert failed; the transaction was rolled
///   back and the store is unchanged
/// - `ExErrorKind::PartialImport`: an insert failed and the rollback failed
///   as well; the store may hold part of the copy
pub fn import_aggregate(
    conn: &mut Connection,
    aggregate: &SetAggregate,
    new_name: &str,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let report = match insert_all(&tx, aggregate, new_name) {
        Ok(new_set_id) => ImportReport {
            new_set_id,
            new_set_name: new_name.to_string(),
            connections: aggregate.connections.len(),
            patcher_instances: aggregate.patcher_instances.len(),
            presets: aggregate.presets.len(),
            dry_run: options.dry_run,
        },
        Err(cause) => return Err(abort(tx, cause)),
    };

    if options.dry_run {
        tx.rollback().map_err(from_rusqlite)?;
        tracing::debug!(new_set_id = report.new_set_id, "Dry-run import rolled back");
    } else {
        tx.commit().map_err(from_rusqlite)?;
    }

    Ok(report)
}

fn insert_all(tx: &Transaction<'_>, aggregate: &SetAggregate, new_name: &str) -> Result<i64> {
    let new_set_id =
        SetRepo::insert_set(tx, &aggregate.set, new_name).map_err(|e| insert_failed("sets", 0, e))?;

    tracing::debug!(
        original_set_id = aggregate.set.id,
        new_set_id,
        "Inserted root set row"
    );

    for (i, instance) in aggregate.patcher_instances.iter().enumerate() {
        SetRepo::insert_patcher_instance(tx, instance, new_set_id)
            .map_err(|e| insert_failed("patcher_instances", i, e))?;
    }

    for (i, connection) in aggregate.connections.iter().enumerate() {
        SetRepo::insert_connection(tx, connection, new_set_id)
            .map_err(|e| insert_failed("connections", i, e))?;
    }

    for (i, preset) in aggregate.presets.iter().enumerate() {
        SetRepo::insert_preset(tx, preset, new_set_id)
            .map_err(|e| insert_failed("presets", i, e))?;
    }

    Ok(new_set_id)
}

/// Roll back after a failed insert, escalating if the rollback fails
fn abort(tx: Transaction<'_>, cause: ExError) -> ExError {
    match tx.rollback() {
        Ok(()) => cause,
        Err(rollback_err) => partial_import(cause, rollback_err),
    }
}
