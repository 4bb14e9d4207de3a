//! SQLite repository implementation
//!
//! Reads set aggregate rows by owning set and appends new rows. Nothing here
//! updates or deletes.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, NonUtf8Column, Result};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row};
use setvault_core::model::{
    Blob, ConnectionRecord, PatcherInstanceRecord, PresetRecord, SetRecord,
};

/// SQLite repository for sets and their child rows
pub struct SetRepo;

impl SetRepo {
    /// Find the set row for a natural key
    pub fn find_set(conn: &Connection, name: &str, version: &str) -> Result<Option<SetRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, name, filename, runner_rnbo_version, created_at, meta
                 FROM sets WHERE name = ?1 AND runner_rnbo_version = ?2
                 ORDER BY id LIMIT 1",
            )
            .map_err(from_rusqlite)?;

        let result = stmt
            .query_row([name, version], |row| {
                Ok(SetRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    filename: row.get(2)?,
                    runner_rnbo_version: row.get(3)?,
                    created_at: text_column(row, 4, "sets.created_at")?,
                    meta: Blob::from(text_column(row, 5, "sets.meta")?),
                })
            })
            .optional()
            .map_err(from_rusqlite)?;

        Ok(result)
    }

    /// Get a set row by identity
    pub fn get_set(conn: &Connection, set_id: i64) -> Result<Option<SetRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, name, filename, runner_rnbo_version, created_at, meta
                 FROM sets WHERE id = ?1",
            )
            .map_err(from_rusqlite)?;

        let result = stmt
            .query_row([set_id], |row| {
                Ok(SetRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    filename: row.get(2)?,
                    runner_rnbo_version: row.get(3)?,
                    created_at: text_column(row, 4, "sets.created_at")?,
                    meta: Blob::from(text_column(row, 5, "sets.meta")?),
                })
            })
            .optional()
            .map_err(from_rusqlite)?;

        Ok(result)
    }

    /// Connections owned by a set, by ascending id
    pub fn list_connections(conn: &Connection, set_id: i64) -> Result<Vec<ConnectionRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, set_id, source_name, source_instance_index, source_port_name,
                        sink_name, sink_instance_index, sink_port_name
                 FROM sets_connections WHERE set_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([set_id], |row| {
                Ok(ConnectionRecord {
                    id: row.get(0)?,
                    set_id: row.get(1)?,
                    source_name: row.get(2)?,
                    source_instance_index: row.get(3)?,
                    source_port_name: row.get(4)?,
                    sink_name: row.get(5)?,
                    sink_instance_index: row.get(6)?,
                    sink_port_name: row.get(7)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows)
    }

    /// Patcher instances owned by a set, by ascending id
    pub fn list_patcher_instances(
        conn: &Connection,
        set_id: i64,
    ) -> Result<Vec<PatcherInstanceRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, patcher_id, set_id, set_instance_index, config
                 FROM sets_patcher_instances WHERE set_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([set_id], |row| {
                Ok(PatcherInstanceRecord {
                    id: row.get(0)?,
                    patcher_id: row.get(1)?,
                    set_id: row.get(2)?,
                    set_instance_index: row.get(3)?,
                    config: Blob::from(text_column(row, 4, "sets_patcher_instances.config")?),
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows)
    }

    /// Presets owned by a set, by ascending id
    pub fn list_presets(conn: &Connection, set_id: i64) -> Result<Vec<PresetRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, patcher_id, set_id, set_instance_index, name, content,
                        initial, created_at, updated_at
                 FROM sets_presets WHERE set_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([set_id], |row| {
                Ok(PresetRecord {
                    id: row.get(0)?,
                    patcher_id: row.get(1)?,
                    set_id: row.get(2)?,
                    set_instance_index: row.get(3)?,
                    name: row.get(4)?,
                    content: Blob::from(text_column(row, 5, "sets_presets.content")?),
                    initial: row.get(6)?,
                    created_at: text_column(row, 7, "sets_presets.created_at")?,
                    updated_at: text_column(row, 8, "sets_presets.updated_at")?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows)
    }

    /// Insert a new set row under `name` and return the generated identity
    ///
    /// `created_at` is left to the store default.
    pub fn insert_set(
        conn: &Connection,
        set: &SetRecord,
        name: &str,
    ) -> std::result::Result<i64, rusqlite::Error> {
        conn.execute(
            "INSERT INTO sets (name, filename, runner_rnbo_version, meta) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![name, set.filename, set.runner_rnbo_version, set.meta.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a patcher instance under `set_id`; the patcher reference is copied as-is
    pub fn insert_patcher_instance(
        conn: &Connection,
        instance: &PatcherInstanceRecord,
        set_id: i64,
    ) -> std::result::Result<i64, rusqlite::Error> {
        conn.execute(
            "INSERT INTO sets_patcher_instances (patcher_id, set_id, set_instance_index, config)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                instance.patcher_id,
                set_id,
                instance.set_instance_index,
                instance.config.as_str(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a connection under `set_id`
    pub fn insert_connection(
        conn: &Connection,
        connection: &ConnectionRecord,
        set_id: i64,
    ) -> std::result::Result<i64, rusqlite::Error> {
        conn.execute(
            "INSERT INTO sets_connections (set_id, source_name, source_instance_index,
                source_port_name, sink_name, sink_instance_index, sink_port_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                set_id,
                connection.source_name,
                connection.source_instance_index,
                connection.source_port_name,
                connection.sink_name,
                connection.sink_instance_index,
                connection.sink_port_name,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a preset under `set_id`; the patcher reference is copied as-is
    pub fn insert_preset(
        conn: &Connection,
        preset: &PresetRecord,
        set_id: i64,
    ) -> std::result::Result<i64, rusqlite::Error> {
        conn.execute(
            "INSERT INTO sets_presets (patcher_id, set_id, set_instance_index, name, content,
                initial, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                preset.patcher_id,
                set_id,
                preset.set_instance_index,
                preset.name,
                preset.content.as_str(),
                preset.initial,
                preset.created_at,
                preset.updated_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Count rows in a child table owned by `set_id`
    pub fn count_children(conn: &Connection, table: ChildTable, set_id: i64) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE set_id = ?1", table.table_name());
        conn.query_row(&sql, [set_id], |row| row.get(0))
            .map_err(from_rusqlite)
    }
}

/// The three tables that hang off `sets`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildTable {
    Connections,
    PatcherInstances,
    Presets,
}

impl ChildTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            ChildTable::Connections => "sets_connections",
            ChildTable::PatcherInstances => "sets_patcher_instances",
            ChildTable::Presets => "sets_presets",
        }
    }
}

/// Read a column the runner treats as text
///
/// NULL stays `None` and numeric storage is rendered as text. Bytes that are
/// not UTF-8 fail with a [`NonUtf8Column`] naming `column`.
fn text_column(
    row: &Row<'_>,
    idx: usize,
    column: &'static str,
) -> rusqlite::Result<Option<String>> {
    let bytes = match row.get_ref(idx)? {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(i) => return Ok(Some(i.to_string())),
        ValueRef::Real(f) => return Ok(Some(f.to_string())),
        ValueRef::Text(t) => t,
        ValueRef::Blob(b) => b,
    };

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Some(text.to_string())),
        Err(source) => Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(NonUtf8Column { column, source }),
        )),
    }
}
