// Test suite for the export and import pipelines
// Covers the happy path, dry-run, name resolution and error propagation

use rusqlite::Connection;
use setvault_core::ExErrorKind;
use setvault_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use setvault_engine::commands::export::{export_set, ExportConfig};
use setvault_engine::commands::import::{import_set, ImportConfig};
use setvault_engine::version::ExplicitVersion;
use setvault_store::archive::SnapshotOrdering;
use setvault_store::repo::{ChildTable, SetRepo};
use std::fs;
use tempfile::TempDir;

fn setup_runner_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    setvault_store::migrations::apply_migrations(&mut conn).unwrap();
    setvault_store::db::configure(&conn).unwrap();

    // Live-1 at 1.3.3 with 2 connections, 1 patcher instance, 1 preset
    conn.execute_batch(
        r#"
        INSERT INTO sets (id, name, filename, runner_rnbo_version, created_at, meta)
        VALUES (4, 'Live-1', 'live-1.json', '1.3.3', '2024-06-15 11:58:02', '{"bpm":120}'),
               (9, 'Live-1', 'live-1.json', '1.2.0', '2023-01-01 00:00:00', '');

        INSERT INTO sets_patcher_instances (patcher_id, set_id, set_instance_index, config)
        VALUES (31, 4, 0, '{"x":1}');

        INSERT INTO sets_connections (set_id, source_name, source_instance_index, source_port_name,
                                      sink_name, sink_instance_index, sink_port_name)
        VALUES (4, 'osc', 0, 'out1', 'system', 0, 'in1'),
               (4, 'osc', 0, 'out2', 'system', 0, 'in2');

        INSERT INTO sets_presets (patcher_id, set_id, set_instance_index, name, content, initial,
                                  created_at, updated_at)
        VALUES (31, 4, 0, 'init', '{"f":440}', 1, '2024-06-10 09:00:00', '2024-06-10 09:00:00');
        "#,
    )
    .unwrap();
    conn
}

fn version() -> ExplicitVersion {
    ExplicitVersion("1.3.3".to_string())
}

fn export_config(base: &TempDir) -> ExportConfig {
    ExportConfig {
        base_dir: base.path().to_path_buf(),
        set_name: "Live-1".to_string(),
    }
}

fn import_config(base: &TempDir) -> ImportConfig {
    ImportConfig {
        base_dir: base.path().to_path_buf(),
        set_name: "Live-1".to_string(),
        ..ImportConfig::default()
    }
}

#[test]
fn test_export_writes_snapshot_for_resolved_version() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();

    let report = export_set(&mut conn, &export_config(&base), &version()).unwrap();

    assert_eq!(report.set_id, 4);
    assert_eq!(report.version, "1.3.3");
    assert_eq!(
        (report.connections, report.patcher_instances, report.presets),
        (2, 1, 1)
    );
    assert_eq!(
        report.dir,
        base.path().join("Live-1").join(report.stamp.to_string())
    );
    assert!(report.dir.join("Live-1_set.json").is_file());
}

#[test]
fn test_export_unknown_version_is_not_found() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();

    let err = export_set(
        &mut conn,
        &export_config(&base),
        &ExplicitVersion("9.9.9".to_string()),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(!base.path().join("Live-1").exists(), "nothing written");
}

#[test]
fn test_export_rejects_path_like_names() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    let config = ExportConfig {
        base_dir: base.path().to_path_buf(),
        set_name: "../escape".to_string(),
    };

    let err = export_set(&mut conn, &config, &version()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_import_latest_with_generated_name() {
    // Given: One export of Live-1
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    let exported = export_set(&mut conn, &export_config(&base), &version()).unwrap();

    // When: It is imported with no timestamp and no name
    let outcome = import_set(&mut conn, &import_config(&base)).unwrap();

    // Then: The restored name embeds the source stamp
    let stamp = exported.stamp.to_string();
    assert_eq!(outcome.source_stamp, stamp);
    assert_eq!(outcome.original_set_id, 4);
    let prefix = format!("Live-1_{}_restored_", stamp);
    assert!(outcome.report.new_set_name.starts_with(&prefix));
    assert_eq!(
        outcome.report.new_set_name.len(),
        prefix.len() + "YYYYMMDD-HHMMSS".len()
    );

    // And: The new set owns copies of every child row
    let new_id = outcome.report.new_set_id;
    assert_ne!(new_id, 4);
    assert_eq!(SetRepo::count_children(&conn, ChildTable::Connections, new_id).unwrap(), 2);
    assert_eq!(SetRepo::count_children(&conn, ChildTable::PatcherInstances, new_id).unwrap(), 1);
    assert_eq!(SetRepo::count_children(&conn, ChildTable::Presets, new_id).unwrap(), 1);
    let presets = SetRepo::list_presets(&conn, new_id).unwrap();
    assert_eq!(presets[0].patcher_id, 31);
}

#[test]
fn test_import_explicit_stamp_and_name() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    let exported = export_set(&mut conn, &export_config(&base), &version()).unwrap();

    let config = ImportConfig {
        timestamp: Some(exported.stamp.to_string()),
        new_name: Some("Live-1-rollback".to_string()),
        ordering: SnapshotOrdering::NameTimestamp,
        ..import_config(&base)
    };
    let outcome = import_set(&mut conn, &config).unwrap();

    assert_eq!(outcome.report.new_set_name, "Live-1-rollback");
    let found = SetRepo::find_set(&conn, "Live-1-rollback", "1.3.3").unwrap();
    assert_eq!(found.map(|s| s.id), Some(outcome.report.new_set_id));
}

#[test]
fn test_import_accepts_new_name_with_path_characters() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    export_set(&mut conn, &export_config(&base), &version()).unwrap();

    let config = ImportConfig {
        new_name: Some("Live-1/rollback".to_string()),
        ..import_config(&base)
    };
    let outcome = import_set(&mut conn, &config).unwrap();

    let found = SetRepo::find_set(&conn, "Live-1/rollback", "1.3.3").unwrap();
    assert_eq!(found.map(|s| s.id), Some(outcome.report.new_set_id));
}

#[test]
fn test_import_rejects_original_name_before_any_insert() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    export_set(&mut conn, &export_config(&base), &version()).unwrap();
    let rows_before: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM sets) + (SELECT COUNT(*) FROM sets_presets)",
            [],
            |row| row.get(0),
        )
        .unwrap();

    for name in ["Live-1", ""] {
        let config = ImportConfig {
            new_name: Some(name.to_string()),
            ..import_config(&base)
        };
        let err = import_set(&mut conn, &config).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput, "accepted {:?}", name);
    }

    let rows_after: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM sets) + (SELECT COUNT(*) FROM sets_presets)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows_before, rows_after);
}

#[test]
fn test_import_dry_run_reports_without_writing() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    export_set(&mut conn, &export_config(&base), &version()).unwrap();
    let before: i64 = conn
        .query_row("SELECT COUNT(*) FROM sets", [], |row| row.get(0))
        .unwrap();

    let config = ImportConfig {
        dry_run: true,
        ..import_config(&base)
    };
    let outcome = import_set(&mut conn, &config).unwrap();

    assert!(outcome.report.dry_run);
    assert_eq!(outcome.report.connections, 2);
    let after: i64 = conn
        .query_row("SELECT COUNT(*) FROM sets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_import_missing_snapshot_is_not_found() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();

    let err = import_set(&mut conn, &import_config(&base)).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.message(), "Set and/or timestamp does not exist");
}

#[test]
fn test_import_without_set_artifact_inserts_nothing() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();
    let exported = export_set(&mut conn, &export_config(&base), &version()).unwrap();
    fs::remove_file(exported.dir.join("Live-1_set.json")).unwrap();

    let err = import_set(&mut conn, &import_config(&base)).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM sets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_engine_command_dispatch() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();

    let exported = apply_engine_command(
        EngineCommand::ExportSet {
            config: export_config(&base),
            versions: Box::new(version()),
        },
        &mut conn,
    )
    .unwrap();
    assert!(matches!(exported, EngineCommandResult::Exported(ref r) if r.set_id == 4));

    let imported = apply_engine_command(EngineCommand::ImportSet(import_config(&base)), &mut conn)
        .unwrap();
    match imported {
        EngineCommandResult::Imported(outcome) => assert_ne!(outcome.report.new_set_id, 4),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_engine_export_uses_command_version_source() {
    let mut conn = setup_runner_db();
    let base = TempDir::new().unwrap();

    // The older set shares the name; the command's source picks it
    let exported = apply_engine_command(
        EngineCommand::ExportSet {
            config: export_config(&base),
            versions: Box::new(ExplicitVersion("1.2.0".to_string())),
        },
        &mut conn,
    )
    .unwrap();
    assert!(matches!(exported, EngineCommandResult::Exported(ref r) if r.set_id == 9));

    let err = apply_engine_command(
        EngineCommand::ExportSet {
            config: export_config(&base),
            versions: Box::new(ExplicitVersion(String::new())),
        },
        &mut conn,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}
