#![allow(clippy::unwrap_used, clippy::expect_used)]

use setvault_core::errors::{ExError, ExErrorKind, SetVaultError};
use setvault_core::logging_facility::test_capture::init_test_capture;
use setvault_core::{log_op_end, log_op_error, log_op_start};
use setvault_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, set_name = "Live-1");

    let start_events = capture.events_for(op_name, EVENT_START);

    assert_eq!(start_events.len(), 1);
    assert_eq!(start_events[0].set_name(), Some("Live-1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].duration_ms(), Some(42));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = SetVaultError::SetNotFound {
        name: "Live-1".to_string(),
        version: "1.3.3".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);

    assert_eq!(error_events.len(), 1);
    let event = &error_events[0];
    assert_eq!(event.level, tracing::Level::ERROR);
    assert_eq!(event.err_code(), Some("ERR_NOT_FOUND"));
    assert_eq!(event.err_kind(), Some("NotFound"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::PartialImport).with_message("rollback failed");
    log_op_error!(op_name, err, duration_ms = 1, set_id = 12);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let event = capture.events_for(op_name, EVENT_END_ERROR).pop().unwrap();
    assert_eq!(event.field("set_id"), Some("12"));
    assert_eq!(event.field("err_message"), Some("rollback failed"));
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let event = capture.events_for(op_name, EVENT_START).pop().unwrap();
    assert_eq!(
        event.component.as_deref(),
        Some("logging_facility_tests")
    );
}
