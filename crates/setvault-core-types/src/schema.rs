//! Canonical schema constants for structured logging and events
//!
//! Event names are emitted by the logging macros; field keys are the ones
//! the test capture layer reads back.

// Fields every boundary event carries
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Aggregate identifiers
pub const FIELD_SET_NAME: &str = "set_name";
pub const FIELD_NEW_SET_ID: &str = "new_set_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_fields_are_distinct() {
        assert_ne!(FIELD_ERR_KIND, FIELD_ERR_CODE);
    }
}
