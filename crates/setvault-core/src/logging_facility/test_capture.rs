//! In-memory capture of boundary events for tests
//!
//! Pipelines log a `start` event and then either `end` or `end_error`. The
//! capture keeps every event so tests can pick out the ones for a given set
//! and check the new set id or error code they carried.

use setvault_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_EVENT, FIELD_NEW_SET_ID, FIELD_OP, FIELD_SET_NAME,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One captured event with its fields rendered as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn set_name(&self) -> Option<&str> {
        self.field(FIELD_SET_NAME)
    }

    pub fn new_set_id(&self) -> Option<i64> {
        self.field(FIELD_NEW_SET_ID).and_then(|v| v.parse().ok())
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.field(FIELD_DURATION_MS).and_then(|v| v.parse().ok())
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    /// Debug rendering of the `ExErrorKind`, e.g. `NotFound`
    pub fn err_kind(&self) -> Option<&str> {
        self.field(FIELD_ERR_KIND)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: visitor.fields.get(FIELD_COMPONENT).cloned(),
            op: visitor.fields.get(FIELD_OP).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            fields: visitor.fields,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Shared handle on the captured events
///
/// The capture is process-global, so tests that run in parallel should
/// filter by set name rather than clear it.
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// All captured events, in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events with the given `op` and `event` name, in emission order
    pub fn events_for(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.is(op, event))
            .collect()
    }

    /// The latest `op`/`event` logged for `set_name`
    pub fn last_for_set(&self, op: &str, event: &str, set_name: &str) -> Option<CapturedEvent> {
        self.events_for(op, event)
            .into_iter()
            .rev()
            .find(|e| e.set_name() == Some(set_name))
    }

    /// Panic unless `op` logged `event` at least once
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Error code of the latest failed `op` for `set_name`
    pub fn error_code(&self, op: &str, set_name: &str) -> Option<String> {
        self.last_for_set(op, EVENT_END_ERROR, set_name)
            .and_then(|e| e.err_code().map(str::to_string))
    }

    /// New set id reported by the latest successful `op` for `set_name`
    pub fn new_set_id(&self, op: &str, set_name: &str) -> Option<i64> {
        self.last_for_set(op, EVENT_END, set_name)
            .and_then(|e| e.new_set_id())
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber on first use
///
/// Later calls return the same handle.
///
/// # Example
///
/// ```
/// use setvault_core::logging_facility::test_capture::init_test_capture;
/// use setvault_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("locate_snapshot", set_name = "Live-1");
/// let event = capture.last_for_set("locate_snapshot", "start", "Live-1");
/// assert!(event.is_some());
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}
