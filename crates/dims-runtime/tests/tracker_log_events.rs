#![forbid(unsafe_code)]

//! Structured logging emitted by the tracker.
//!
//! Verifies levels and fields of the events on the resize path:
//! - INFO for lifecycle changes and the headless fallback
//! - DEBUG for commits and filtered candidates, inside a `dims.resize` span
//! - TRACE for resizes that change nothing
//!
//! Run:
//!   cargo test -p dims-runtime --test tracker_log_events

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use dims_core::Breakpoint;
use dims_runtime::{BreakpointContext, DimensionTracker, ManualViewport, TrackerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);

        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
            parent_span_name,
        });
    }
}

fn with_captured_events(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Option<&'a CapturedEvent> {
    events.iter().find(|e| e.message() == message)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn headless_fallback_logged_at_info() {
    let events = with_captured_events(|| {
        let mut tracker =
            DimensionTracker::headless(BreakpointContext::default(), TrackerConfig::default());
        tracker.activate();
    });

    let fallback = find(&events, "no viewport; using fallback dimensions").expect("fallback event");
    assert_eq!(fallback.level, tracing::Level::INFO);
    assert_eq!(fallback.fields.get("tier").map(String::as_str), Some("xxl"));

    let disabled = find(&events, "no viewport; resize tracking disabled").expect("disabled event");
    assert_eq!(disabled.level, tracing::Level::INFO);
}

#[test]
fn lifecycle_logged_at_info() {
    let events = with_captured_events(|| {
        let vp = Rc::new(ManualViewport::new(800, 600));
        let mut tracker =
            DimensionTracker::with_viewport(BreakpointContext::default(), TrackerConfig::default(), vp);
        tracker.activate();
        tracker.deactivate();
    });

    let activated = find(&events, "resize tracking activated").expect("activated event");
    assert_eq!(activated.level, tracing::Level::INFO);
    assert!(activated.fields.contains_key("listener"));

    let deactivated = find(&events, "resize tracking deactivated").expect("deactivated event");
    assert_eq!(deactivated.level, tracing::Level::INFO);
}

#[test]
fn commit_is_debug_inside_resize_span() {
    let events = with_captured_events(|| {
        let tracker =
            DimensionTracker::headless(BreakpointContext::default(), TrackerConfig::default());
        tracker.on_resize(800, 600);
    });

    let commit = find(&events, "dimensions committed").expect("commit event");
    assert_eq!(commit.level, tracing::Level::DEBUG);
    assert_eq!(commit.parent_span_name.as_deref(), Some("dims.resize"));
    assert_eq!(commit.fields.get("from").map(String::as_str), Some("xxl"));
    assert_eq!(commit.fields.get("to").map(String::as_str), Some("md"));
}

#[test]
fn filtered_candidate_is_debug() {
    let events = with_captured_events(|| {
        let config = TrackerConfig::default().with_breakpoints([Breakpoint::XS]);
        let tracker = DimensionTracker::headless(BreakpointContext::default(), config);
        tracker.on_resize(800, 600);
    });

    let filtered = find(&events, "candidate tier not in allow-list; resize dropped")
        .expect("filtered event");
    assert_eq!(filtered.level, tracing::Level::DEBUG);
    assert_eq!(filtered.fields.get("candidate").map(String::as_str), Some("md"));
    assert!(find(&events, "dimensions committed").is_none());
}

#[test]
fn unchanged_resize_is_trace_only() {
    let events = with_captured_events(|| {
        let tracker =
            DimensionTracker::headless(BreakpointContext::default(), TrackerConfig::default());
        tracker.on_resize(1500, 600);
    });

    let unchanged = find(&events, "dimensions unchanged").expect("unchanged event");
    assert_eq!(unchanged.level, tracing::Level::TRACE);
    assert!(
        events
            .iter()
            .filter(|e| e.parent_span_name.as_deref() == Some("dims.resize"))
            .all(|e| e.level == tracing::Level::TRACE)
    );
}

#[cfg(feature = "config")]
#[test]
fn disjoint_allow_list_warns_on_load() {
    let events = with_captured_events(|| {
        let config = dims_runtime::DimsConfig::from_toml_str(
            "[table]\nsizes = [\"phone\", \"desktop\"]\nwidths = [0, 1024]\n\n[tracker]\nbreakpoints = [\"xs\", \"sm\"]\n",
        )
        .expect("parse");
        let (ctx, config) = config.into_parts().expect("disjoint allow-list is legal");
        let tracker = DimensionTracker::headless(ctx, config);
        assert!(matches!(
            tracker.on_resize(300, 200),
            dims_runtime::ResizeOutcome::Filtered { .. }
        ));
    });

    let warning = events
        .iter()
        .find(|e| e.message().starts_with("tracker.breakpoints shares no label"))
        .expect("warning event");
    assert_eq!(warning.level, tracing::Level::WARN);
    assert!(warning.fields.contains_key("breakpoints"));
}
