use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::page::Page;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackingEvent {
    pub name: String,
    pub payload: Map<String, Value>,
    pub timestamp: String,
}

/// Destination for tracking events. Implementations must not panic; a lost
/// event is acceptable.
pub trait EventSink {
    fn record(&self, event: &TrackingEvent);
}

pub trait Clock {
    /// Current time as an ISO-8601 string.
    fn now_iso(&self) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
    pub filename: String,
    pub lineno: u32,
    pub colno: u32,
}

#[derive(Clone)]
pub struct Tracker {
    sink: Rc<dyn EventSink>,
    clock: Rc<dyn Clock>,
}

impl Tracker {
    pub fn new(sink: Rc<dyn EventSink>, clock: Rc<dyn Clock>) -> Self {
        Self { sink, clock }
    }

    pub fn disabled() -> Self {
        Self::new(Rc::new(NullSink), Rc::new(FixedClock::epoch()))
    }

    pub fn now_iso(&self) -> String {
        self.clock.now_iso()
    }

    pub fn track(&self, name: &str, payload: Value) {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        let event = TrackingEvent {
            name: name.to_string(),
            payload,
            timestamp: self.clock.now_iso(),
        };
        self.sink.record(&event);
    }

    pub fn page_view(&self, page: Page) {
        self.track("page_view", json!({ "page": page }));
    }

    pub fn navigation(&self, from: Page, to: Page) {
        self.track("navigation", json!({ "from": from, "to": to }));
    }

    pub fn course_interest(&self, course: &str, page: Page) {
        self.track("course_interest", json!({ "course": course, "page": page }));
    }

    pub fn button_click(&self, button: &str, action: &str, page: Page) {
        self.track(
            "button_click",
            json!({ "button": button, "action": action, "page": page }),
        );
    }

    pub fn form_interaction(&self, field: &str, action: &str, page: Page) {
        self.track(
            "form_interaction",
            json!({ "field": field, "action": action, "page": page }),
        );
    }

    pub fn runtime_error(&self, error: &RuntimeError) {
        self.track(
            "javascript_error",
            json!({
                "message": error.message,
                "filename": error.filename,
                "lineno": error.lineno,
                "colno": error.colno,
            }),
        );
    }

    pub fn page_load_time(&self, load_time_ms: f64, page: Page) {
        self.track(
            "page_load_time",
            json!({ "loadTime": load_time_ms.round() as u64, "page": page }),
        );
    }
}

pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &TrackingEvent) {}
}

#[derive(Default)]
pub struct MemorySink {
    events: RefCell<Vec<TrackingEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|event| event.name.clone())
            .collect()
    }

    pub fn last(&self) -> Option<TrackingEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &TrackingEvent) {
        if let Ok(mut events) = self.events.try_borrow_mut() {
            events.push(event.clone());
        }
    }
}

#[derive(Clone, Debug)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn epoch() -> Self {
        Self("1970-01-01T00:00:00.000Z".to_string())
    }
}

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.0.clone()
    }
}
