use std::rc::Rc;

use serde_json::json;
use smartkempapura_core::track::FixedClock;
use smartkempapura_core::{MemorySink, Page, RuntimeError, Tracker};

fn tracker() -> (Tracker, Rc<MemorySink>) {
    let sink = Rc::new(MemorySink::new());
    let clock = Rc::new(FixedClock("2026-10-19T08:00:00.000Z".to_string()));
    (Tracker::new(sink.clone(), clock), sink)
}

#[test]
fn events_carry_timestamp_and_payload() {
    let (tracker, sink) = tracker();
    tracker.course_interest("ICSE Mathematics", Page::Homepage);
    let event = sink.last().unwrap();
    assert_eq!(event.name, "course_interest");
    assert_eq!(event.timestamp, "2026-10-19T08:00:00.000Z");
    assert_eq!(event.payload["course"], "ICSE Mathematics");
    assert_eq!(event.payload["page"], "homepage");
}

#[test]
fn button_clicks() {
    let (tracker, sink) = tracker();
    tracker.button_click("Book a Free Demo", "show_contact", Page::Homepage);
    let event = sink.last().unwrap();
    assert_eq!(event.payload["button"], "Book a Free Demo");
    assert_eq!(event.payload["action"], "show_contact");
}

#[test]
fn runtime_errors_keep_source_location() {
    let (tracker, sink) = tracker();
    tracker.runtime_error(&RuntimeError {
        message: "boom".to_string(),
        filename: "app.js".to_string(),
        lineno: 12,
        colno: 7,
    });
    let event = sink.last().unwrap();
    assert_eq!(event.name, "javascript_error");
    assert_eq!(event.payload["lineno"], 12);
    assert_eq!(event.payload["colno"], 7);
    assert_eq!(event.payload["filename"], "app.js");
}

#[test]
fn non_object_payloads_are_wrapped() {
    let (tracker, sink) = tracker();
    tracker.track("custom", json!(42));
    tracker.track("empty", serde_json::Value::Null);
    let events = sink.events();
    assert_eq!(events[0].payload["value"], 42);
    assert!(events[1].payload.is_empty());
}

#[test]
fn page_load_time_is_rounded() {
    let (tracker, sink) = tracker();
    tracker.page_load_time(812.6, Page::Homepage);
    let event = sink.last().unwrap();
    assert_eq!(event.payload["loadTime"], 813);
    assert_eq!(event.payload["page"], "homepage");
}

#[test]
fn disabled_tracker_is_silent() {
    let tracker = Tracker::disabled();
    tracker.page_view(Page::Contact);
}
