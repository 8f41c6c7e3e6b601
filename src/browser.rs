use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, HtmlElement, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use smartkempapura_core::{ClientContext, Clock, EventSink, Page, TrackingEvent};

pub(crate) fn set_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        document.set_title(title);
    }
}

pub(crate) fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

fn element_by_id(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

pub(crate) fn scroll_into_view(id: &str, block: ScrollLogicalPosition) -> bool {
    let Some(element) = element_by_id(id) else {
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// In-page `#anchor` links scroll smoothly instead of jumping.
pub(crate) fn scroll_to_anchor(href: &str) -> bool {
    let Some(id) = href.strip_prefix('#') else {
        return false;
    };
    if id.is_empty() {
        return false;
    }
    scroll_into_view(id, ScrollLogicalPosition::Start)
}

pub(crate) fn focus(id: &str) {
    let Some(element) = element_by_id(id) else {
        return;
    };
    if let Ok(element) = element.dyn_into::<HtmlElement>() {
        let _ = element.focus();
    }
}

/// Focuses after `delay_ms`, once the newly shown view has rendered.
pub(crate) fn focus_after(id: String, delay_ms: u32) {
    Timeout::new(delay_ms, move || focus(&id)).forget();
}

pub(crate) fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    let _ = body.style().set_property("overflow", value);
}

pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub(crate) fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

pub(crate) fn document_complete() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .map(|document| document.ready_state() == "complete")
        .unwrap_or(false)
}

/// Milliseconds since navigation start.
pub(crate) fn elapsed_since_navigation_ms() -> Option<f64> {
    Some(web_sys::window()?.performance()?.now())
}

pub(crate) fn event_within(event: &Event, id: &str) -> bool {
    let Some(container) = element_by_id(id) else {
        return false;
    };
    let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) else {
        return false;
    };
    container.contains(Some(&target))
}

pub(crate) fn event_target_is(event: &Event, id: &str) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| element.id() == id)
        .unwrap_or(false)
}

pub(crate) fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

pub(crate) fn client_context(page: Page) -> ClientContext {
    let window = web_sys::window();
    let user_agent = window
        .as_ref()
        .and_then(|window| window.navigator().user_agent().ok())
        .unwrap_or_default();
    let referrer = window
        .as_ref()
        .and_then(|window| window.document())
        .map(|document| document.referrer())
        .unwrap_or_default();
    ClientContext {
        submitted_at: now_iso(),
        user_agent,
        referrer,
        page,
    }
}

pub(crate) struct BrowserClock;

impl Clock for BrowserClock {
    fn now_iso(&self) -> String {
        now_iso()
    }
}

pub(crate) struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&self, event: &TrackingEvent) {
        let payload = serde_json::to_string(&event.payload).unwrap_or_default();
        let payload = js_sys::JSON::parse(&payload).unwrap_or_else(|_| JsValue::from_str(&payload));
        gloo::console::log!(
            format!("Event: {}", event.name),
            payload,
            event.timestamp.clone()
        );
    }
}
