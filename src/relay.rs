use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use smartkempapura_core::{MailRelay, RelayError, RelayResponse, SubmissionRecord};

const SDK_GLOBAL: &str = "emailjs";

/// EmailJS browser SDK, loaded from `index.html` as the global `emailjs`.
pub(crate) struct EmailJsRelay;

pub(crate) fn init(public_key: Option<&str>) {
    let Some(public_key) = public_key else {
        return;
    };
    if let Err(err) = call("init", &[JsValue::from_str(public_key)]) {
        gloo::console::warn!("emailjs init failed", err.to_string());
    }
}

impl MailRelay for EmailJsRelay {
    async fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        record: &SubmissionRecord,
    ) -> Result<RelayResponse, RelayError> {
        let params = template_params(record)?;
        let promise = call(
            "send",
            &[
                JsValue::from_str(service_id),
                JsValue::from_str(template_id),
                params,
            ],
        )?
        .dyn_into::<Promise>()
        .map_err(|_| RelayError::Unavailable("emailjs.send did not return a promise".to_string()))?;
        match JsFuture::from(promise).await {
            Ok(value) => {
                let (status, text) = status_and_text(&value);
                Ok(RelayResponse {
                    status: status.unwrap_or(200),
                    text: text.unwrap_or_default(),
                })
            }
            Err(err) => Err(rejection(err)),
        }
    }
}

fn sdk() -> Result<JsValue, RelayError> {
    let window = web_sys::window()
        .ok_or_else(|| RelayError::Unavailable("missing window".to_string()))?;
    let value = Reflect::get(&window, &JsValue::from_str(SDK_GLOBAL))
        .map_err(|err| RelayError::Unavailable(js_err(err)))?;
    if value.is_null() || value.is_undefined() {
        return Err(RelayError::Unavailable("emailjs sdk not loaded".to_string()));
    }
    Ok(value)
}

fn call(method: &str, args: &[JsValue]) -> Result<JsValue, RelayError> {
    let sdk = sdk()?;
    let func = Reflect::get(&sdk, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| RelayError::Unavailable(format!("emailjs.{method} is not a function")))?;
    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }
    func.apply(&sdk, &array)
        .map_err(|err| RelayError::Transport(js_err(err)))
}

fn template_params(record: &SubmissionRecord) -> Result<JsValue, RelayError> {
    let json = serde_json::to_string(record).map_err(|err| RelayError::Transport(err.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|err| RelayError::Transport(js_err(err)))
}

fn status_and_text(value: &JsValue) -> (Option<u16>, Option<String>) {
    let status = Reflect::get(value, &JsValue::from_str("status"))
        .ok()
        .and_then(|status| status.as_f64())
        .map(|status| status as u16);
    let text = Reflect::get(value, &JsValue::from_str("text"))
        .ok()
        .and_then(|text| text.as_string());
    (status, text)
}

fn rejection(err: JsValue) -> RelayError {
    match status_and_text(&err) {
        (Some(status), text) => RelayError::Rejected {
            status,
            text: text.unwrap_or_default(),
        },
        _ => RelayError::Transport(js_err(err)),
    }
}

fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
