use crate::debounce;
use crate::error::ConfigError;
use crate::menu::MOBILE_BREAKPOINT_PX;
use crate::page;

pub const DEFAULT_SERVICE_ID: &str = "service_smartkempapura";
pub const DEFAULT_TEMPLATE_ID: &str = "template_contact";
pub const DEFAULT_FALLBACK_EMAIL: &str = "smartkempapuraai@gmail.com";
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit Enquiry";
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const CONTACT_FOCUS_DELAY_MS: u32 = 100;

pub const KEY_SERVICE_ID: &str = "EMAILJS_SERVICE_ID";
pub const KEY_TEMPLATE_ID: &str = "EMAILJS_TEMPLATE_ID";
pub const KEY_PUBLIC_KEY: &str = "EMAILJS_PUBLIC_KEY";
pub const KEY_FALLBACK_EMAIL: &str = "FALLBACK_EMAIL";
pub const KEY_SUBMIT_LABEL: &str = "SUBMIT_LABEL";
pub const KEY_RESIZE_DEBOUNCE_MS: &str = "RESIZE_DEBOUNCE_MS";
pub const KEY_MOBILE_BREAKPOINT_PX: &str = "MOBILE_BREAKPOINT_PX";
pub const KEY_CONTACT_FOCUS_DELAY_MS: &str = "CONTACT_FOCUS_DELAY_MS";

pub const CONFIG_KEYS: &[&str] = &[
    KEY_SERVICE_ID,
    KEY_TEMPLATE_ID,
    KEY_PUBLIC_KEY,
    KEY_FALLBACK_EMAIL,
    KEY_SUBMIT_LABEL,
    KEY_RESIZE_DEBOUNCE_MS,
    KEY_MOBILE_BREAKPOINT_PX,
    KEY_CONTACT_FOCUS_DELAY_MS,
];

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: Option<String>,
    pub fallback_email: String,
    pub submit_label: String,
    pub resize_debounce_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub contact_focus_delay_ms: u32,
    pub initial_page: page::Page,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            service_id: DEFAULT_SERVICE_ID.to_string(),
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            public_key: None,
            fallback_email: DEFAULT_FALLBACK_EMAIL.to_string(),
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            contact_focus_delay_ms: CONTACT_FOCUS_DELAY_MS,
            initial_page: page::Page::Homepage,
        }
    }
}

impl SiteConfig {
    /// Builds a config from the defaults plus any overrides `lookup` returns
    /// for the keys in [`CONFIG_KEYS`]. Blank overrides are ignored.
    pub fn from_lookup<F, S>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<S>,
        S: AsRef<str>,
    {
        let get = |key: &str| {
            lookup(key).and_then(|raw| {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };
        let mut config = Self::default();
        if let Some(value) = get(KEY_SERVICE_ID) {
            config.service_id = value;
        }
        if let Some(value) = get(KEY_TEMPLATE_ID) {
            config.template_id = value;
        }
        config.public_key = get(KEY_PUBLIC_KEY);
        if let Some(value) = get(KEY_FALLBACK_EMAIL) {
            config.fallback_email = value;
        }
        if let Some(value) = get(KEY_SUBMIT_LABEL) {
            config.submit_label = value;
        }
        if let Some(value) = get(KEY_RESIZE_DEBOUNCE_MS) {
            config.resize_debounce_ms = parse_number(KEY_RESIZE_DEBOUNCE_MS, &value)?;
        }
        if let Some(value) = get(KEY_MOBILE_BREAKPOINT_PX) {
            config.mobile_breakpoint_px = parse_number(KEY_MOBILE_BREAKPOINT_PX, &value)?;
        }
        if let Some(value) = get(KEY_CONTACT_FOCUS_DELAY_MS) {
            config.contact_focus_delay_ms = parse_number(KEY_CONTACT_FOCUS_DELAY_MS, &value)?;
        }
        Ok(config)
    }

    pub fn with_initial_page(mut self, page: page::Page) -> Self {
        self.initial_page = page;
        self
    }

    pub fn resize_debouncer<T>(&self) -> debounce::Debouncer<T> {
        debounce::Debouncer::new(self.resize_debounce_ms)
    }

    pub fn failure_notice(&self) -> String {
        format!(
            "Failed to send form. Please try again or contact us directly at {}",
            self.fallback_email
        )
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_replace_defaults() {
        let env: HashMap<&str, &str> = [
            (KEY_SERVICE_ID, "service_test"),
            (KEY_PUBLIC_KEY, "  pk_123 "),
            (KEY_TEMPLATE_ID, "   "),
            (KEY_RESIZE_DEBOUNCE_MS, "100"),
        ]
        .into_iter()
        .collect();
        let config = SiteConfig::from_lookup(|key| env.get(key).copied()).unwrap();
        assert_eq!(config.service_id, "service_test");
        assert_eq!(config.template_id, DEFAULT_TEMPLATE_ID);
        assert_eq!(config.public_key.as_deref(), Some("pk_123"));
        assert_eq!(config.resize_debounce_ms, 100);
        assert_eq!(config.mobile_breakpoint_px, MOBILE_BREAKPOINT_PX);
    }

    #[test]
    fn bad_number_is_reported() {
        let err = SiteConfig::from_lookup(|key| (key == KEY_MOBILE_BREAKPOINT_PX).then_some("wide"))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: KEY_MOBILE_BREAKPOINT_PX,
                value: "wide".to_string(),
            }
        );
    }

    #[test]
    fn failure_notice_names_fallback_address() {
        let config = SiteConfig::default();
        assert!(config.failure_notice().ends_with("smartkempapuraai@gmail.com"));
    }
}
