use smartkempapura_core::config::{
    KEY_CONTACT_FOCUS_DELAY_MS, KEY_FALLBACK_EMAIL, KEY_MOBILE_BREAKPOINT_PX, KEY_PUBLIC_KEY,
    KEY_RESIZE_DEBOUNCE_MS, KEY_SERVICE_ID, KEY_SUBMIT_LABEL, KEY_TEMPLATE_ID,
};
use smartkempapura_core::{Page, SiteConfig};

pub(crate) fn load_site_config() -> SiteConfig {
    let config = match SiteConfig::from_lookup(compile_time_value) {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!("invalid site config, using defaults", err.to_string());
            SiteConfig::default()
        }
    };
    config.with_initial_page(initial_page())
}

pub(crate) fn initial_page() -> Page {
    let Some(window) = web_sys::window() else {
        return Page::default();
    };
    let hash = window.location().hash().unwrap_or_default();
    Page::from_hash(&hash).unwrap_or_default()
}

fn compile_time_value(key: &str) -> Option<&'static str> {
    match key {
        KEY_SERVICE_ID => option_env!("SMARTKEMPAPURA_EMAILJS_SERVICE_ID")
            .or(option_env!("TRUNK_PUBLIC_EMAILJS_SERVICE_ID")),
        KEY_TEMPLATE_ID => option_env!("SMARTKEMPAPURA_EMAILJS_TEMPLATE_ID")
            .or(option_env!("TRUNK_PUBLIC_EMAILJS_TEMPLATE_ID")),
        KEY_PUBLIC_KEY => option_env!("SMARTKEMPAPURA_EMAILJS_PUBLIC_KEY")
            .or(option_env!("TRUNK_PUBLIC_EMAILJS_PUBLIC_KEY")),
        KEY_FALLBACK_EMAIL => option_env!("SMARTKEMPAPURA_FALLBACK_EMAIL")
            .or(option_env!("TRUNK_PUBLIC_FALLBACK_EMAIL")),
        KEY_SUBMIT_LABEL => option_env!("SMARTKEMPAPURA_SUBMIT_LABEL")
            .or(option_env!("TRUNK_PUBLIC_SUBMIT_LABEL")),
        KEY_RESIZE_DEBOUNCE_MS => option_env!("SMARTKEMPAPURA_RESIZE_DEBOUNCE_MS")
            .or(option_env!("TRUNK_PUBLIC_RESIZE_DEBOUNCE_MS")),
        KEY_MOBILE_BREAKPOINT_PX => option_env!("SMARTKEMPAPURA_MOBILE_BREAKPOINT_PX")
            .or(option_env!("TRUNK_PUBLIC_MOBILE_BREAKPOINT_PX")),
        KEY_CONTACT_FOCUS_DELAY_MS => option_env!("SMARTKEMPAPURA_CONTACT_FOCUS_DELAY_MS")
            .or(option_env!("TRUNK_PUBLIC_CONTACT_FOCUS_DELAY_MS")),
        _ => None,
    }
}
