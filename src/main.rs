mod app_router;
mod browser;
mod relay;
mod resize;
mod yew_app;

use std::rc::Rc;

use yew_app::{App, AppProps};

fn main() {
    console_error_panic_hook::set_once();
    let config = app_router::load_site_config();
    relay::init(config.public_key.as_deref());
    gloo::console::log!("SmartKempapuraAI application initialized");
    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
