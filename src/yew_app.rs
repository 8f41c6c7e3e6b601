use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, ErrorEvent, Event, EventTarget, FocusEvent, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, InputEvent, KeyboardEvent, MouseEvent, ScrollLogicalPosition, SubmitEvent,
};
use yew::prelude::*;

use smartkempapura_core::{
    FieldKind, FormField, MailRelay, Page, RuntimeError, SiteConfig, SiteState, SubmitBlocked,
    SubmitOutcome, Tracker, ViewChange, SUCCESS_MODAL_ID,
};

use crate::browser::{self, BrowserClock, ConsoleSink};
use crate::relay::EmailJsRelay;
use crate::resize::ResizeDebounce;

const NAV_ID: &str = "site-nav";
const MENU_TOGGLE_ID: &str = "menu-toggle";
const CONTACT_FORM_ID: &str = "contactForm";

struct Course {
    name: &'static str,
    board: &'static str,
    blurb: &'static str,
}

const COURSES: &[Course] = &[
    Course {
        name: "Mathematics",
        board: "ICSE & CBSE",
        blurb: "Step-by-step problem solving with adaptive practice sets for Classes 6-12.",
    },
    Course {
        name: "Science",
        board: "ICSE & CBSE",
        blurb: "Physics, Chemistry and Biology concepts explained with worked examples.",
    },
    Course {
        name: "English",
        board: "ICSE",
        blurb: "Grammar, comprehension and literature with personalised writing feedback.",
    },
    Course {
        name: "Board Exam Preparation",
        board: "Class 10 & 12",
        blurb: "Timed mock papers, revision plans and doubt-clearing sessions.",
    },
];

const FEATURES: &[(&str, &str)] = &[
    ("AI-Powered Learning", "Lessons adapt to each student's pace and weak areas."),
    ("Expert Tutors", "Experienced teachers guide every session alongside the AI."),
    ("Progress Reports", "Parents receive regular, easy-to-read progress updates."),
];

type SharedSite = Rc<RefCell<SiteState>>;

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) config: Rc<SiteConfig>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}

fn apply_view_change(site: &SharedSite, change: ViewChange) {
    browser::set_title(change.title);
    browser::scroll_to_top();
    if !change.focus_first_field {
        return;
    }
    let (target, delay_ms) = {
        let site = site.borrow();
        (
            site.form().first_text_field().map(|field| field.name().to_string()),
            site.config().contact_focus_delay_ms,
        )
    };
    if let Some(id) = target {
        browser::focus_after(id, delay_ms);
    }
}

fn nav_to(site: &SharedSite, update: &UseForceUpdateHandle, target: Page) -> Callback<MouseEvent> {
    let site = site.clone();
    let update = update.clone();
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        let change = site.borrow_mut().follow_nav_link(target);
        apply_view_change(&site, change);
        update.force_update();
    })
}

fn button_to(
    site: &SharedSite,
    update: &UseForceUpdateHandle,
    label: &'static str,
    target: Page,
) -> Callback<MouseEvent> {
    let site = site.clone();
    let update = update.clone();
    Callback::from(move |_event: MouseEvent| {
        let change = {
            let mut site = site.borrow_mut();
            site.track_button_click(label, &format!("show_{target}"));
            site.show_page(target)
        };
        apply_view_change(&site, change);
        update.force_update();
    })
}

fn course_enquiry(site: &SharedSite, update: &UseForceUpdateHandle, course: &'static str) -> Callback<MouseEvent> {
    let site = site.clone();
    let update = update.clone();
    Callback::from(move |_event: MouseEvent| {
        let change = {
            let mut site = site.borrow_mut();
            site.track_course_interest(course);
            site.show_contact_page()
        };
        apply_view_change(&site, change);
        update.force_update();
    })
}

fn anchor_scroll() -> Callback<MouseEvent> {
    Callback::from(|event: MouseEvent| {
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest("a[href]").ok().flatten())
        else {
            return;
        };
        event.prevent_default();
        let href = anchor.get_attribute("href").unwrap_or_default();
        browser::scroll_to_anchor(&href);
    })
}

fn control_value(target: Option<EventTarget>) -> String {
    let Some(target) = target else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

fn render_field(field: &FormField, site: &SharedSite, update: &UseForceUpdateHandle) -> Html {
    let name = field.name().to_string();
    let oninput = {
        let site = site.clone();
        let update = update.clone();
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            let value = control_value(event.target());
            site.borrow_mut().field_input(&name, &value);
            update.force_update();
        })
    };
    let onblur = {
        let site = site.clone();
        let update = update.clone();
        let name = name.clone();
        Callback::from(move |_event: FocusEvent| {
            site.borrow_mut().field_blur(&name);
            update.force_update();
        })
    };
    let onchange = {
        let site = site.clone();
        let update = update.clone();
        let name = name.clone();
        Callback::from(move |event: Event| {
            let value = control_value(event.target());
            site.borrow_mut().field_change(&name, &value);
            update.force_update();
        })
    };
    let onfocus = {
        let site = site.clone();
        let name = name.clone();
        Callback::from(move |_event: FocusEvent| {
            site.borrow_mut().field_focus(&name);
        })
    };

    let class = classes!("form-control", field.has_error().then_some("error"));
    let aria_required = field.required().then_some("true");
    let value = field.value().to_string();
    let control = match field.kind() {
        FieldKind::Select(options) => html! {
            <select
                id={name.clone()}
                name={name.clone()}
                {class}
                required={field.required()}
                aria-required={aria_required}
                {onblur}
                {onchange}
                {onfocus}
            >
                <option value="" selected={value.is_empty()}>{ field.placeholder().to_string() }</option>
                { for options.iter().map(|option| html! {
                    <option value={*option} selected={value == *option}>{ *option }</option>
                }) }
            </select>
        },
        FieldKind::TextArea => html! {
            <textarea
                id={name.clone()}
                name={name.clone()}
                {class}
                rows="4"
                placeholder={field.placeholder().to_string()}
                {value}
                {oninput}
                {onblur}
                {onchange}
                {onfocus}
            />
        },
        kind => html! {
            <input
                type={kind.input_type().unwrap_or("text")}
                id={name.clone()}
                name={name.clone()}
                {class}
                placeholder={field.placeholder().to_string()}
                required={field.required()}
                aria-required={aria_required}
                {value}
                {oninput}
                {onblur}
                {onchange}
                {onfocus}
            />
        },
    };
    let required_mark = if field.required() {
        html! { <span class="required">{ " *" }</span> }
    } else {
        html! {}
    };
    html! {
        <div class="form-group" key={name.clone()}>
            <label class="form-label" for={name.clone()}>{ field.label().to_string() }{ required_mark }</label>
            { control }
            <div
                id={field.error_id()}
                class={classes!("error-message", field.has_error().then_some("show"))}
                role="alert"
                aria-live="polite"
            >
                { field.error_message() }
            </div>
        </div>
    }
}

fn submit_handler(site: &SharedSite, update: &UseForceUpdateHandle) -> Callback<SubmitEvent> {
    let site = site.clone();
    let update = update.clone();
    Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let context = browser::client_context(site.borrow().current_page());
        let begun = site.borrow_mut().begin_submit(context);
        update.force_update();
        let record = match begun {
            Ok(record) => record,
            Err(SubmitBlocked::Invalid { first_error }) => {
                if let Some(name) = first_error {
                    browser::scroll_into_view(&name, ScrollLogicalPosition::Center);
                }
                return;
            }
            Err(SubmitBlocked::InFlight) => return,
        };
        let (service_id, template_id) = {
            let site = site.borrow();
            (
                site.workflow().service_id().to_string(),
                site.workflow().template_id().to_string(),
            )
        };
        let site = site.clone();
        let update = update.clone();
        spawn_local(async move {
            let result = EmailJsRelay
                .send_form(&service_id, &template_id, &record)
                .await;
            match &result {
                Ok(response) => {
                    gloo::console::log!("SUCCESS!", response.status, response.text.clone())
                }
                Err(err) => gloo::console::warn!("FAILED...", err.to_string()),
            }
            let outcome = site.borrow_mut().finish_submit(result);
            update.force_update();
            match outcome {
                SubmitOutcome::Delivered(_) => {
                    browser::set_body_scroll_locked(true);
                    // Focus first: the blur it causes must see the submitted
                    // values, not the emptied form.
                    Timeout::new(0, move || {
                        browser::focus(SUCCESS_MODAL_ID);
                        if site.borrow_mut().clear_submitted_form() {
                            update.force_update();
                        }
                    })
                    .forget();
                }
                SubmitOutcome::Failed { notice, .. } => browser::alert(&notice),
            }
        });
    })
}

fn install_global_listeners(site: SharedSite, update: UseForceUpdateHandle) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    let Some(window) = web_sys::window() else {
        return listeners;
    };

    if let Some(document) = window.document() {
        let site_for_click = site.clone();
        let update_for_click = update.clone();
        listeners.push(EventListener::new(&document, "click", move |event| {
            let inside_nav = browser::event_within(event, NAV_ID);
            let inside_toggle = browser::event_within(event, MENU_TOGGLE_ID);
            let on_backdrop = browser::event_target_is(event, SUCCESS_MODAL_ID);
            let Ok(mut site) = site_for_click.try_borrow_mut() else {
                return;
            };
            if site.document_click(inside_nav, inside_toggle, on_backdrop) {
                browser::set_body_scroll_locked(site.modal().locks_scroll());
                update_for_click.force_update();
            }
        }));

        let site_for_key = site.clone();
        let update_for_key = update.clone();
        listeners.push(EventListener::new(&document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Ok(mut site) = site_for_key.try_borrow_mut() else {
                return;
            };
            if site.key_pressed(&event.key()) {
                browser::set_body_scroll_locked(false);
                update_for_key.force_update();
            }
        }));
    }

    let debouncer = site.borrow().config().resize_debouncer();
    let site_for_resize = site.clone();
    let update_for_resize = update.clone();
    let resize = ResizeDebounce::new(
        debouncer,
        Rc::new(move |width| {
            let closed = site_for_resize.borrow_mut().viewport_resized(width);
            if closed {
                update_for_resize.force_update();
            }
        }),
    );
    listeners.push(EventListener::new(&window, "resize", move |_event| {
        if let Some(width) = browser::viewport_width() {
            resize.push(width);
        }
    }));

    let site_for_error = site.clone();
    listeners.push(EventListener::new(&window, "error", move |event| {
        let Some(event) = event.dyn_ref::<ErrorEvent>() else {
            return;
        };
        gloo::console::error!("Application error:", event.error());
        let error = RuntimeError {
            message: event.message(),
            filename: event.filename(),
            lineno: event.lineno(),
            colno: event.colno(),
        };
        if let Ok(site) = site_for_error.try_borrow() {
            site.track_runtime_error(&error);
        }
    }));

    let track_load = move || {
        if let Some(elapsed) = browser::elapsed_since_navigation_ms() {
            if let Ok(site) = site.try_borrow() {
                site.track_page_load(elapsed);
            }
        }
    };
    if browser::document_complete() {
        track_load();
    } else {
        listeners.push(EventListener::once(&window, "load", move |_event| track_load()));
    }

    listeners
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let site = use_mut_ref(|| {
        let tracker = Tracker::new(Rc::new(ConsoleSink), Rc::new(BrowserClock));
        SiteState::new((*config).clone(), tracker)
    });
    let update = use_force_update();

    {
        let site = site.clone();
        let update = update.clone();
        use_effect_with((), move |_| {
            browser::set_title(site.borrow().current_page().title());
            let listeners = install_global_listeners(site, update);
            move || drop(listeners)
        });
    }

    let state = site.borrow();
    let menu_open = state.menu().is_open();
    let modal_visible = state.modal().is_visible();
    let button = state.workflow().button().clone();
    let fallback_email = state.config().fallback_email.clone();

    let on_menu_click = {
        let site = site.clone();
        let update = update.clone();
        Callback::from(move |_event: MouseEvent| {
            site.borrow_mut().toggle_menu();
            update.force_update();
        })
    };
    let on_menu_key = {
        let site = site.clone();
        let update = update.clone();
        Callback::from(move |event: KeyboardEvent| {
            if site.borrow_mut().menu_key(&event.key()) {
                event.prevent_default();
                update.force_update();
            }
        })
    };
    let on_close_modal = {
        let site = site.clone();
        let update = update.clone();
        Callback::from(move |_event: MouseEvent| {
            if site.borrow_mut().hide_success_modal() {
                browser::set_body_scroll_locked(false);
                update.force_update();
            }
        })
    };

    let page_class = |page: Page| classes!("page", state.is_active(page).then_some("active"));
    let link_class = |page: Page| classes!("nav-link", state.is_active(page).then_some("active"));

    let courses = COURSES.iter().map(|course| {
        html! {
            <article class="course-card" key={course.name}>
                <h3>{ course.name }</h3>
                <span class="course-card__board">{ course.board }</span>
                <p>{ course.blurb }</p>
                <button type="button" class="btn btn--outline" onclick={course_enquiry(&site, &update, course.name)}>
                    { "Enquire Now" }
                </button>
            </article>
        }
    });
    let features = FEATURES.iter().map(|(title, text)| {
        html! {
            <div class="feature" key={*title}>
                <h3>{ *title }</h3>
                <p>{ *text }</p>
            </div>
        }
    });
    let fields = state
        .form()
        .fields()
        .iter()
        .map(|field| render_field(field, &site, &update))
        .collect::<Html>();

    html! {
        <>
            <header class="header">
                <div class="container header__inner">
                    <a href="#" class="logo" onclick={nav_to(&site, &update, Page::Homepage)}>
                        { "SmartKempapuraAI" }
                    </a>
                    <div
                        id={MENU_TOGGLE_ID}
                        class="mobile-menu-toggle"
                        role="button"
                        tabindex="0"
                        aria-label="Toggle navigation"
                        aria-controls={NAV_ID}
                        aria-expanded={menu_open.to_string()}
                        onclick={on_menu_click}
                        onkeydown={on_menu_key}
                    >
                        <span></span><span></span><span></span>
                    </div>
                    <nav id={NAV_ID} class={classes!("nav", menu_open.then_some("active"))}>
                        <a href="#" data-nav="homepage" class={link_class(Page::Homepage)} onclick={nav_to(&site, &update, Page::Homepage)}>
                            { "Home" }
                        </a>
                        <a href="#" data-nav="contact" class={link_class(Page::Contact)} onclick={nav_to(&site, &update, Page::Contact)}>
                            { "Contact Us" }
                        </a>
                    </nav>
                </div>
            </header>

            <main>
                <section id={Page::Homepage.element_id()} class={page_class(Page::Homepage)}>
                    <div class="hero">
                        <div class="container">
                            <h1>{ "AI-Powered Tutoring for ICSE & CBSE Students" }</h1>
                            <p class="hero__lead">
                                { "Personalised lessons in Kempapura, Bengaluru, built around how your child learns." }
                            </p>
                            <div class="hero__actions">
                                <button type="button" class="btn btn--primary" onclick={button_to(&site, &update, "Book a Free Demo", Page::Contact)}>
                                    { "Book a Free Demo" }
                                </button>
                                <a href="#courses" class="btn btn--outline" onclick={anchor_scroll()}>
                                    { "Explore Courses" }
                                </a>
                            </div>
                        </div>
                    </div>
                    <div id="courses" class="section">
                        <div class="container">
                            <h2>{ "Our Courses" }</h2>
                            <div class="course-grid">{ for courses }</div>
                        </div>
                    </div>
                    <div id="features" class="section section--alt">
                        <div class="container">
                            <h2>{ "Why SmartKempapuraAI" }</h2>
                            <div class="feature-grid">{ for features }</div>
                        </div>
                    </div>
                </section>

                <section id={Page::Contact.element_id()} class={page_class(Page::Contact)}>
                    <div class="section">
                        <div class="container container--narrow">
                            <h1>{ "Contact Us" }</h1>
                            <p>{ "Tell us about the student and we will call you back to schedule a free demo class." }</p>
                            <form id={CONTACT_FORM_ID} class="contact-form" novalidate=true onsubmit={submit_handler(&site, &update)}>
                                { fields }
                                <button
                                    type="submit"
                                    class={classes!("btn", "btn--primary", "btn--full-width", button.loading().then_some("loading"))}
                                    disabled={button.disabled()}
                                >
                                    { button.label().to_string() }
                                </button>
                            </form>
                            <p class="contact-fallback">
                                { "Prefer email? Write to " }
                                <a href={format!("mailto:{fallback_email}")}>{ fallback_email.clone() }</a>
                            </p>
                        </div>
                    </div>
                </section>
            </main>

            <footer class="footer">
                <div class="container">
                    <p>{ "© SmartKempapuraAI. All rights reserved." }</p>
                </div>
            </footer>

            <div
                id={SUCCESS_MODAL_ID}
                class={classes!("modal", (!modal_visible).then_some("hidden"), modal_visible.then_some("fade-in"))}
                tabindex="-1"
                role="dialog"
                aria-modal="true"
                aria-labelledby="success-title"
            >
                <div class="modal__content">
                    <h2 id="success-title">{ "Thank you!" }</h2>
                    <p>{ "We have received your enquiry and will get in touch shortly." }</p>
                    <button type="button" class="btn btn--primary" onclick={on_close_modal}>
                        { "Close" }
                    </button>
                </div>
            </div>
        </>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use smartkempapura_core::validate::REQUIRED_MESSAGE;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(root_id: &str) -> (Element, yew::AppHandle<App>) {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(root_id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        let props = AppProps {
            config: Rc::new(SiteConfig::default()),
        };
        let handle = yew::Renderer::<App>::with_root_and_props(root.clone(), props).render();
        (root, handle)
    }

    fn find(root: &Element, selector: &str) -> Element {
        root.query_selector(selector)
            .expect("valid selector")
            .unwrap_or_else(|| panic!("{selector} not rendered"))
    }

    fn click(root: &Element, selector: &str) {
        find(root, selector)
            .dyn_into::<HtmlElement>()
            .expect("clickable element")
            .click();
    }

    #[wasm_bindgen_test(async)]
    async fn nav_links_toggle_active_view() {
        set_panic_hook();
        let (root, handle) = mount("view-test-root");
        TimeoutFuture::new(0).await;

        let homepage = find(&root, "#homepage");
        let contact = find(&root, "#contact-page");
        assert!(homepage.class_list().contains("active"));
        assert!(!contact.class_list().contains("active"));

        click(&root, "[data-nav='contact']");
        TimeoutFuture::new(0).await;
        assert!(contact.class_list().contains("active"));
        assert!(!homepage.class_list().contains("active"));

        click(&root, "[data-nav='homepage']");
        TimeoutFuture::new(0).await;
        assert!(homepage.class_list().contains("active"));
        assert!(!contact.class_list().contains("active"));

        handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn empty_submit_shows_required_errors() {
        set_panic_hook();
        let (root, handle) = mount("form-test-root");
        TimeoutFuture::new(0).await;

        click(&root, "#contactForm button[type='submit']");
        TimeoutFuture::new(0).await;

        let error = find(&root, "#fullName-error");
        assert!(error.class_list().contains("show"));
        assert_eq!(error.text_content().unwrap_or_default().trim(), REQUIRED_MESSAGE);
        assert!(find(&root, "#fullName").class_list().contains("error"));
        let submit = find(&root, "#contactForm button[type='submit']");
        assert!(!submit.has_attribute("disabled"));

        handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn menu_toggle_opens_and_outside_click_closes() {
        set_panic_hook();
        let (root, handle) = mount("menu-test-root");
        TimeoutFuture::new(0).await;

        click(&root, "#menu-toggle");
        TimeoutFuture::new(0).await;
        assert!(find(&root, "#site-nav").class_list().contains("active"));

        click(&root, "footer");
        TimeoutFuture::new(0).await;
        assert!(!find(&root, "#site-nav").class_list().contains("active"));

        handle.destroy();
        root.remove();
    }
}
