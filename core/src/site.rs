use crate::config::SiteConfig;
use crate::error::{RelayError, SubmitBlocked};
use crate::form::ContactForm;
use crate::menu::MobileMenu;
use crate::modal::SuccessModal;
use crate::page::{Page, ViewChange, ViewState};
use crate::submission::{
    ClientContext, RelayResponse, SubmissionRecord, SubmissionWorkflow, SubmitOutcome,
    SubmitPhase,
};
use crate::track::{RuntimeError, Tracker};

/// All page state, owned in one place and shared by every handler.
pub struct SiteState {
    config: SiteConfig,
    view: ViewState,
    menu: MobileMenu,
    modal: SuccessModal,
    form: ContactForm,
    workflow: SubmissionWorkflow,
    tracker: Tracker,
}

impl SiteState {
    pub fn new(config: SiteConfig, tracker: Tracker) -> Self {
        Self::with_form(config, tracker, ContactForm::default())
    }

    pub fn with_form(config: SiteConfig, tracker: Tracker, form: ContactForm) -> Self {
        Self {
            view: ViewState::new(config.initial_page),
            menu: MobileMenu::new(config.mobile_breakpoint_px),
            modal: SuccessModal::default(),
            workflow: SubmissionWorkflow::new(&config),
            form,
            tracker,
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn current_page(&self) -> Page {
        self.view.current()
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.view.is_active(page)
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn modal(&self) -> &SuccessModal {
        &self.modal
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn workflow(&self) -> &SubmissionWorkflow {
        &self.workflow
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn show_page(&mut self, target: Page) -> ViewChange {
        let change = self.view.show(target);
        self.tracker.page_view(change.to);
        self.tracker.navigation(change.from, change.to);
        change
    }

    pub fn show_homepage(&mut self) -> ViewChange {
        self.show_page(Page::Homepage)
    }

    pub fn show_contact_page(&mut self) -> ViewChange {
        self.show_page(Page::Contact)
    }

    /// Navigation link: closes the mobile menu and switches view.
    pub fn follow_nav_link(&mut self, target: Page) -> ViewChange {
        self.menu.on_nav_link();
        self.show_page(target)
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu.toggle()
    }

    pub fn close_menu(&mut self) -> bool {
        self.menu.close()
    }

    pub fn menu_key(&mut self, key: &str) -> bool {
        self.menu.on_toggle_key(key)
    }

    /// Document click. Returns true when any state changed.
    pub fn document_click(&mut self, inside_nav: bool, inside_toggle: bool, on_backdrop: bool) -> bool {
        let menu_closed = self.menu.on_document_click(inside_nav, inside_toggle);
        let modal_closed = self.modal.on_backdrop_click(on_backdrop);
        menu_closed || modal_closed
    }

    pub fn viewport_resized(&mut self, width: f64) -> bool {
        self.menu.on_resize(width)
    }

    pub fn key_pressed(&mut self, key: &str) -> bool {
        self.modal.on_key(key)
    }

    pub fn hide_success_modal(&mut self) -> bool {
        self.modal.hide()
    }

    pub fn field_focus(&mut self, name: &str) {
        self.tracker
            .form_interaction(name, "focus", self.view.current());
    }

    pub fn field_input(&mut self, name: &str, value: &str) {
        self.form.on_input(name, value);
    }

    pub fn field_blur(&mut self, name: &str) {
        self.form.on_blur(name);
    }

    pub fn field_change(&mut self, name: &str, value: &str) {
        self.form.on_change(name, value);
        self.tracker
            .form_interaction(name, "change", self.view.current());
    }

    pub fn begin_submit(&mut self, context: ClientContext) -> Result<SubmissionRecord, SubmitBlocked> {
        self.workflow.begin(&mut self.form, context)
    }

    /// Applies the relay's answer and shows the modal on success. The form
    /// keeps the submitted values until `clear_submitted_form`, so a blur
    /// caused by moving focus to the modal validates filled fields rather
    /// than freshly emptied ones.
    pub fn finish_submit(&mut self, result: Result<RelayResponse, RelayError>) -> SubmitOutcome {
        let outcome = self.workflow.settle(result);
        if matches!(outcome, SubmitOutcome::Delivered(_)) {
            self.modal.show();
        }
        outcome
    }

    /// Second half of a successful submission: empties the form and drops
    /// every error indicator. Does nothing unless the last submission
    /// succeeded.
    pub fn clear_submitted_form(&mut self) -> bool {
        if self.workflow.phase() != SubmitPhase::Succeeded {
            return false;
        }
        self.form.reset();
        true
    }

    pub fn track_event(&self, name: &str, payload: serde_json::Value) {
        self.tracker.track(name, payload);
    }

    pub fn track_course_interest(&self, course: &str) {
        self.tracker.course_interest(course, self.view.current());
    }

    pub fn track_button_click(&self, button: &str, action: &str) {
        self.tracker
            .button_click(button, action, self.view.current());
    }

    pub fn track_runtime_error(&self, error: &RuntimeError) {
        self.tracker.runtime_error(error);
    }

    pub fn track_page_load(&self, load_time_ms: f64) {
        self.tracker.page_load_time(load_time_ms, Page::Homepage);
    }
}
