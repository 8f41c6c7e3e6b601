use std::cell::{Cell, RefCell};

use futures::executor::block_on;
use smartkempapura_core::validate::{NAME_MESSAGE, REQUIRED_MESSAGE};
use smartkempapura_core::{
    ClientContext, ContactForm, MailRelay, Page, RelayError, RelayResponse, SiteConfig,
    SubmissionRecord, SubmissionWorkflow, SubmitBlocked, SubmitOutcome, SubmitPhase,
};

struct ScriptedRelay {
    result: Result<RelayResponse, RelayError>,
    calls: Cell<u32>,
    last: RefCell<Option<(String, String, SubmissionRecord)>>,
}

impl ScriptedRelay {
    fn ok() -> Self {
        Self::with(Ok(RelayResponse {
            status: 200,
            text: "OK".to_string(),
        }))
    }

    fn failing() -> Self {
        Self::with(Err(RelayError::Rejected {
            status: 400,
            text: "The template ID is invalid".to_string(),
        }))
    }

    fn with(result: Result<RelayResponse, RelayError>) -> Self {
        Self {
            result,
            calls: Cell::new(0),
            last: RefCell::new(None),
        }
    }
}

impl MailRelay for ScriptedRelay {
    async fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        record: &SubmissionRecord,
    ) -> Result<RelayResponse, RelayError> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some((
            service_id.to_string(),
            template_id.to_string(),
            record.clone(),
        ));
        self.result.clone()
    }
}

fn context() -> ClientContext {
    ClientContext {
        submitted_at: "2026-10-19T09:30:00.000Z".to_string(),
        user_agent: "Mozilla/5.0 (test)".to_string(),
        referrer: "https://example.com/".to_string(),
        page: Page::Contact,
    }
}

fn filled_form() -> ContactForm {
    let mut form = ContactForm::default();
    form.set_value("fullName", "Jo");
    form.set_value("phoneNumber", "9123456789");
    form.set_value("studentClass", "Class 9");
    form.set_value("board", "ICSE");
    form.set_value("message", "Maths tuition");
    form
}

#[test]
fn valid_form_is_delivered_and_cleared() {
    let config = SiteConfig::default();
    let mut workflow = SubmissionWorkflow::new(&config);
    let mut form = filled_form();
    let relay = ScriptedRelay::ok();

    let outcome = block_on(workflow.submit(&mut form, context(), &relay)).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Delivered(ref response) if response.status == 200));
    assert_eq!(relay.calls.get(), 1);
    let (service, template, record) = relay.last.borrow().clone().unwrap();
    assert_eq!(service, config.service_id);
    assert_eq!(template, config.template_id);
    assert_eq!(record.field("fullName"), Some("Jo"));
    assert_eq!(record.field("phoneNumber"), Some("9123456789"));
    assert_eq!(record.current_page, Page::Contact);

    assert!(form.fields().iter().all(|field| field.value().is_empty()));
    assert!(form.fields().iter().all(|field| !field.has_error()));
    assert_eq!(workflow.phase(), SubmitPhase::Succeeded);
    assert!(!workflow.button().disabled());
    assert!(!workflow.button().loading());
    assert_eq!(workflow.button().label(), config.submit_label);
}

#[test]
fn relay_failure_keeps_values_and_reports_fallback() {
    let config = SiteConfig::default();
    let mut workflow = SubmissionWorkflow::new(&config);
    let mut form = filled_form();
    let before = form.field_set();
    let relay = ScriptedRelay::failing();

    let outcome = block_on(workflow.submit(&mut form, context(), &relay)).unwrap();

    match outcome {
        SubmitOutcome::Failed { notice, error } => {
            assert!(notice.contains(&config.fallback_email));
            assert!(matches!(error, RelayError::Rejected { status: 400, .. }));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(form.field_set(), before);
    assert_eq!(workflow.phase(), SubmitPhase::Failed);
    assert!(!workflow.button().disabled());
    assert_eq!(workflow.button().label(), config.submit_label);
}

#[test]
fn invalid_form_never_reaches_relay() {
    let mut workflow = SubmissionWorkflow::new(&SiteConfig::default());
    let mut form = filled_form();
    form.set_value("fullName", "J");
    form.set_value("board", "");
    let relay = ScriptedRelay::ok();

    let err = block_on(workflow.submit(&mut form, context(), &relay)).unwrap_err();

    assert_eq!(
        err,
        SubmitBlocked::Invalid {
            first_error: Some("fullName".to_string())
        }
    );
    assert_eq!(relay.calls.get(), 0);
    assert_eq!(form.field("fullName").unwrap().error_message(), NAME_MESSAGE);
    assert_eq!(form.field("board").unwrap().error_message(), REQUIRED_MESSAGE);
    assert_eq!(form.value("fullName"), Some("J"));
    assert_eq!(workflow.phase(), SubmitPhase::Idle);
    assert!(!workflow.button().disabled());
}

#[test]
fn submitting_disables_button_and_blocks_resubmit() {
    let config = SiteConfig::default();
    let mut workflow = SubmissionWorkflow::new(&config);
    let mut form = filled_form();

    let record = workflow.begin(&mut form, context()).unwrap();
    assert_eq!(record.submission_time, "2026-10-19T09:30:00.000Z");
    assert_eq!(workflow.phase(), SubmitPhase::Submitting);
    assert!(workflow.button().disabled());
    assert!(workflow.button().loading());
    assert_eq!(workflow.button().label(), "Submitting...");

    assert_eq!(
        workflow.begin(&mut form, context()),
        Err(SubmitBlocked::InFlight)
    );

    workflow.complete(&mut form, Err(RelayError::Transport("offline".to_string())));
    assert!(workflow.phase().accepts_submit());
    assert!(workflow.begin(&mut form, context()).is_ok());
}

#[test]
fn record_serializes_with_metadata() {
    let form = filled_form();
    let record = SubmissionRecord::collect(&form, context());
    let json = record.to_json();
    assert_eq!(json["fullName"], "Jo");
    assert_eq!(json["submissionTime"], "2026-10-19T09:30:00.000Z");
    assert_eq!(json["userAgent"], "Mozilla/5.0 (test)");
    assert_eq!(json["referrer"], "https://example.com/");
    assert_eq!(json["currentPage"], "contact");
}
