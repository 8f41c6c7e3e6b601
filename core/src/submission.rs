use std::future::Future;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::{RelayError, SubmitBlocked};
use crate::form::{ContactForm, FieldSet};
use crate::page::Page;

pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Browser metadata captured at the moment of submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientContext {
    pub submitted_at: String,
    pub user_agent: String,
    pub referrer: String,
    pub page: Page,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub fields: FieldSet,
    pub submission_time: String,
    pub user_agent: String,
    pub referrer: String,
    pub current_page: Page,
}

impl SubmissionRecord {
    pub fn collect(form: &ContactForm, context: ClientContext) -> Self {
        Self {
            fields: form.field_set(),
            submission_time: context.submitted_at,
            user_agent: context.user_agent,
            referrer: context.referrer,
            current_page: context.page,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub text: String,
}

/// The external mail relay. One call, two outcomes; no retry and no timeout.
pub trait MailRelay {
    fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        record: &SubmissionRecord,
    ) -> impl Future<Output = Result<RelayResponse, RelayError>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitButton {
    label: String,
    idle_label: String,
    disabled: bool,
    loading: bool,
}

impl SubmitButton {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            idle_label: label.to_string(),
            disabled: false,
            loading: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    fn start_loading(&mut self) {
        self.label = SUBMITTING_LABEL.to_string();
        self.disabled = true;
        self.loading = true;
    }

    fn restore(&mut self) {
        self.label = self.idle_label.clone();
        self.disabled = false;
        self.loading = false;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitPhase {
    /// Succeeded and Failed hand control back; only Submitting blocks.
    pub fn accepts_submit(self) -> bool {
        self != SubmitPhase::Submitting
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered(RelayResponse),
    Failed { notice: String, error: RelayError },
}

#[derive(Clone, Debug)]
pub struct SubmissionWorkflow {
    phase: SubmitPhase,
    button: SubmitButton,
    service_id: String,
    template_id: String,
    failure_notice: String,
}

impl SubmissionWorkflow {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            button: SubmitButton::new(&config.submit_label),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            failure_notice: config.failure_notice(),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Validates the whole form and, if it passes, moves to Submitting and
    /// returns the record to hand to the relay. On failure no relay call
    /// may be made; the name of the first errored field is returned so the
    /// caller can scroll to it.
    pub fn begin(
        &mut self,
        form: &mut ContactForm,
        context: ClientContext,
    ) -> Result<SubmissionRecord, SubmitBlocked> {
        if !self.phase.accepts_submit() {
            return Err(SubmitBlocked::InFlight);
        }
        if !form.validate_all() {
            self.phase = SubmitPhase::Idle;
            let first_error = form.first_error().map(|field| field.name().to_string());
            return Err(SubmitBlocked::Invalid { first_error });
        }
        self.phase = SubmitPhase::Submitting;
        self.button.start_loading();
        Ok(SubmissionRecord::collect(form, context))
    }

    /// Applies the relay's answer to the phase and button only. The form is
    /// left untouched.
    pub fn settle(&mut self, result: Result<RelayResponse, RelayError>) -> SubmitOutcome {
        self.button.restore();
        match result {
            Ok(response) => {
                self.phase = SubmitPhase::Succeeded;
                SubmitOutcome::Delivered(response)
            }
            Err(error) => {
                self.phase = SubmitPhase::Failed;
                SubmitOutcome::Failed {
                    notice: self.failure_notice.clone(),
                    error,
                }
            }
        }
    }

    /// Applies the relay's answer. Success clears the form; failure keeps the
    /// values so nothing has to be typed again.
    pub fn complete(
        &mut self,
        form: &mut ContactForm,
        result: Result<RelayResponse, RelayError>,
    ) -> SubmitOutcome {
        let outcome = self.settle(result);
        if matches!(outcome, SubmitOutcome::Delivered(_)) {
            form.reset();
        }
        outcome
    }

    pub async fn submit<R: MailRelay>(
        &mut self,
        form: &mut ContactForm,
        context: ClientContext,
        relay: &R,
    ) -> Result<SubmitOutcome, SubmitBlocked> {
        let record = self.begin(form, context)?;
        let result = relay
            .send_form(&self.service_id, &self.template_id, &record)
            .await;
        Ok(self.complete(form, result))
    }
}
