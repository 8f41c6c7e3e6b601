pub mod config;
pub mod debounce;
pub mod error;
pub mod form;
pub mod menu;
pub mod modal;
pub mod page;
pub mod site;
pub mod submission;
pub mod track;
pub mod validate;

pub use config::SiteConfig;
pub use debounce::Debouncer;
pub use error::{ConfigError, RelayError, SubmitBlocked, UnknownPage};
pub use form::{ContactForm, FieldKind, FieldSet, FieldSpec, FormField, CONTACT_FIELDS};
pub use menu::{MobileMenu, MOBILE_BREAKPOINT_PX};
pub use modal::{SuccessModal, SUCCESS_MODAL_ID};
pub use page::{Page, ViewChange, ViewState};
pub use site::SiteState;
pub use submission::{
    ClientContext, MailRelay, RelayResponse, SubmissionRecord, SubmissionWorkflow, SubmitButton,
    SubmitOutcome, SubmitPhase,
};
pub use track::{Clock, EventSink, MemorySink, RuntimeError, Tracker, TrackingEvent};
pub use validate::{validate, FieldStatus, ValidationResult};
