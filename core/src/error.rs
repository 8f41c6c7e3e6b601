#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("mail relay unavailable: {0}")]
    Unavailable(String),
    #[error("mail relay rejected the submission (status {status}): {text}")]
    Rejected { status: u16, text: String },
    #[error("mail relay call failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("form has invalid fields")]
    Invalid { first_error: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page '{0}'")]
pub struct UnknownPage(pub String);
