pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const PHONE_MESSAGE: &str = "Please enter a valid 10-digit mobile number.";
pub const NAME_MESSAGE: &str = "Name should be at least 2 characters long.";

pub const PHONE_FIELD: &str = "phoneNumber";
pub const NAME_FIELD: &str = "fullName";
pub const NAME_MIN_CHARS: usize = 2;
const PHONE_DIGITS: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Valid,
    MissingRequired,
    InvalidFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    status: FieldStatus,
    message: &'static str,
}

impl ValidationResult {
    pub const VALID: ValidationResult = ValidationResult {
        status: FieldStatus::Valid,
        message: "",
    };

    fn missing() -> Self {
        Self {
            status: FieldStatus::MissingRequired,
            message: REQUIRED_MESSAGE,
        }
    }

    fn format(message: &'static str) -> Self {
        Self {
            status: FieldStatus::InvalidFormat,
            message,
        }
    }

    pub fn valid(&self) -> bool {
        self.status == FieldStatus::Valid
    }

    pub fn status(&self) -> FieldStatus {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// A format check applied to a trimmed, non-empty value. `Err` carries the
/// message shown next to the field.
pub type FieldRule = fn(&str) -> Result<(), &'static str>;

const FIELD_RULES: &[(&str, FieldRule)] = &[(PHONE_FIELD, check_mobile), (NAME_FIELD, check_name)];

pub fn rule_for(field_name: &str) -> Option<FieldRule> {
    FIELD_RULES
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, rule)| *rule)
}

pub fn validate(field_name: &str, raw_value: &str, required: bool) -> ValidationResult {
    let value = raw_value.trim();
    if value.is_empty() {
        return if required {
            ValidationResult::missing()
        } else {
            ValidationResult::VALID
        };
    }
    match rule_for(field_name).map(|rule| rule(value)) {
        Some(Err(message)) => ValidationResult::format(message),
        _ => ValidationResult::VALID,
    }
}

/// Indian mobile numbers: ten digits, leading 6-9.
pub fn is_valid_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == PHONE_DIGITS
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}

fn check_mobile(value: &str) -> Result<(), &'static str> {
    if is_valid_mobile(value) {
        Ok(())
    } else {
        Err(PHONE_MESSAGE)
    }
}

fn check_name(value: &str) -> Result<(), &'static str> {
    if value.chars().count() >= NAME_MIN_CHARS {
        Ok(())
    } else {
        Err(NAME_MESSAGE)
    }
}
