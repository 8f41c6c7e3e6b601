use std::collections::BTreeMap;

use crate::validate::{self, FieldStatus, ValidationResult};

pub const CLASS_OPTIONS: &[&str] = &[
    "Class 6", "Class 7", "Class 8", "Class 9", "Class 10", "Class 11", "Class 12",
];
pub const BOARD_OPTIONS: &[&str] = &["ICSE", "CBSE"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Tel,
    Email,
    Select(&'static [&'static str]),
    TextArea,
}

impl FieldKind {
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Tel => Some("tel"),
            FieldKind::Email => Some("email"),
            FieldKind::Select(_) | FieldKind::TextArea => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

pub const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: validate::NAME_FIELD,
        label: "Full Name",
        kind: FieldKind::Text,
        required: true,
        placeholder: "Student or parent name",
    },
    FieldSpec {
        name: validate::PHONE_FIELD,
        label: "Mobile Number",
        kind: FieldKind::Tel,
        required: true,
        placeholder: "10-digit mobile number",
    },
    FieldSpec {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: false,
        placeholder: "you@example.com",
    },
    FieldSpec {
        name: "studentClass",
        label: "Class",
        kind: FieldKind::Select(CLASS_OPTIONS),
        required: true,
        placeholder: "Select class",
    },
    FieldSpec {
        name: "board",
        label: "Board",
        kind: FieldKind::Select(BOARD_OPTIONS),
        required: true,
        placeholder: "Select board",
    },
    FieldSpec {
        name: "message",
        label: "Message",
        kind: FieldKind::TextArea,
        required: false,
        placeholder: "Subjects, preferred timings, questions",
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    name: String,
    label: String,
    kind: FieldKind,
    required: bool,
    placeholder: String,
    value: String,
    status: FieldStatus,
    message: &'static str,
}

impl FormField {
    pub fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            kind,
            required,
            placeholder: String::new(),
            value: String::new(),
            status: FieldStatus::Valid,
            message: "",
        }
    }

    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            label: spec.label.to_string(),
            placeholder: spec.placeholder.to_string(),
            ..Self::new(spec.name, spec.kind, spec.required)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// True while the field shows its error styling and message.
    pub fn has_error(&self) -> bool {
        self.status != FieldStatus::Valid
    }

    pub fn error_message(&self) -> &'static str {
        self.message
    }

    pub fn error_id(&self) -> String {
        format!("{}-error", self.name)
    }

    fn validate(&mut self) -> ValidationResult {
        let result = validate::validate(&self.name, &self.value, self.required);
        self.status = result.status();
        self.message = result.message();
        result
    }

    fn clear_error(&mut self) {
        self.status = FieldStatus::Valid;
        self.message = "";
    }
}

/// Ordered name/value pairs handed to the mail relay.
pub type FieldSet = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    fields: Vec<FormField>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::from_specs(CONTACT_FIELDS)
    }
}

impl ContactForm {
    pub fn new(fields: impl IntoIterator<Item = FormField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn from_specs(specs: &[FieldSpec]) -> Self {
        Self::new(specs.iter().map(FormField::from_spec))
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(FormField::value)
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let Some(field) = self.field_mut(name) else {
            return false;
        };
        field.value = value.to_string();
        true
    }

    /// Validates one field and updates its error state. Fields that are not
    /// required carry no listeners, so only required fields are checked.
    pub fn validate_field(&mut self, name: &str) -> Option<ValidationResult> {
        let field = self.field_mut(name)?;
        if !field.required {
            return None;
        }
        Some(field.validate())
    }

    /// Keystroke handler: stores the value and re-validates only a field that
    /// is already showing an error.
    pub fn on_input(&mut self, name: &str, value: &str) -> Option<ValidationResult> {
        let field = self.field_mut(name)?;
        field.value = value.to_string();
        if field.required && field.has_error() {
            Some(field.validate())
        } else {
            None
        }
    }

    pub fn on_blur(&mut self, name: &str) -> Option<ValidationResult> {
        self.validate_field(name)
    }

    pub fn on_change(&mut self, name: &str, value: &str) -> Option<ValidationResult> {
        if !self.set_value(name, value) {
            return None;
        }
        self.validate_field(name)
    }

    /// Validates every required field, without stopping at the first
    /// failure, so every errored field gets its message.
    pub fn validate_all(&mut self) -> bool {
        let mut valid = true;
        for field in self.fields.iter_mut().filter(|field| field.required) {
            if !field.validate().valid() {
                valid = false;
            }
        }
        valid
    }

    pub fn first_error(&self) -> Option<&FormField> {
        self.fields.iter().find(|field| field.has_error())
    }

    pub fn first_text_field(&self) -> Option<&FormField> {
        self.fields.iter().find(|field| field.kind == FieldKind::Text)
    }

    pub fn field_set(&self) -> FieldSet {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect()
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
        }
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.clear_error();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_only_revalidates_errored_fields() {
        let mut form = ContactForm::default();
        assert_eq!(form.on_input("fullName", "A"), None);
        assert!(!form.field("fullName").unwrap().has_error());

        let result = form.on_blur("fullName").unwrap();
        assert!(!result.valid());
        assert!(form.field("fullName").unwrap().has_error());

        let result = form.on_input("fullName", "Al").unwrap();
        assert!(result.valid());
        assert!(!form.field("fullName").unwrap().has_error());
    }

    #[test]
    fn optional_fields_are_not_validated() {
        let mut form = ContactForm::default();
        assert_eq!(form.on_change("email", "not-an-email"), None);
        assert_eq!(form.value("email"), Some("not-an-email"));
    }

    #[test]
    fn first_text_field_is_full_name() {
        let form = ContactForm::default();
        assert_eq!(form.first_text_field().map(FormField::name), Some("fullName"));
    }
}
