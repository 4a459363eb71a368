//! Submission validation.
//!
//! Fields are checked in their stored order and the first failure wins.
//! Per-type checks are looked up from a rule table keyed by [`FieldType`],
//! so adding a variant forces a decision about its rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{Field, FieldType, Form, SubmissionValue};

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII digits only; `\d` would also admit other Unicode decimal digits.
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid regex literal")
});

/// Why a submitted value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    Required,
    InvalidEmail,
    InvalidNumber,
    InvalidOption,
}

impl RejectReason {
    /// Machine-readable reason code.
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::Required => "required",
            RejectReason::InvalidEmail => "invalid-email",
            RejectReason::InvalidNumber => "invalid-number",
            RejectReason::InvalidOption => "invalid-option",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            RejectReason::Required => "is required",
            RejectReason::InvalidEmail => "must be a valid email",
            RejectReason::InvalidNumber => "must be a number",
            RejectReason::InvalidOption => "must be one of the allowed options",
        }
    }
}

/// The first field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub field_id: String,
    pub field_label: String,
    pub reason: RejectReason,
}

impl Rejection {
    fn new(field: &Field, reason: RejectReason) -> Self {
        Self {
            field_id: field.id.clone(),
            field_label: field.label.clone(),
            reason,
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}' {}", self.field_label, self.reason.describe())
    }
}

/// Outcome of validating a value set against a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Every field passed. Carries the submitted values, unchanged and complete.
    Accepted(Vec<SubmissionValue>),

    /// Validation stopped at the first failing field.
    Rejected(Rejection),
}

/// Validator behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorOptions {
    /// Reject DROPDOWN values that are not among the field's declared options.
    pub enforce_dropdown_options: bool,
}

/// A single per-type check applied to a present value.
struct TypeRule {
    reason: RejectReason,
    accepts: fn(&Field, &str) -> bool,
}

const EMAIL_RULES: &[TypeRule] = &[TypeRule {
    reason: RejectReason::InvalidEmail,
    accepts: is_email,
}];

const NUMBER_RULES: &[TypeRule] = &[TypeRule {
    reason: RejectReason::InvalidNumber,
    accepts: is_number,
}];

const DROPDOWN_OPTION_RULES: &[TypeRule] = &[TypeRule {
    reason: RejectReason::InvalidOption,
    accepts: is_declared_option,
}];

/// Validates submissions against form definitions.
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    options: ValidatorOptions,
}

impl SubmissionValidator {
    /// Create a validator with the given options.
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Validate `values` against `form`.
    ///
    /// Values that reference unknown fields are ignored here and passed
    /// through in the accepted list.
    pub fn validate(&self, form: &Form, values: &[SubmissionValue]) -> Verdict {
        for field in &form.fields {
            let matched = values.iter().find(|v| v.field_id == field.id);

            if field.required && matched.is_none_or(|v| v.value.trim().is_empty()) {
                return Verdict::Rejected(Rejection::new(field, RejectReason::Required));
            }

            let Some(matched) = matched else {
                continue;
            };

            if let Some(rule) = self
                .rules_for(field.field_type)
                .iter()
                .find(|rule| !(rule.accepts)(field, &matched.value))
            {
                return Verdict::Rejected(Rejection::new(field, rule.reason));
            }
        }

        Verdict::Accepted(values.to_vec())
    }

    fn rules_for(&self, field_type: FieldType) -> &'static [TypeRule] {
        match field_type {
            FieldType::Text | FieldType::Checkbox => &[],
            FieldType::Email => EMAIL_RULES,
            FieldType::Number => NUMBER_RULES,
            FieldType::Dropdown if self.options.enforce_dropdown_options => DROPDOWN_OPTION_RULES,
            FieldType::Dropdown => &[],
        }
    }
}

fn is_email(_field: &Field, value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Blank counts as a number so optional NUMBER fields may be left empty.
fn is_number(_field: &Field, value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NUMBER_PATTERN.is_match(trimmed)
}

fn is_declared_option(field: &Field, value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    match field.options.as_deref() {
        None | Some([]) => true,
        Some(options) => options.iter().any(|o| o == value),
    }
}
