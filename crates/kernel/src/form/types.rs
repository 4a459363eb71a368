//! Form, field, and submission types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Input type of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Base-10 integer or decimal.
    Number,
    /// `local@domain.tld`-shaped address.
    Email,
    /// One choice from a list of options.
    Dropdown,
    /// Opaque checkbox value.
    Checkbox,
}

impl FieldType {
    /// Get the wire name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Email => "EMAIL",
            FieldType::Dropdown => "DROPDOWN",
            FieldType::Checkbox => "CHECKBOX",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form definition with its fields in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Opaque form identifier.
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,

    /// Fields in the order they were added. This is also the export column order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Form {
    /// Project the form into the shape served to respondents.
    pub fn public(&self) -> PublicForm {
        PublicForm {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// A single typed input slot on a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Identifier, unique within the owning form.
    pub id: String,

    pub form_id: String,

    pub label: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub required: bool,

    /// Display hint. Not unique and not used for export ordering.
    #[serde(default)]
    pub order: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Field payload as submitted by an operator, before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDraft {
    pub label: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub required: Option<bool>,

    #[serde(default)]
    pub order: Option<u32>,

    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl FieldDraft {
    /// Create a draft with the given label and type.
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            field_type,
            required: None,
            order: None,
            options: None,
        }
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Set the display order hint.
    pub fn order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the option list.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Form payload as submitted by an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

impl FormDraft {
    /// Create a draft with the given title and no fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field draft.
    pub fn field(mut self, field: FieldDraft) -> Self {
        self.fields.push(field);
        self
    }
}

/// Public projection of a form, served to respondents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicForm {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

/// One value in a submission, keyed by field identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionValue {
    /// Field reference. May name a field the form does not have.
    pub field_id: String,
    pub value: String,
}

impl SubmissionValue {
    pub fn new(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
        }
    }
}

/// One respondent's accepted value set. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub form_id: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub values: Vec<SubmissionValue>,
}

impl Submission {
    /// Value recorded for `field_id`. When the field is referenced more than
    /// once, the last reference wins.
    pub fn value_for(&self, field_id: &str) -> Option<&str> {
        self.values
            .iter()
            .rfind(|v| v.field_id == field_id)
            .map(|v| v.value.as_str())
    }
}

/// Submission payload as posted by a respondent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub values: Vec<SubmissionValue>,
}

/// Render a timestamp as ISO-8601 UTC with millisecond precision.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter keeping JSON timestamps in the same shape as CSV ones.
mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
