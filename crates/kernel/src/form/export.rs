//! CSV export of a form's submissions.
//!
//! Columns are `submissionId`, `createdAt`, then one per field in the form's
//! append order. The field `order` attribute does not affect column order.

use std::str::FromStr;

use serde_json::Value;

use super::types::{Form, Submission, format_timestamp};

/// How field cells are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    /// String-literal quoting: wrap in `"` and backslash-escape, as in JSON.
    /// Commas inside the value are left as-is.
    #[default]
    Literal,

    /// RFC 4180 quoting: wrap in `"` and double internal quotes.
    Rfc4180,
}

impl FromStr for QuoteStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" | "json" => Ok(QuoteStyle::Literal),
            "rfc4180" | "csv" => Ok(QuoteStyle::Rfc4180),
            other => Err(format!("unknown CSV quote style '{other}'")),
        }
    }
}

/// Renders submission logs as CSV text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter {
    quote_style: QuoteStyle,
}

impl CsvExporter {
    /// Create an exporter with the given quoting.
    pub fn new(quote_style: QuoteStyle) -> Self {
        Self { quote_style }
    }

    /// Render `submissions` against `form`.
    ///
    /// Rows are joined with `\n` and there is no trailing newline.
    pub fn export(&self, form: &Form, submissions: &[Submission]) -> String {
        let mut lines = Vec::with_capacity(submissions.len() + 1);
        lines.push(self.header(form));

        for submission in submissions {
            let mut cells = Vec::with_capacity(form.fields.len() + 2);
            cells.push(submission.id.clone());
            cells.push(format_timestamp(&submission.created_at));
            for field in &form.fields {
                cells.push(self.quote(submission.value_for(&field.id).unwrap_or("")));
            }
            lines.push(cells.join(","));
        }

        lines.join("\n")
    }

    fn header(&self, form: &Form) -> String {
        let mut columns = vec!["submissionId".to_string(), "createdAt".to_string()];
        columns.extend(form.fields.iter().map(|f| match self.quote_style {
            QuoteStyle::Literal => f.label.clone(),
            QuoteStyle::Rfc4180 if needs_rfc_quoting(&f.label) => rfc4180_quote(&f.label),
            QuoteStyle::Rfc4180 => f.label.clone(),
        }));
        columns.join(",")
    }

    fn quote(&self, value: &str) -> String {
        match self.quote_style {
            QuoteStyle::Literal => literal_quote(value),
            QuoteStyle::Rfc4180 => rfc4180_quote(value),
        }
    }
}

fn literal_quote(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn rfc4180_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn needs_rfc_quoting(value: &str) -> bool {
    value.contains([',', '"', '\n', '\r'])
}
