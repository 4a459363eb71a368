//! Form engine: definitions, submission validation, storage, and CSV export.
//!
//! - [`FormRegistry`] owns form and field definitions and assigns identifiers
//! - [`SubmissionValidator`] accepts or rejects a value set, first failure wins
//! - [`SubmissionStore`] keeps an append-only log of accepted submissions per form
//! - [`CsvExporter`] renders a log as CSV in field append order
//!
//! [`FormService`] wires these together for the HTTP layer.

mod error;
mod export;
mod registry;
mod service;
mod store;
mod types;
mod validation;

pub use error::{FormError, FormResult};
pub use export::{CsvExporter, QuoteStyle};
pub use registry::FormRegistry;
pub use service::{FormService, FormServiceOptions};
pub use store::SubmissionStore;
pub use types::{
    Field, FieldDraft, FieldType, Form, FormDraft, PublicForm, Submission, SubmissionDraft,
    SubmissionValue, format_timestamp,
};
pub use validation::{RejectReason, Rejection, SubmissionValidator, ValidatorOptions, Verdict};
