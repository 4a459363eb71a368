//! Form service tying registry, validation, storage, and export together.

use chrono::Utc;
use tracing::{debug, info};

use super::error::{FormError, FormResult};
use super::export::{CsvExporter, QuoteStyle};
use super::registry::{FormRegistry, new_id};
use super::store::SubmissionStore;
use super::types::{Field, FieldDraft, Form, FormDraft, PublicForm, Submission, SubmissionValue};
use super::validation::{SubmissionValidator, ValidatorOptions, Verdict};

/// Options controlling validation and export behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormServiceOptions {
    pub validator: ValidatorOptions,
    pub quote_style: QuoteStyle,
}

/// Form service for managing forms and their submissions.
#[derive(Debug, Default)]
pub struct FormService {
    registry: FormRegistry,
    store: SubmissionStore,
    validator: SubmissionValidator,
    exporter: CsvExporter,
}

impl FormService {
    /// Create a new form service.
    pub fn new(options: FormServiceOptions) -> Self {
        Self {
            registry: FormRegistry::new(),
            store: SubmissionStore::new(),
            validator: SubmissionValidator::new(options.validator),
            exporter: CsvExporter::new(options.quote_style),
        }
    }

    /// Create a form with its initial fields.
    pub fn create_form(&self, draft: FormDraft) -> FormResult<Form> {
        let form = self.registry.create_form(draft)?;
        info!(form_id = %form.id, fields = form.fields.len(), "form created");
        Ok(form)
    }

    /// Get a form by identifier.
    pub fn get_form(&self, form_id: &str) -> FormResult<Form> {
        self.registry.get_form(form_id)
    }

    /// Append a field to a form.
    pub fn add_field(&self, form_id: &str, draft: FieldDraft) -> FormResult<Field> {
        let field = self.registry.add_field(form_id, draft)?;
        info!(form_id = %form_id, field_id = %field.id, "field added");
        Ok(field)
    }

    /// Get the respondent-facing projection of a form.
    pub fn public_form(&self, form_id: &str) -> FormResult<PublicForm> {
        Ok(self.registry.get_form(form_id)?.public())
    }

    /// Validate and record a submission.
    ///
    /// On rejection nothing is stored.
    pub fn submit(&self, form_id: &str, values: Vec<SubmissionValue>) -> FormResult<Submission> {
        let form = self.registry.get_form(form_id)?;

        let values = match self.validator.validate(&form, &values) {
            Verdict::Accepted(values) => values,
            Verdict::Rejected(rejection) => {
                debug!(
                    form_id = %form_id,
                    field_id = %rejection.field_id,
                    reason = rejection.reason.code(),
                    "submission rejected"
                );
                return Err(FormError::ValidationFailed(rejection));
            }
        };

        let submission = Submission {
            id: new_id(),
            form_id: form.id.clone(),
            created_at: Utc::now(),
            values,
        };
        self.store.append(&form.id, submission.clone());
        info!(form_id = %form.id, submission_id = %submission.id, "submission accepted");
        Ok(submission)
    }

    /// List a form's submissions in arrival order.
    ///
    /// Unknown forms have no submissions, which is not an error.
    pub fn list_submissions(&self, form_id: &str) -> Vec<Submission> {
        self.store.list_by_form(form_id)
    }

    /// Export a form's submissions as CSV.
    pub fn export_csv(&self, form_id: &str) -> FormResult<String> {
        let form = self.registry.get_form(form_id)?;
        let submissions = self.store.list_by_form(form_id);
        debug!(form_id = %form_id, rows = submissions.len(), "exporting submissions");
        Ok(self.exporter.export(&form, &submissions))
    }

    /// Number of registered forms.
    pub fn form_count(&self) -> usize {
        self.registry.len()
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::form::{FieldType, RejectReason};

    fn service_with_form() -> (FormService, Form) {
        let service = FormService::default();
        let form = service
            .create_form(
                FormDraft::new("T")
                    .field(FieldDraft::new("Name", FieldType::Text).required())
                    .field(FieldDraft::new("Age", FieldType::Number)),
            )
            .unwrap();
        (service, form)
    }

    #[test]
    fn test_new_form_has_no_submissions() {
        let (service, form) = service_with_form();
        assert!(service.list_submissions(&form.id).is_empty());
    }

    #[test]
    fn test_accepted_submission_is_logged_and_exported() {
        let (service, form) = service_with_form();
        let name = &form.fields[0].id;
        let age = &form.fields[1].id;

        let submission = service
            .submit(
                &form.id,
                vec![SubmissionValue::new(name, "Ann"), SubmissionValue::new(age, "30")],
            )
            .unwrap();

        let log = service.list_submissions(&form.id);
        assert_eq!(log, vec![submission.clone()]);

        let csv = service.export_csv(&form.id).unwrap();
        let lines: Vec<_> = csv.split('\n').collect();
        assert_eq!(lines[0], "submissionId,createdAt,Name,Age");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(&format!("{},", submission.id)));
        assert!(lines[1].ends_with(",\"Ann\",\"30\""));
    }

    #[test]
    fn test_rejected_submission_is_not_logged() {
        let (service, form) = service_with_form();
        let age = &form.fields[1].id;

        let err = service
            .submit(&form.id, vec![SubmissionValue::new(age, "30")])
            .unwrap_err();
        match err {
            FormError::ValidationFailed(rejection) => {
                assert_eq!(rejection.field_label, "Name");
                assert_eq!(rejection.reason, RejectReason::Required);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(service.list_submissions(&form.id).is_empty());
    }

    #[test]
    fn test_unknown_form() {
        let service = FormService::default();
        assert!(matches!(
            service.submit("nope", Vec::new()),
            Err(FormError::NotFound(_))
        ));
        assert!(matches!(service.export_csv("nope"), Err(FormError::NotFound(_))));
        assert!(matches!(service.public_form("nope"), Err(FormError::NotFound(_))));
        assert!(service.list_submissions("nope").is_empty());
    }

    #[test]
    fn test_added_field_extends_export_header() {
        let (service, form) = service_with_form();
        service
            .add_field(&form.id, FieldDraft::new("Email", FieldType::Email).order(0))
            .unwrap();
        let csv = service.export_csv(&form.id).unwrap();
        assert_eq!(csv, "submissionId,createdAt,Name,Age,Email");
    }
}
