//! Form registry.
//!
//! Owns form and field definitions for the lifetime of the process and
//! assigns their identifiers.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use super::error::{FormError, FormResult};
use super::types::{Field, FieldDraft, Form, FormDraft};

/// In-memory registry of form definitions.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: DashMap<String, Form>,
}

impl FormRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form from a draft.
    ///
    /// Field drafts without an explicit `order` get their position in the
    /// draft list.
    pub fn create_form(&self, draft: FormDraft) -> FormResult<Form> {
        if draft.title.is_empty() {
            return Err(FormError::InvalidInput("title must not be empty".to_string()));
        }
        for (index, field) in draft.fields.iter().enumerate() {
            check_field_draft(field).map_err(|e| match e {
                FormError::InvalidInput(msg) => {
                    FormError::InvalidInput(format!("fields[{index}].{msg}"))
                }
                other => other,
            })?;
        }

        let id = new_id();
        let fields = draft
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| materialize(&id, field, position(index)))
            .collect();

        let form = Form {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            created_at: Utc::now(),
            fields,
        };

        self.forms.insert(id, form.clone());
        debug!(form_id = %form.id, fields = form.fields.len(), "form registered");
        Ok(form)
    }

    /// Get a form by identifier.
    pub fn get_form(&self, form_id: &str) -> FormResult<Form> {
        self.forms
            .get(form_id)
            .map(|f| f.clone())
            .ok_or_else(|| FormError::NotFound(form_id.to_string()))
    }

    /// Append a field to an existing form.
    ///
    /// Without an explicit `order` the field gets the current field count.
    pub fn add_field(&self, form_id: &str, draft: FieldDraft) -> FormResult<Field> {
        let mut form = self
            .forms
            .get_mut(form_id)
            .ok_or_else(|| FormError::NotFound(form_id.to_string()))?;

        check_field_draft(&draft)?;

        let field = materialize(form_id, draft, position(form.fields.len()));
        form.fields.push(field.clone());
        debug!(form_id = %form_id, field_id = %field.id, "field appended");
        Ok(field)
    }

    /// Number of registered forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Whether no forms are registered.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Generate a fresh opaque identifier.
pub(crate) fn new_id() -> String {
    Uuid::now_v7().to_string()
}

fn position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn check_field_draft(draft: &FieldDraft) -> FormResult<()> {
    if draft.label.is_empty() {
        return Err(FormError::InvalidInput("label must not be empty".to_string()));
    }
    Ok(())
}

fn materialize(form_id: &str, draft: FieldDraft, default_order: u32) -> Field {
    Field {
        id: new_id(),
        form_id: form_id.to_string(),
        label: draft.label,
        field_type: draft.field_type,
        required: draft.required.unwrap_or(false),
        order: draft.order.unwrap_or(default_order),
        options: draft.options,
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::form::FieldType;

    #[test]
    fn test_create_form_materializes_fields() {
        let registry = FormRegistry::new();
        let form = registry
            .create_form(
                FormDraft::new("Survey")
                    .description("Quarterly")
                    .field(FieldDraft::new("Name", FieldType::Text).required())
                    .field(FieldDraft::new("Age", FieldType::Number))
                    .field(FieldDraft::new("Color", FieldType::Dropdown).order(7).options(["Red"])),
            )
            .unwrap();

        assert_eq!(form.title, "Survey");
        assert_eq!(form.description.as_deref(), Some("Quarterly"));
        assert_eq!(form.fields.len(), 3);
        assert!(form.fields.iter().all(|f| f.form_id == form.id));
        assert!(form.fields[0].required);
        assert!(!form.fields[1].required);
        assert_eq!(form.fields[0].order, 0);
        assert_eq!(form.fields[1].order, 1);
        assert_eq!(form.fields[2].order, 7);
        assert_eq!(form.fields[2].options, Some(vec!["Red".to_string()]));

        let ids: HashSet<_> = form.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), 3);

        assert_eq!(registry.get_form(&form.id).unwrap(), form);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_form_rejects_bad_drafts() {
        let registry = FormRegistry::new();

        let err = registry.create_form(FormDraft::new("")).unwrap_err();
        assert!(matches!(err, FormError::InvalidInput(_)));

        let err = registry
            .create_form(
                FormDraft::new("T")
                    .field(FieldDraft::new("Ok", FieldType::Text))
                    .field(FieldDraft::new("", FieldType::Text)),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "fields[1].label must not be empty");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_form_not_found() {
        let registry = FormRegistry::new();
        assert!(matches!(
            registry.get_form("missing"),
            Err(FormError::NotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_add_field_appends_with_count_order() {
        let registry = FormRegistry::new();
        let form = registry
            .create_form(FormDraft::new("T").field(FieldDraft::new("A", FieldType::Text)))
            .unwrap();

        let field = registry
            .add_field(&form.id, FieldDraft::new("B", FieldType::Email))
            .unwrap();
        assert_eq!(field.order, 1);
        assert_eq!(field.form_id, form.id);

        let stored = registry.get_form(&form.id).unwrap();
        assert_eq!(stored.fields.len(), 2);
        assert_eq!(stored.fields[1], field);
    }

    #[test]
    fn test_add_field_errors() {
        let registry = FormRegistry::new();
        assert!(matches!(
            registry.add_field("missing", FieldDraft::new("A", FieldType::Text)),
            Err(FormError::NotFound(_))
        ));

        let form = registry.create_form(FormDraft::new("T")).unwrap();
        assert!(matches!(
            registry.add_field(&form.id, FieldDraft::new("", FieldType::Text)),
            Err(FormError::InvalidInput(_))
        ));
        assert!(registry.get_form(&form.id).unwrap().fields.is_empty());
    }
}
