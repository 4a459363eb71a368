//! Application state shared across all handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::form::{FormService, FormServiceOptions, ValidatorOptions};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Constructed once at startup
/// and handed to every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Form definitions, submissions, and export.
    forms: FormService,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: &Config) -> Self {
        let options = FormServiceOptions {
            validator: ValidatorOptions {
                enforce_dropdown_options: config.enforce_dropdown_options,
            },
            quote_style: config.csv_quote_style,
        };

        info!(
            enforce_dropdown_options = config.enforce_dropdown_options,
            csv_quote_style = ?config.csv_quote_style,
            "form service initialized"
        );

        Self {
            inner: Arc::new(AppStateInner {
                forms: FormService::new(options),
            }),
        }
    }

    /// Get the form service.
    pub fn forms(&self) -> &FormService {
        &self.inner.forms
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("forms", &self.inner.forms.form_count())
            .finish()
    }
}
