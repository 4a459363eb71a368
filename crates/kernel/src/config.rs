//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, anyhow};

use crate::form::QuoteStyle;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 4000).
    pub port: u16,

    /// CORS allowed origins (comma-separated, default: "http://localhost:5173").
    /// A single "*" allows any origin.
    pub cors_allowed_origins: Vec<String>,

    /// Reject DROPDOWN values outside the field's declared options (default: false).
    pub enforce_dropdown_options: bool,

    /// Quoting used for CSV field cells: "literal" (default) or "rfc4180".
    pub csv_quote_style: QuoteStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            enforce_dropdown_options: false,
            csv_quote_style: QuoteStyle::Literal,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>().context("PORT must be a valid u16")?,
            Err(_) => defaults.port,
        };

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allowed_origins);

        let enforce_dropdown_options = match env::var("ENFORCE_DROPDOWN_OPTIONS") {
            Ok(v) => parse_bool(&v).context("ENFORCE_DROPDOWN_OPTIONS must be a boolean")?,
            Err(_) => defaults.enforce_dropdown_options,
        };

        let csv_quote_style = match env::var("CSV_QUOTE_STYLE") {
            Ok(v) => v
                .parse::<QuoteStyle>()
                .map_err(|e: String| anyhow!(e))
                .context("CSV_QUOTE_STYLE must be \"literal\" or \"rfc4180\"")?,
            Err(_) => defaults.csv_quote_style,
        };

        Ok(Self {
            port,
            cors_allowed_origins,
            enforce_dropdown_options,
            csv_quote_style,
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("unrecognized boolean '{other}'")),
    }
}
