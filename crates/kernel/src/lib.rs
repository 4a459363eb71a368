//! Quickform Kernel Library
//!
//! Form definitions, submission validation, storage, and CSV export, plus
//! the HTTP routes that expose them. The `quickform` binary runs the server.

pub mod config;
pub mod error;
pub mod form;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
