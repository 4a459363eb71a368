//! HTTP route handlers.

use axum::Router;

use crate::state::AppState;

pub mod forms;
pub mod health;
pub mod public;

/// All application routes, without middleware layers or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(forms::router())
        .merge(public::router())
        .merge(health::router())
}
