//! Respondent-facing routes: public form metadata and submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::form::{PublicForm, SubmissionDraft};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub submission_id: String,
}

/// GET /p/{id} — Public projection of a form.
async fn show_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PublicForm>> {
    Ok(Json(state.forms().public_form(&id)?))
}

/// POST /p/{id}/submit — Validate and record a submission.
async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SubmissionDraft>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => {
            state.forms().get_form(&id)?;
            return Err(rejection.into());
        }
    };
    let submission = state.forms().submit(&id, draft.values)?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            submission_id: submission.id,
        }),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/p/{id}", get(show_form))
        .route("/p/{id}/submit", post(submit))
}
