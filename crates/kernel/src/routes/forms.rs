//! Operator API: form definitions, submission listing, and CSV export.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::AppResult;
use crate::form::{Field, FieldDraft, Form, FormDraft, Submission};
use crate::state::AppState;

/// POST /api/forms — Create a form with its initial fields.
async fn create_form(
    State(state): State<AppState>,
    payload: Result<Json<FormDraft>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Form>)> {
    let Json(draft) = payload?;
    let form = state.forms().create_form(draft)?;
    Ok((StatusCode::CREATED, Json(form)))
}

/// GET /api/forms/{id} — Fetch a form definition.
async fn get_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Form>> {
    Ok(Json(state.forms().get_form(&id)?))
}

/// POST /api/forms/{id}/fields — Append a field.
async fn add_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FieldDraft>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Field>)> {
    // An unknown form is reported before a malformed body.
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => {
            state.forms().get_form(&id)?;
            return Err(rejection.into());
        }
    };
    let field = state.forms().add_field(&id, draft)?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// GET /api/forms/{id}/submissions — List submissions, empty for unknown forms.
async fn list_submissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Submission>> {
    Json(state.forms().list_submissions(&id))
}

/// GET /api/forms/{id}/export — Download submissions as CSV.
async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let csv = state.forms().export_csv(&id)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.csv\"",
            ),
        ],
        csv,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/forms", post(create_form))
        .route("/api/forms/{id}", get(get_form))
        .route("/api/forms/{id}/fields", post(add_field))
        .route("/api/forms/{id}/submissions", get(list_submissions))
        .route("/api/forms/{id}/export", get(export_csv))
}
