//! Raw state endpoints: the whole blob in and out.

use axum::{Json, Router, extract::State, routing::get};
use maruzzella_core::access::{Operation, authorize};
use maruzzella_core::model::StateSnapshot;
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentEmployee;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/state", get(get_state).post(replace_state))
}

/// GET /api/state
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn get_state(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
) -> Result<Json<StateSnapshot>, AppError> {
    authorize(&me, Operation::RawState, None)?;
    Ok(Json(state.controller().snapshot().await))
}

/// POST /api/state
///
/// Sections missing from the body keep their current value, as does an empty
/// staff list. Any malformed or inconsistent section rejects the whole body.
#[instrument(skip(state, me, body), fields(employee_id = %me.id))]
async fn replace_state(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<StateSnapshot>, AppError> {
    authorize(&me, Operation::RawState, None)?;

    let snapshot = state
        .controller()
        .mutate(|s| {
            let applied = s.replace_sections(&body)?;
            tracing::info!(?applied, "State overwritten");
            Ok::<_, AppError>(s.clone())
        })
        .await?;

    Ok(Json(snapshot))
}
