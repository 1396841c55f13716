//! PIN login and session routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use maruzzella_core::engine::authenticate;
use maruzzella_core::model::EmployeeSummary;
use maruzzella_core::types::EmployeeId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user};
use crate::middleware::{CurrentEmployee, clear_current_employee, set_current_employee};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/staff", get(staff))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/me", get(me))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub employee_id: EmployeeId,
    pub pin: String,
}

/// Names for the login picker.
///
/// GET /api/auth/staff
async fn staff(State(state): State<AppState>) -> Json<Vec<EmployeeSummary>> {
    let staff = state
        .controller()
        .read(|s| s.employees.iter().map(EmployeeSummary::from).collect())
        .await;
    Json(staff)
}

/// POST /api/auth/login
#[instrument(skip(state, session, body), fields(employee_id = %body.employee_id))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<EmployeeSummary>, AppError> {
    let employee = state
        .controller()
        .read(|s| authenticate(&s.employees, body.employee_id, &body.pin).map(EmployeeSummary::from))
        .await
        .inspect_err(|_| tracing::info!("Login rejected"))?;

    set_current_employee(&session, employee.id)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(name = %employee.name, "Logged in");
    Ok(Json(employee))
}

/// POST /api/auth/logout
async fn logout(session: Session) -> StatusCode {
    if let Err(e) = clear_current_employee(&session).await {
        tracing::warn!("Failed to clear session: {e}");
    }
    clear_sentry_user();
    StatusCode::NO_CONTENT
}

/// GET /api/me
async fn me(CurrentEmployee(me): CurrentEmployee) -> Json<EmployeeSummary> {
    Json(EmployeeSummary::from(&me))
}
