//! Time clock routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use maruzzella_core::access::{Operation, authorize, clock_scope};
use maruzzella_core::engine::{ClockStatus, DirectoryError, TimeClock, clock_status, find};
use maruzzella_core::format::format_duration;
use maruzzella_core::model::{Employee, EmployeeSummary, StateSnapshot, TimeLog};
use maruzzella_core::types::EmployeeId;
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentEmployee;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/clock", get(index))
        .route("/api/clock/{employee_id}/in", post(clock_in))
        .route("/api/clock/{employee_id}/out", post(clock_out))
}

#[derive(Debug, Serialize)]
pub struct ClockRow {
    pub employee: EmployeeSummary,
    #[serde(flatten)]
    pub status: ClockStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutResponse {
    #[serde(flatten)]
    pub log: TimeLog,
    /// Worked time as "{H}h {M}m".
    pub worked: String,
}

/// GET /api/clock
///
/// Managers see their department, everyone else sees themselves.
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn index(CurrentEmployee(me): CurrentEmployee, State(state): State<AppState>) -> Json<Vec<ClockRow>> {
    let rows = state
        .controller()
        .read(|s| {
            clock_scope(&me, &s.employees)
                .into_iter()
                .map(|e| ClockRow {
                    employee: EmployeeSummary::from(e),
                    status: clock_status(&s.time_logs, e.id),
                })
                .collect()
        })
        .await;
    Json(rows)
}

/// POST /api/clock/{employee_id}/in
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn clock_in(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(target): Path<EmployeeId>,
) -> Result<(StatusCode, Json<TimeLog>), AppError> {
    let log = state
        .controller()
        .mutate(|s| {
            authorize_clock(s, &me, target)?;
            Ok::<_, AppError>(TimeClock::new(&mut s.time_logs).clock_in(target, Utc::now())?)
        })
        .await?;

    tracing::info!(target_id = %target, log_id = %log.id, "Clocked in");
    Ok((StatusCode::CREATED, Json(log)))
}

/// POST /api/clock/{employee_id}/out
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn clock_out(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(target): Path<EmployeeId>,
) -> Result<Json<ClockOutResponse>, AppError> {
    let log = state
        .controller()
        .mutate(|s| {
            authorize_clock(s, &me, target)?;
            Ok::<_, AppError>(TimeClock::new(&mut s.time_logs).clock_out(target, Utc::now())?)
        })
        .await?;

    let worked = format_duration(log.duration_ms().unwrap_or_default());
    tracing::info!(target_id = %target, log_id = %log.id, %worked, "Clocked out");
    Ok(Json(ClockOutResponse { log, worked }))
}

fn authorize_clock(s: &StateSnapshot, me: &Employee, target: EmployeeId) -> Result<(), AppError> {
    let employee = find(&s.employees, target).ok_or(DirectoryError::NotFound(target))?;
    authorize(me, Operation::Clock(target), Some(employee.department))?;
    Ok(())
}
