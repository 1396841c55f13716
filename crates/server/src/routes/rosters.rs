//! Roster routes: shift CRUD, recurring shifts, bulk edits, copy week and
//! the roster grid export.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post, put},
};
use chrono::Local;
use maruzzella_core::access::{Operation, authorize};
use maruzzella_core::engine::ShiftRef;
use maruzzella_core::export::{roster_csv, roster_filename};
use maruzzella_core::model::{DayOfWeek, Roster, Shift, ShiftDraft};
use maruzzella_core::types::WallTime;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{csv_download, parse_day, parse_week};
use crate::error::AppError;
use crate::middleware::CurrentEmployee;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/rosters/copy", post(copy_week))
        .route("/api/rosters/{week}", get(show))
        .route("/api/rosters/{week}/recurring", post(add_recurring))
        .route("/api/rosters/{week}/bulk", post(bulk_edit))
        .route("/api/rosters/{week}/export.csv", get(export_csv))
        .route("/api/rosters/{week}/{day}", post(add))
        .route("/api/rosters/{week}/{day}/{index}", put(edit).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct RecurringRequest {
    pub shift: ShiftDraft,
    pub days: Vec<DayOfWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditRequest {
    pub selection: Vec<ShiftRef>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// GET /api/rosters/{week}
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn show(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> Result<Json<Roster>, AppError> {
    authorize(&me, Operation::ViewRoster, None)?;
    let week = parse_week(&week)?;
    let roster = state.controller().read(|s| s.rosters.week(week).clone()).await;
    Ok(Json(roster))
}

/// POST /api/rosters/{week}/{day}
#[instrument(skip(state, me, draft), fields(employee_id = %me.id))]
async fn add(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path((week, day)): Path<(String, String)>,
    Json(draft): Json<ShiftDraft>,
) -> Result<(StatusCode, Json<Shift>), AppError> {
    authorize(&me, Operation::EditRoster, None)?;
    let (week, day) = (parse_week(&week)?, parse_day(&day)?);
    let shift = draft.into_shift()?;

    state
        .controller()
        .mutate(|s| s.rosters.add_shift(week, day, shift.clone()))
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

/// PUT /api/rosters/{week}/{day}/{index}
#[instrument(skip(state, me, draft), fields(employee_id = %me.id))]
async fn edit(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path((week, day, index)): Path<(String, String, usize)>,
    Json(draft): Json<ShiftDraft>,
) -> Result<Json<Shift>, AppError> {
    authorize(&me, Operation::EditRoster, None)?;
    let (week, day) = (parse_week(&week)?, parse_day(&day)?);
    let shift = draft.into_shift()?;

    state
        .controller()
        .mutate(|s| s.rosters.edit_shift(week, day, index, shift.clone()))
        .await?;

    Ok(Json(shift))
}

/// DELETE /api/rosters/{week}/{day}/{index}
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn remove(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path((week, day, index)): Path<(String, String, usize)>,
) -> Result<Json<Shift>, AppError> {
    authorize(&me, Operation::EditRoster, None)?;
    let (week, day) = (parse_week(&week)?, parse_day(&day)?);

    let removed = state
        .controller()
        .mutate(|s| s.rosters.delete_shift(week, day, index))
        .await?;

    Ok(Json(removed))
}

/// POST /api/rosters/{week}/recurring
#[instrument(skip(state, me, body), fields(employee_id = %me.id))]
async fn add_recurring(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(week): Path<String>,
    Json(body): Json<RecurringRequest>,
) -> Result<(StatusCode, Json<CountResponse>), AppError> {
    authorize(&me, Operation::EditRoster, None)?;
    let week = parse_week(&week)?;
    let shift = body.shift.into_shift()?;

    let count = state
        .controller()
        .mutate(|s| s.rosters.add_recurring_shift(week, &shift, &body.days))
        .await?;

    Ok((StatusCode::CREATED, Json(CountResponse { count })))
}

/// POST /api/rosters/{week}/bulk
///
/// Either time may be omitted; every selected shift is validated before any
/// is changed.
#[instrument(skip(state, me, body), fields(employee_id = %me.id))]
async fn bulk_edit(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(week): Path<String>,
    Json(body): Json<BulkEditRequest>,
) -> Result<Json<CountResponse>, AppError> {
    authorize(&me, Operation::EditRoster, None)?;
    let week = parse_week(&week)?;
    let start = WallTime::parse_optional(body.start_time.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let end = WallTime::parse_optional(body.end_time.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let count = state
        .controller()
        .mutate(|s| s.rosters.bulk_edit_times(week, &body.selection, start, end))
        .await?;

    Ok(Json(CountResponse { count }))
}

/// POST /api/rosters/copy
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn copy_week(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    authorize(&me, Operation::EditRoster, None)?;

    state
        .controller()
        .mutate(|s| {
            s.rosters.copy_week();
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!("Copied this week's roster to next week");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/rosters/{week}/export.csv
///
/// One row per employee of the caller's department.
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn export_csv(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> Result<Response, AppError> {
    authorize(&me, Operation::ViewRoster, None)?;
    let week = parse_week(&week)?;

    let body = state
        .controller()
        .read(|s| {
            let staff: Vec<_> = s
                .employees
                .iter()
                .filter(|e| e.department == me.department)
                .cloned()
                .collect();
            roster_csv(s.rosters.week(week), &staff)
        })
        .await?;

    let filename = roster_filename(week, Local::now().date_naive());
    Ok(csv_download(&filename, body))
}
