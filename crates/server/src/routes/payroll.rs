//! Payroll routes: totals, approvals, manual corrections, merge and CSV.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{delete, get, post, put},
};
use chrono::{Local, Utc};
use maruzzella_core::access::{Operation, authorize};
use maruzzella_core::engine::{Decision, HourTotals, ManualLog, Payroll, PayrollError, find, summarize};
use maruzzella_core::export::{payroll_csv, payroll_filename};
use maruzzella_core::format::{format_duration, format_hours_decimal};
use maruzzella_core::model::{Employee, EmployeeSummary, StateSnapshot, TimeLog};
use maruzzella_core::types::{EmployeeId, TimeLogId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::csv_download;
use crate::error::AppError;
use crate::middleware::CurrentEmployee;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/payroll", get(index))
        .route("/api/payroll/export.csv", get(export_csv))
        .route("/api/payroll/logs", post(upsert_log))
        .route("/api/payroll/logs/merge", post(merge_logs))
        .route("/api/payroll/logs/{id}", delete(delete_log))
        .route("/api/payroll/logs/{id}/status", put(set_status))
}

/// One employee's payroll line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayLine {
    pub employee: EmployeeSummary,
    pub totals: HourTotals,
    pub approved_hours: String,
    pub pending_hours: String,
    pub rejected_hours: String,
    pub approved: String,
    pub logs: Vec<TimeLog>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Decision,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub time_logs: Vec<TimeLog>,
}

#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub added: usize,
    pub skipped: usize,
}

/// GET /api/payroll
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn index(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
) -> Result<Json<Vec<PayLine>>, AppError> {
    authorize(&me, Operation::Payroll, Some(me.department))?;

    let lines = state
        .controller()
        .read(|s| {
            summarize(&s.employees, &s.time_logs, me.department)
                .into_iter()
                .map(|line| PayLine {
                    employee: EmployeeSummary::from(line.employee),
                    totals: line.totals,
                    approved_hours: format_hours_decimal(line.totals.approved_ms),
                    pending_hours: format_hours_decimal(line.totals.pending_ms),
                    rejected_hours: format_hours_decimal(line.totals.rejected_ms),
                    approved: format_duration(line.totals.approved_ms),
                    logs: line.logs.into_iter().cloned().collect(),
                })
                .collect()
        })
        .await;
    Ok(Json(lines))
}

/// POST /api/payroll/logs
///
/// Creates a log when `id` is absent or zero, otherwise overwrites it.
#[instrument(skip(state, me, manual), fields(employee_id = %me.id))]
async fn upsert_log(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Json(manual): Json<ManualLog>,
) -> Result<Json<TimeLog>, AppError> {
    let log = state
        .controller()
        .mutate(|s| {
            let target = find(&s.employees, manual.employee_id)
                .ok_or_else(|| AppError::NotFound(format!("employee {} not found", manual.employee_id)))?;
            authorize(&me, Operation::Payroll, Some(target.department))?;
            if let Some(id) = manual.id.filter(|id| id.as_i64() != 0) {
                authorize_log(s, &me, id)?;
            }
            Ok::<_, AppError>(Payroll::new(&mut s.time_logs).upsert_manual_log(manual, Utc::now())?)
        })
        .await?;

    tracing::info!(log_id = %log.id, target_id = %log.employee_id, "Time log saved");
    Ok(Json(log))
}

/// PUT /api/payroll/logs/{id}/status
#[instrument(skip(state, me, body), fields(employee_id = %me.id))]
async fn set_status(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(id): Path<TimeLogId>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<TimeLog>, AppError> {
    let log = state
        .controller()
        .mutate(|s| {
            authorize_log(s, &me, id)?;
            Ok::<_, AppError>(Payroll::new(&mut s.time_logs).set_status(id, body.status)?)
        })
        .await?;

    tracing::info!(log_id = %id, status = ?body.status, "Time log reviewed");
    Ok(Json(log))
}

/// DELETE /api/payroll/logs/{id}
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn delete_log(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(id): Path<TimeLogId>,
) -> Result<StatusCode, AppError> {
    state
        .controller()
        .mutate(|s| {
            authorize_log(s, &me, id)?;
            Ok::<_, AppError>(Payroll::new(&mut s.time_logs).delete_log(id)?)
        })
        .await?;

    tracing::info!(log_id = %id, "Time log deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/payroll/logs/merge
///
/// Logs of employees outside the caller's department are skipped.
#[instrument(skip(state, me, body), fields(employee_id = %me.id, incoming = body.time_logs.len()))]
async fn merge_logs(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Json(body): Json<MergeRequest>,
) -> Result<Json<MergeResponse>, AppError> {
    authorize(&me, Operation::Payroll, Some(me.department))?;
    let incoming = body.time_logs.len();

    let added = state
        .controller()
        .mutate(|s| {
            let own: Vec<TimeLog> = body
                .time_logs
                .into_iter()
                .filter(|log| in_department(&s.employees, log.employee_id, &me))
                .collect();
            Ok::<_, AppError>(Payroll::new(&mut s.time_logs).merge_logs(own))
        })
        .await?;

    tracing::info!(added, "Time logs merged");
    Ok(Json(MergeResponse {
        added,
        skipped: incoming - added,
    }))
}

/// GET /api/payroll/export.csv
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn export_csv(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    authorize(&me, Operation::Payroll, Some(me.department))?;

    let body = state
        .controller()
        .read(|s| payroll_csv(&summarize(&s.employees, &s.time_logs, me.department)))
        .await?;

    let filename = payroll_filename(Local::now().date_naive());
    Ok(csv_download(&filename, body))
}

/// Check `me` may act on log `id`.
///
/// Logs of deleted employees fall to any payroll manager.
fn authorize_log(s: &StateSnapshot, me: &Employee, id: TimeLogId) -> Result<(), AppError> {
    let log = s
        .time_logs
        .iter()
        .find(|log| log.id == id)
        .ok_or(PayrollError::LogNotFound(id))?;
    let department = find(&s.employees, log.employee_id).map_or(me.department, |e| e.department);
    authorize(me, Operation::Payroll, Some(department))?;
    Ok(())
}

fn in_department(employees: &[Employee], id: EmployeeId, me: &Employee) -> bool {
    find(employees, id).is_some_and(|e| e.department == me.department)
}
