//! Employee management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use maruzzella_core::access::{Operation, authorize};
use maruzzella_core::engine::{Directory, DirectoryError, find};
use maruzzella_core::model::{EmployeeDraft, EmployeeSummary};
use maruzzella_core::types::{Department, EmployeeId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentEmployee;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(index).post(create))
        .route("/api/employees/{id}", put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Defaults to the caller's own department.
    pub department: Option<String>,
}

/// Response for a deleted employee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalResponse {
    pub employee: EmployeeSummary,
    pub shifts_removed: usize,
}

/// GET /api/employees
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn index(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EmployeeSummary>>, AppError> {
    let department = match query.department.as_deref() {
        Some(raw) => raw.parse::<Department>().map_err(AppError::BadRequest)?,
        None => me.department,
    };
    authorize(&me, Operation::ManageEmployees, Some(department))?;

    let staff = state
        .controller()
        .read(|s| {
            s.employees
                .iter()
                .filter(|e| e.department == department)
                .map(EmployeeSummary::from)
                .collect()
        })
        .await;
    Ok(Json(staff))
}

/// POST /api/employees
#[instrument(skip(state, me, draft), fields(employee_id = %me.id))]
async fn create(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Json(draft): Json<EmployeeDraft>,
) -> Result<(StatusCode, Json<EmployeeSummary>), AppError> {
    authorize(&me, Operation::ManageEmployees, Some(draft.department))?;

    let employee = state
        .controller()
        .mutate(|s| Directory::new(s).add(draft))
        .await?;

    tracing::info!(new_id = %employee.id, name = %employee.name, "Employee added");
    Ok((StatusCode::CREATED, Json(EmployeeSummary::from(&employee))))
}

/// PUT /api/employees/{id}
///
/// Both the employee's current department and the one they move to must be
/// the caller's.
#[instrument(skip(state, me, draft), fields(employee_id = %me.id))]
async fn update(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(draft): Json<EmployeeDraft>,
) -> Result<Json<EmployeeSummary>, AppError> {
    authorize(&me, Operation::ManageEmployees, Some(draft.department))?;

    let employee = state
        .controller()
        .mutate(|s| {
            let current = find(&s.employees, id).ok_or(DirectoryError::NotFound(id))?;
            authorize(&me, Operation::ManageEmployees, Some(current.department))?;
            Ok::<_, AppError>(Directory::new(s).edit(id, draft)?)
        })
        .await?;

    Ok(Json(EmployeeSummary::from(&employee)))
}

/// DELETE /api/employees/{id}
///
/// Removes the employee from every shift. Their time logs are kept.
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn remove(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<RemovalResponse>, AppError> {
    let removal = state
        .controller()
        .mutate(|s| {
            let target = find(&s.employees, id).ok_or(DirectoryError::NotFound(id))?;
            authorize(&me, Operation::DeleteEmployee(id), Some(target.department))?;
            Ok::<_, AppError>(Directory::new(s).delete(id)?)
        })
        .await?;

    tracing::info!(
        deleted_id = %id,
        shifts_removed = removal.shifts_removed,
        "Employee deleted"
    );
    Ok(Json(RemovalResponse {
        employee: EmployeeSummary::from(&removal.employee),
        shifts_removed: removal.shifts_removed,
    }))
}
