//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness
//! GET  /health/ready                        - Store reachable
//!
//! # Raw state (managers)
//! GET  /api/state                           - Whole state
//! POST /api/state                           - Overwrite sections, echo state
//!
//! # Auth (PIN)
//! GET  /api/auth/staff                      - Login picker (no PINs)
//! POST /api/auth/login                      - Sign in
//! POST /api/auth/logout                     - Sign out
//! GET  /api/me                              - Signed-in employee
//!
//! # Employees (managers, own department)
//! GET  /api/employees                       - List
//! POST /api/employees                       - Add
//! PUT  /api/employees/{id}                  - Edit
//! DELETE /api/employees/{id}                - Delete (cascades to rosters)
//!
//! # Rosters (Kitchen; edits by managers)
//! GET  /api/rosters/{week}                  - Week grid
//! POST /api/rosters/{week}/{day}            - Add shift
//! PUT  /api/rosters/{week}/{day}/{index}    - Edit shift
//! DELETE /api/rosters/{week}/{day}/{index}  - Delete shift
//! POST /api/rosters/{week}/recurring        - Same shift on several days
//! POST /api/rosters/{week}/bulk             - New times for several shifts
//! POST /api/rosters/copy                    - This week over next week
//! GET  /api/rosters/{week}/export.csv       - Roster grid CSV
//!
//! # Time clock
//! GET  /api/clock                           - Status of visible staff
//! POST /api/clock/{employee_id}/in          - Clock in
//! POST /api/clock/{employee_id}/out         - Clock out
//!
//! # Payroll (managers, own department)
//! GET  /api/payroll                         - Totals and logs per employee
//! POST /api/payroll/logs                    - Create or correct a log
//! PUT  /api/payroll/logs/{id}/status        - Approve or reject
//! DELETE /api/payroll/logs/{id}             - Delete a log
//! POST /api/payroll/logs/merge              - Fold in logs from another device
//! GET  /api/payroll/export.csv              - Payroll summary CSV
//!
//! # Briefing (Kitchen managers)
//! GET  /api/briefing                        - Today's team briefing
//! ```

pub mod auth;
pub mod briefing;
pub mod clock;
pub mod employees;
pub mod health;
pub mod payroll;
pub mod rosters;
pub mod state;

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use maruzzella_core::model::{DayOfWeek, WeekKey};

use crate::error::AppError;
use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(state::router())
        .merge(auth::router())
        .merge(employees::router())
        .merge(rosters::router())
        .merge(clock::router())
        .merge(payroll::router())
        .merge(briefing::router())
}

fn parse_week(raw: &str) -> Result<WeekKey, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

fn parse_day(raw: &str) -> Result<DayOfWeek, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

/// A CSV body served as a file download.
fn csv_download(filename: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
