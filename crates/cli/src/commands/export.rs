//! CSV exports from the stored state.
//!
//! # Usage
//!
//! ```bash
//! mz-cli export payroll --department kitchen
//! mz-cli export roster --week next --output roster.csv
//! ```
//!
//! Without `--output` the file is written to the working directory under the
//! same name the web download uses.

use std::path::PathBuf;

use chrono::Local;
use maruzzella_core::engine::summarize;
use maruzzella_core::export::{payroll_csv, payroll_filename, roster_csv, roster_filename};
use maruzzella_core::model::{Employee, WeekKey};
use maruzzella_core::types::Department;

use super::{load_or_seed, open_store, write_output};

/// Export the payroll summary of `department`.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be written.
pub async fn payroll(
    department: Department,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;
    let state = load_or_seed(store.as_ref()).await?;

    let lines = summarize(&state.employees, &state.time_logs, department);
    let body = payroll_csv(&lines)?;
    let path = output.unwrap_or_else(|| payroll_filename(Local::now().date_naive()).into());

    write_output(Some(path.as_path()), &body).await?;
    tracing::info!(%department, employees = lines.len(), "Payroll exported");
    Ok(())
}

/// Export the roster grid of `week` for `department`.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be written.
pub async fn roster(
    week: WeekKey,
    department: Department,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;
    let state = load_or_seed(store.as_ref()).await?;

    let staff: Vec<Employee> = state
        .employees
        .iter()
        .filter(|e| e.department == department)
        .cloned()
        .collect();
    let body = roster_csv(state.rosters.week(week), &staff)?;
    let path = output.unwrap_or_else(|| roster_filename(week, Local::now().date_naive()).into());

    write_output(Some(path.as_path()), &body).await?;
    tracing::info!(%week, %department, "Roster exported");
    Ok(())
}
