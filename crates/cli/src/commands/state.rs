//! Whole-state file operations: backup, restore and merging time logs.
//!
//! # Usage
//!
//! ```bash
//! mz-cli state dump --output backup.json
//! mz-cli state import backup.json
//! mz-cli state merge-logs tablet.json
//! ```

use std::path::{Path, PathBuf};

use maruzzella_core::engine::Payroll;
use maruzzella_core::model::{StateSnapshot, TimeLog};
use serde_json::Value;

use super::{CliError, load_or_seed, open_store, write_output};

/// Print or save the current state as pretty JSON.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be written.
pub async fn dump(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;
    let state = load_or_seed(store.as_ref()).await?;
    let body = serde_json::to_string_pretty(&state)?;
    write_output(output.as_deref(), &body).await?;
    Ok(())
}

/// Replace the stored state with a full data file.
///
/// The file must contain `employees`, `rosters` and `timeLogs`; nothing is
/// written if any is missing or malformed.
///
/// # Errors
///
/// Returns an error if the file is invalid or the store cannot be written.
pub async fn import(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_json(file).await?;
    let state = StateSnapshot::from_document(&doc)?;

    let store = open_store().await?;
    store.save(&state).await?;
    tracing::info!(
        employees = state.employees.len(),
        time_logs = state.time_logs.len(),
        "State imported"
    );
    Ok(())
}

/// Add the time logs from `file` that the store does not have yet.
///
/// # Errors
///
/// Returns an error if the file is invalid or the store cannot be written.
pub async fn merge_logs(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let incoming = time_logs_in(&read_json(file).await?)?;
    let total = incoming.len();

    let store = open_store().await?;
    let mut state = load_or_seed(store.as_ref()).await?;
    let added = Payroll::new(&mut state.time_logs).merge_logs(incoming);
    if added > 0 {
        store.save(&state).await?;
    }

    tracing::info!(added, skipped = total - added, "Time logs merged");
    Ok(())
}

async fn read_json(file: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| format!("Cannot read {}: {e}", file.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Time logs from either a bare array or a data file's `timeLogs` section.
fn time_logs_in(doc: &Value) -> Result<Vec<TimeLog>, CliError> {
    let section = match doc {
        Value::Array(_) => doc,
        Value::Object(obj) => obj
            .get(StateSnapshot::TIME_LOGS)
            .ok_or_else(|| CliError::Usage("File has no timeLogs section.".to_string()))?,
        _ => return Err(CliError::Usage("Expected a JSON array or object.".to_string())),
    };
    serde_json::from_value(section.clone()).map_err(|e| CliError::Usage(format!("Invalid timeLogs: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log(id: i64) -> Value {
        json!({
            "id": id,
            "employeeId": 3,
            "clockInTime": "2024-05-06T09:00:00Z",
            "clockOutTime": "2024-05-06T17:00:00Z",
            "status": "pending",
        })
    }

    #[test]
    fn test_time_logs_from_bare_array() {
        let logs = time_logs_in(&json!([log(1), log(2)])).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].id.as_i64(), 2);
    }

    #[test]
    fn test_time_logs_from_data_file() {
        let logs = time_logs_in(&json!({"employees": [], "timeLogs": [log(7)]})).unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_time_logs_missing_section() {
        let err = time_logs_in(&json!({"employees": []})).unwrap_err();
        assert!(err.to_string().contains("timeLogs"));
    }

    #[test]
    fn test_time_logs_rejects_scalar() {
        assert!(time_logs_in(&json!(42)).is_err());
    }

    #[tokio::test]
    async fn test_read_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(err.to_string().starts_with("Cannot read"));
    }
}
