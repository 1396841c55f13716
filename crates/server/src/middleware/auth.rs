//! PIN-session authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use maruzzella_core::engine::find;
use maruzzella_core::model::Employee;
use maruzzella_core::types::EmployeeId;
use tower_sessions::Session;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Session key holding the signed-in employee's id.
const EMPLOYEE_ID: &str = "employee_id";

/// Extractor that requires a signed-in employee.
///
/// The session stores only the id; the employee record is re-read from the
/// live state on every request, so role changes take effect immediately and
/// deleted employees lose access.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentEmployee(me): CurrentEmployee) -> String {
///     format!("Ciao, {}!", me.name)
/// }
/// ```
pub struct CurrentEmployee(pub Employee);

impl FromRequestParts<AppState> for CurrentEmployee {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let not_logged_in = || AppError::Unauthorized("Not logged in".to_string());

        let session = parts.extensions.get::<Session>().ok_or_else(not_logged_in)?;

        let id: EmployeeId = session
            .get(EMPLOYEE_ID)
            .await
            .ok()
            .flatten()
            .ok_or_else(not_logged_in)?;

        let employee = state
            .controller()
            .read(|s| find(&s.employees, id).cloned())
            .await
            .ok_or_else(not_logged_in)?;

        set_sentry_user(employee.id.as_i64(), &employee.name);
        Ok(Self(employee))
    }
}

/// Record `id` as the signed-in employee, rotating the session id.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_employee(session: &Session, id: EmployeeId) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(EMPLOYEE_ID, id).await
}

/// Sign out by discarding the whole session.
///
/// # Errors
///
/// Returns an error if the session store cannot be reached.
pub async fn clear_current_employee(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
