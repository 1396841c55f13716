//! Today's team briefing for Kitchen managers.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{Datelike, Local};
use maruzzella_core::access::{Operation, authorize};
use maruzzella_core::briefing::{self, BriefingPlan};
use maruzzella_core::model::{DayOfWeek, WeekKey};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentEmployee;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/briefing", get(show))
}

#[derive(Debug, Serialize)]
pub struct BriefingResponse {
    pub briefing: String,
}

/// GET /api/briefing
///
/// Generator failures are answered with a fallback message rather than an
/// error status.
#[instrument(skip(state, me), fields(employee_id = %me.id))]
async fn show(
    CurrentEmployee(me): CurrentEmployee,
    State(state): State<AppState>,
) -> Result<Json<BriefingResponse>, AppError> {
    authorize(&me, Operation::Briefing, None)?;

    let today = DayOfWeek::from(Local::now().weekday());
    let plan = state
        .controller()
        .read(|s| briefing::plan(s.rosters.week(WeekKey::CurrentWeek).day(today), &s.employees))
        .await;

    let text = match (plan, state.generator()) {
        (BriefingPlan::Fixed(message), _) => message.to_string(),
        (BriefingPlan::Prompt(_), None) => briefing::DISABLED.to_string(),
        (BriefingPlan::Prompt(prompt), Some(generator)) => match generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(day = %today, error = %e, "Briefing generation failed");
                briefing::UNAVAILABLE.to_string()
            }
        },
    };

    Ok(Json(BriefingResponse { briefing: text }))
}
