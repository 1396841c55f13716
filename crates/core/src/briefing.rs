//! Daily briefing: turns today's shifts into a prompt for a text generator.
//!
//! The generator itself lives with the server; this module decides whether a
//! prompt is needed at all and what it says.

use crate::engine::find;
use crate::model::{Employee, Shift};

/// Reply when nobody is on today's roster.
pub const NO_SHIFTS: &str = "No staff are scheduled to work today. The restaurant might be closed.";
/// Reply when today's shifts name nobody who still works here, or say nothing.
pub const NO_TIMED_SHIFTS: &str = "No staff with timed shifts are scheduled for today.";
/// Reply when no generator is configured.
pub const DISABLED: &str = "AI briefing is disabled. Configure CLAUDE_API_KEY to enable it.";
/// Reply when the generator fails.
pub const UNAVAILABLE: &str = "Sorry, I couldn't generate a briefing right now. Let's have a great day!";

/// What to answer for today's briefing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BriefingPlan {
    /// A canned answer; no generator call needed.
    Fixed(&'static str),
    /// Send this prompt to the generator.
    Prompt(String),
}

/// Plan the briefing for `shifts` scheduled today.
#[must_use]
pub fn plan(shifts: &[Shift], employees: &[Employee]) -> BriefingPlan {
    if shifts.is_empty() {
        return BriefingPlan::Fixed(NO_SHIFTS);
    }

    let lines: Vec<String> = shifts
        .iter()
        .filter_map(|shift| roster_line(shift, employees))
        .collect();

    if lines.is_empty() {
        return BriefingPlan::Fixed(NO_TIMED_SHIFTS);
    }

    BriefingPlan::Prompt(prompt(&lines.join("\n")))
}

/// One roster line, or `None` when the shift names no current employee or
/// carries neither times nor notes.
fn roster_line(shift: &Shift, employees: &[Employee]) -> Option<String> {
    let names: Vec<&str> = shift
        .employee_ids
        .iter()
        .filter_map(|id| find(employees, *id))
        .map(|e| e.name.as_str())
        .collect();
    if names.is_empty() {
        return None;
    }
    let names = names.join(", ");

    match (shift.start_time, shift.end_time, shift.notes.as_deref()) {
        (Some(start), Some(end), notes) => {
            let notes = notes.map(|n| format!(" ({n})")).unwrap_or_default();
            Some(format!("- {names} from {start} to {end}{notes}."))
        }
        (_, _, Some(notes)) => Some(format!("- {names} is on: {notes}.")),
        _ => None,
    }
}

fn prompt(roster: &str) -> String {
    format!(
        "You are the manager of an Italian restaurant called Maruzzella.\n\
         Generate a short, friendly, and motivational daily briefing for the team based on today's roster.\n\
         Keep it concise and positive. Mention the staff working today and any special statuses like days off.\n\
         \n\
         Today's Roster:\n\
         {roster}\n\
         \n\
         Briefing:"
    )
}
