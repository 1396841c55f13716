//! Roster editing: shift CRUD, recurring and bulk edits, week copy and
//! cascade removal of employees.

use serde::Deserialize;

use crate::model::{DayOfWeek, Roster, Rosters, Shift, ShiftError, WeekKey};
use crate::types::{EmployeeId, WallTime};

/// Position of a shift within a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShiftRef {
    pub day: DayOfWeek,
    pub index: usize,
}

impl Rosters {
    /// Validate `shift` and append it to `day`.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the roster is unchanged.
    pub fn add_shift(&mut self, week: WeekKey, day: DayOfWeek, shift: Shift) -> Result<(), ShiftError> {
        shift.validate()?;
        self.week_mut(week).day_mut(day).push(shift);
        Ok(())
    }

    /// Validate `shift` once and append a copy to each of `days`.
    ///
    /// Repeated days are only written once. Returns the number of copies added.
    ///
    /// # Errors
    ///
    /// Returns `ShiftError::NoDays` for an empty day set, or the validation
    /// failure. Nothing is written on error.
    pub fn add_recurring_shift(
        &mut self,
        week: WeekKey,
        shift: &Shift,
        days: &[DayOfWeek],
    ) -> Result<usize, ShiftError> {
        if days.is_empty() {
            return Err(ShiftError::NoDays);
        }
        shift.validate()?;

        let roster = self.week_mut(week);
        let mut added = 0;
        for day in DayOfWeek::ALL.into_iter().filter(|d| days.contains(d)) {
            roster.day_mut(day).push(shift.clone());
            added += 1;
        }
        Ok(added)
    }

    /// Replace the shift at `index` on `day`.
    ///
    /// # Errors
    ///
    /// Returns the validation failure or `ShiftError::NotFound`.
    pub fn edit_shift(
        &mut self,
        week: WeekKey,
        day: DayOfWeek,
        index: usize,
        shift: Shift,
    ) -> Result<(), ShiftError> {
        shift.validate()?;
        let slot = self
            .week_mut(week)
            .day_mut(day)
            .get_mut(index)
            .ok_or_else(|| not_found(day, index))?;
        *slot = shift;
        Ok(())
    }

    /// Remove and return the shift at `index` on `day`.
    ///
    /// # Errors
    ///
    /// Returns `ShiftError::NotFound` when the index is out of range.
    pub fn delete_shift(&mut self, week: WeekKey, day: DayOfWeek, index: usize) -> Result<Shift, ShiftError> {
        let shifts = self.week_mut(week).day_mut(day);
        if index >= shifts.len() {
            return Err(not_found(day, index));
        }
        Ok(shifts.remove(index))
    }

    /// Overwrite next week with a copy of the current week.
    pub fn copy_week(&mut self) {
        self.next_week = self.current_week.clone();
    }

    /// Drop `employee` from every shift in both weeks, removing shifts left
    /// with nobody assigned. Returns the number of shifts removed.
    pub fn remove_employee_everywhere(&mut self, employee: EmployeeId) -> usize {
        let mut removed = 0;
        for roster in [&mut self.current_week, &mut self.next_week] {
            for shifts in roster.days_mut() {
                let before = shifts.len();
                shifts.retain_mut(|shift| {
                    shift.employee_ids.retain(|id| *id != employee);
                    !shift.employee_ids.is_empty()
                });
                removed += before - shifts.len();
            }
        }
        removed
    }

    /// Set a new start and/or end time on several shifts at once.
    ///
    /// Every edited shift is validated before any is written.
    ///
    /// # Errors
    ///
    /// Returns `ShiftError::NoTimesGiven` when both times are absent,
    /// `ShiftError::NoSelection` for an empty selection,
    /// `ShiftError::NotFound` for a stale position, or the first validation
    /// failure. The roster is unchanged on error.
    pub fn bulk_edit_times(
        &mut self,
        week: WeekKey,
        selection: &[ShiftRef],
        start_time: Option<WallTime>,
        end_time: Option<WallTime>,
    ) -> Result<usize, ShiftError> {
        if start_time.is_none() && end_time.is_none() {
            return Err(ShiftError::NoTimesGiven);
        }
        if selection.is_empty() {
            return Err(ShiftError::NoSelection);
        }

        let roster = self.week_mut(week);
        let mut edited = Vec::with_capacity(selection.len());
        for &ShiftRef { day, index } in selection {
            let mut shift = roster
                .day(day)
                .get(index)
                .cloned()
                .ok_or_else(|| not_found(day, index))?;
            if start_time.is_some() {
                shift.start_time = start_time;
            }
            if end_time.is_some() {
                shift.end_time = end_time;
            }
            shift.validate()?;
            edited.push((day, index, shift));
        }

        let count = edited.len();
        for (day, index, shift) in edited {
            if let Some(slot) = roster.day_mut(day).get_mut(index) {
                *slot = shift;
            }
        }
        Ok(count)
    }

    /// Shifts on `day` that include `employee`, with their positions.
    #[must_use]
    pub fn shifts_for(&self, week: WeekKey, day: DayOfWeek, employee: EmployeeId) -> Vec<(usize, &Shift)> {
        self.week(week).shifts_for(day, employee)
    }
}

impl Roster {
    /// Shifts on `day` that include `employee`, with their positions.
    #[must_use]
    pub fn shifts_for(&self, day: DayOfWeek, employee: EmployeeId) -> Vec<(usize, &Shift)> {
        self.day(day)
            .iter()
            .enumerate()
            .filter(|(_, shift)| shift.includes(employee))
            .collect()
    }
}

fn not_found(day: DayOfWeek, index: usize) -> ShiftError {
    ShiftError::NotFound {
        day: day.to_string(),
        index,
    }
}
