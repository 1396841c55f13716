//! Weekly rosters: seven days of shifts, for this week and next.

use serde::{Deserialize, Serialize};

use super::shift::Shift;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday to Sunday.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// English day name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid day of week: {s}"))
    }
}

/// One week of shifts. Every day is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RosterRepr", into = "RosterRepr")]
pub struct Roster {
    days: [Vec<Shift>; 7],
}

impl Roster {
    /// Shifts scheduled on `day`, in insertion order.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // day index is always < 7
    pub fn day(&self, day: DayOfWeek) -> &[Shift] {
        &self.days[day.index()]
    }

    /// Mutable access to the shifts of `day`.
    #[allow(clippy::indexing_slicing)]
    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut Vec<Shift> {
        &mut self.days[day.index()]
    }

    /// Iterate days in order with their shifts.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &[Shift])> {
        DayOfWeek::ALL
            .into_iter()
            .zip(self.days.iter().map(Vec::as_slice))
    }

    /// Iterate every day's shift list mutably.
    pub fn days_mut(&mut self) -> impl Iterator<Item = &mut Vec<Shift>> {
        self.days.iter_mut()
    }

    /// Total number of shifts across the week.
    #[must_use]
    pub fn shift_count(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }
}

/// Wire shape: an object keyed by day name. Missing days deserialize empty.
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct RosterRepr {
    monday: Vec<Shift>,
    tuesday: Vec<Shift>,
    wednesday: Vec<Shift>,
    thursday: Vec<Shift>,
    friday: Vec<Shift>,
    saturday: Vec<Shift>,
    sunday: Vec<Shift>,
}

impl From<RosterRepr> for Roster {
    fn from(r: RosterRepr) -> Self {
        Self {
            days: [
                r.monday,
                r.tuesday,
                r.wednesday,
                r.thursday,
                r.friday,
                r.saturday,
                r.sunday,
            ],
        }
    }
}

impl From<Roster> for RosterRepr {
    fn from(roster: Roster) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = roster.days;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }
}

/// Which of the two planned weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeekKey {
    #[serde(alias = "current")]
    CurrentWeek,
    #[serde(alias = "next")]
    NextWeek,
}

impl WeekKey {
    /// Wire name of the week.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentWeek => "currentWeek",
            Self::NextWeek => "nextWeek",
        }
    }
}

impl std::fmt::Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeekKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "currentweek" | "current-week" => Ok(Self::CurrentWeek),
            "next" | "nextweek" | "next-week" => Ok(Self::NextWeek),
            _ => Err(format!("invalid week: {s}")),
        }
    }
}

/// This week's and next week's rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rosters {
    #[serde(default)]
    pub current_week: Roster,
    #[serde(default)]
    pub next_week: Roster,
}

impl Rosters {
    #[must_use]
    pub const fn week(&self, key: WeekKey) -> &Roster {
        match key {
            WeekKey::CurrentWeek => &self.current_week,
            WeekKey::NextWeek => &self.next_week,
        }
    }

    pub const fn week_mut(&mut self, key: WeekKey) -> &mut Roster {
        match key {
            WeekKey::CurrentWeek => &mut self.current_week,
            WeekKey::NextWeek => &mut self.next_week,
        }
    }
}
