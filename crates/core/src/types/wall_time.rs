//! Wall-clock time of day in `HH:MM` form.

use core::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const FORMAT: &str = "%H:%M";

/// Errors that can occur when parsing a [`WallTime`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WallTimeError {
    /// The input is not shaped like `HH:MM`.
    #[error("time must be in HH:MM format (got {0:?})")]
    Malformed(String),
    /// Hours or minutes are out of range.
    #[error("time out of range: {0}")]
    OutOfRange(String),
}

/// A time of day with minute precision, as entered on the roster.
///
/// Ordering follows the clock, so `"09:00" < "17:00"`.
/// `"00:00"` doubles as end-of-day for overnight shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    /// Build from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns `WallTimeError::OutOfRange` if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, WallTimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| WallTimeError::OutOfRange(format!("{hour:02}:{minute:02}")))
    }

    /// Parse `HH:MM` (24-hour clock, zero-padded).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not two digits, a colon, and two
    /// digits, or if the values are out of range.
    pub fn parse(s: &str) -> Result<Self, WallTimeError> {
        // chrono accepts single-digit hours; the roster does not
        let shaped = s.len() == 5
            && s.bytes()
                .enumerate()
                .all(|(i, b)| if i == 2 { b == b':' } else { b.is_ascii_digit() });
        if !shaped {
            return Err(WallTimeError::Malformed(s.to_owned()));
        }

        NaiveTime::parse_from_str(s, FORMAT)
            .map(Self)
            .map_err(|_| WallTimeError::OutOfRange(s.to_owned()))
    }

    /// Parse an optional form field: blank or whitespace-only input is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is non-empty and malformed.
    pub fn parse_optional(s: Option<&str>) -> Result<Option<Self>, WallTimeError> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(value).map(Some),
        }
    }

    /// Hour component.
    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    /// Minute component.
    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// The underlying chrono time.
    #[must_use]
    pub const fn as_naive(self) -> NaiveTime {
        self.0
    }

    /// Whether this is `00:00`.
    #[must_use]
    pub fn is_midnight(self) -> bool {
        self.0 == NaiveTime::MIN
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for WallTime {
    type Error = WallTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WallTime> for String {
    fn from(time: WallTime) -> Self {
        time.to_string()
    }
}

impl std::str::FromStr for WallTime {
    type Err = WallTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t = WallTime::parse("09:05").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["9:00", "0900", "09:0", "ab:cd", "09:00:00", "", " 09:00"] {
            assert!(
                matches!(WallTime::parse(input), Err(WallTimeError::Malformed(_))),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            WallTime::parse("24:00"),
            Err(WallTimeError::OutOfRange(_))
        ));
        assert!(matches!(
            WallTime::parse("12:60"),
            Err(WallTimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_optional_treats_blank_as_none() {
        assert_eq!(WallTime::parse_optional(None).unwrap(), None);
        assert_eq!(WallTime::parse_optional(Some("   ")).unwrap(), None);
        assert_eq!(
            WallTime::parse_optional(Some(" 17:30 ")).unwrap(),
            Some(WallTime::from_hm(17, 30).unwrap())
        );
    }

    #[test]
    fn test_ordering_follows_the_clock() {
        assert!(WallTime::parse("09:00").unwrap() < WallTime::parse("17:00").unwrap());
        assert!(WallTime::MIDNIGHT.is_midnight());
        assert_eq!(WallTime::parse("00:00").unwrap(), WallTime::MIDNIGHT);
    }

    #[test]
    fn test_serde_uses_hh_mm_string() {
        let t: WallTime = serde_json::from_str("\"22:30\"").unwrap();
        assert_eq!(t.as_naive(), NaiveTime::from_hms_opt(22, 30, 0).unwrap());
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"22:30\"");
        assert!(serde_json::from_str::<WallTime>("\"7:30\"").is_err());
    }
}
