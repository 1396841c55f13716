//! Display formatting for worked time.

use rust_decimal::{Decimal, RoundingStrategy};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;

/// Worked time as `"{H}h {M}m"`, floored to whole minutes.
///
/// Negative durations render as `"0h 0m"`.
///
/// ```
/// use maruzzella_core::format::format_duration;
///
/// assert_eq!(format_duration(8 * 3_600_000), "8h 0m");
/// assert_eq!(format_duration(5_459_999), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(ms: i64) -> String {
    if ms < 0 {
        return "0h 0m".to_owned();
    }
    let total_minutes = ms / MS_PER_MINUTE;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

/// Worked time as decimal hours with two places, as used on payroll sheets.
///
/// Zero and negative durations render as `"0.00"`.
#[must_use]
pub fn format_hours_decimal(ms: i64) -> String {
    if ms <= 0 {
        return "0.00".to_owned();
    }
    let hours = (Decimal::from(ms) / Decimal::from(MS_PER_HOUR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{hours:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0h 0m");
        assert_eq!(format_duration(-1), "0h 0m");
        assert_eq!(format_duration(59_999), "0h 0m");
        assert_eq!(format_duration(8 * MS_PER_HOUR), "8h 0m");
        assert_eq!(format_duration(25 * MS_PER_HOUR + 61 * MS_PER_MINUTE), "26h 1m");
    }

    #[test]
    fn test_format_hours_decimal() {
        assert_eq!(format_hours_decimal(0), "0.00");
        assert_eq!(format_hours_decimal(-MS_PER_HOUR), "0.00");
        assert_eq!(format_hours_decimal(8 * MS_PER_HOUR), "8.00");
        assert_eq!(format_hours_decimal(MS_PER_HOUR / 4), "0.25");
        assert_eq!(format_hours_decimal(MS_PER_HOUR / 3), "0.33");
        assert_eq!(format_hours_decimal(7 * MS_PER_HOUR + 30 * MS_PER_MINUTE), "7.50");
    }
}
