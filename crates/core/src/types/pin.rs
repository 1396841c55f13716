//! Four-digit PIN credential.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Pin`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    /// The input is not exactly four characters long.
    #[error("PIN must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains something other than ASCII digits.
    #[error("PIN must contain only digits")]
    NonDigit,
}

/// A staff PIN used to pick a user on the shared tablet.
///
/// ## Constraints
///
/// - Exactly 4 characters
/// - ASCII digits only (leading zeros are significant)
///
/// The `Debug` implementation redacts the value.
///
/// ## Examples
///
/// ```
/// use maruzzella_core::Pin;
///
/// assert!(Pin::parse("0420").is_ok());
/// assert!(Pin::parse("123").is_err());
/// assert!(Pin::parse("12a4").is_err());
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

impl Pin {
    /// Number of digits in a PIN.
    pub const LENGTH: usize = 4;

    /// Parse a `Pin` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly four ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PinError> {
        if s.chars().count() != Self::LENGTH {
            return Err(PinError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// The PIN handed to seeded staff on a fresh install.
    pub(crate) fn seed_default() -> Self {
        Self("1234".to_owned())
    }

    /// Compare a candidate PIN against this one.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Returns the PIN digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin([REDACTED])")
    }
}

impl TryFrom<String> for Pin {
    type Error = PinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

impl std::str::FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_parse_valid() {
        let pin = Pin::parse("0007").unwrap();
        assert_eq!(pin.as_str(), "0007");
        assert!(pin.matches("0007"));
        assert!(!pin.matches("7"));
    }

    #[test]
    fn test_pin_parse_wrong_length() {
        assert_eq!(
            Pin::parse("12345"),
            Err(PinError::WrongLength { expected: 4 })
        );
        assert_eq!(Pin::parse(""), Err(PinError::WrongLength { expected: 4 }));
    }

    #[test]
    fn test_pin_parse_non_digit() {
        assert_eq!(Pin::parse("12 4"), Err(PinError::NonDigit));
        assert_eq!(Pin::parse("١٢٣٤"), Err(PinError::NonDigit));
    }

    #[test]
    fn test_pin_debug_redacts() {
        let pin = Pin::parse("9876").unwrap();
        let debug = format!("{pin:?}");
        assert!(!debug.contains("9876"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_pin_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<Pin>("\"1234\"").is_ok());
        assert!(serde_json::from_str::<Pin>("\"12\"").is_err());
    }
}
