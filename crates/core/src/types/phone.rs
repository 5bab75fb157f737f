//! WhatsApp phone numbers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`WhatsAppNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input has no digits at all.
    #[error("phone number cannot be empty")]
    Empty,
    /// Fewer digits than a Gambian local number.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// More digits than any international number.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
}

/// A phone number in the digits-only form `wa.me` expects.
///
/// Everything except digits is stripped. A bare 7-digit Gambian number gets
/// the `220` country code.
///
/// ```
/// use sanndikaa_core::WhatsAppNumber;
///
/// let n = WhatsAppNumber::parse("747 0187").unwrap();
/// assert_eq!(n.as_str(), "2207470187");
/// let n = WhatsAppNumber::parse("+220 747-0187").unwrap();
/// assert_eq!(n.as_str(), "2207470187");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Gambian country calling code.
    pub const COUNTRY_CODE: &'static str = "220";
    /// Length of a Gambian subscriber number.
    pub const LOCAL_LENGTH: usize = 7;
    /// E.164 maximum.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a number as typed by a seller.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError`] if the digits are missing, too few or too many.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        match digits.len() {
            0 => Err(PhoneError::Empty),
            n if n < Self::LOCAL_LENGTH => Err(PhoneError::TooShort {
                min: Self::LOCAL_LENGTH,
            }),
            Self::LOCAL_LENGTH => Ok(Self(format!("{}{digits}", Self::COUNTRY_CODE))),
            n if n > Self::MAX_DIGITS => Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            }),
            _ => Ok(Self(digits)),
        }
    }

    /// The digits, with country code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for WhatsAppNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for WhatsAppNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(
            WhatsAppNumber::parse("7470187").unwrap().as_str(),
            "2207470187"
        );
        assert_eq!(
            WhatsAppNumber::parse("(747) 01-87").unwrap().as_str(),
            "2207470187"
        );
    }

    #[test]
    fn test_international_number_kept() {
        assert_eq!(
            WhatsAppNumber::parse("+220 3123456").unwrap().as_str(),
            "2203123456"
        );
        assert_eq!(
            WhatsAppNumber::parse("+44 7700 900123").unwrap().as_str(),
            "447700900123"
        );
    }

    #[test]
    fn test_rejects_short_and_empty() {
        assert_eq!(WhatsAppNumber::parse("call me"), Err(PhoneError::Empty));
        assert_eq!(
            WhatsAppNumber::parse("12345"),
            Err(PhoneError::TooShort { min: 7 })
        );
        assert_eq!(
            WhatsAppNumber::parse("1234567890123456"),
            Err(PhoneError::TooLong { max: 15 })
        );
    }
}
