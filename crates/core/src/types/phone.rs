//! Phone number type.
//!
//! Order tracking is keyed by the customer's phone number, so the number is
//! normalized once at the boundary and compared in normalized form
//! everywhere else.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input has fewer digits than a dialable number.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// The input has more digits than E.164 allows.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
    /// The input contains characters other than digits, spaces, and
    /// the `+ - ( )` separators.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A normalized phone number.
///
/// Stored as digits only (with an optional leading `+`), so two renditions
/// of the same number ("11 5555-0101" and "1155550101") compare equal and
/// hit the same backend lookup.
///
/// ## Examples
///
/// ```
/// use tio_pelotte_core::Phone;
///
/// let a = Phone::parse("11 5555-0101").unwrap();
/// let b = Phone::parse("1155550101").unwrap();
/// assert_eq!(a, b);
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum digits for a dialable number.
    pub const MIN_DIGITS: usize = 6;

    /// Maximum digits per E.164.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string, normalizing separators away.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits and common separators, or has an out-of-range digit
    /// count.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '0'..='9' => normalized.push(c),
                '+' if i == 0 => normalized.push(c),
                ' ' | '-' | '(' | ')' | '.' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        let digits = normalized.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("1155550101").is_ok());
        assert!(Phone::parse("+54 9 11 5555-0101").is_ok());
        assert!(Phone::parse("(011) 5555.0101").is_ok());
    }

    #[test]
    fn test_normalization_makes_numbers_equal() {
        let a = Phone::parse("11 5555-0101").unwrap();
        let b = Phone::parse("1155550101").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "1155550101");
    }

    #[test]
    fn test_plus_kept_only_at_start() {
        let phone = Phone::parse("+5491155550101").unwrap();
        assert_eq!(phone.as_str(), "+5491155550101");
        assert!(matches!(
            Phone::parse("54+91155550101"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse("   "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Phone::parse("12345"),
            Err(PhoneError::TooShort { .. })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            Phone::parse("call me"),
            Err(PhoneError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("1155550101").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"1155550101\"");
        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
