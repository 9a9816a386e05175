//! Station code types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// An opaque station identifier.
///
/// Station codes carry no internal structure: `NDLS`, `BCT` and `Howrah Jn`
/// are all acceptable. The only guarantees are that a code is non-empty,
/// carries no surrounding whitespace and contains no control characters.
///
/// # Examples
///
/// ```
/// use rail_engine::domain::StationCode;
///
/// let ndls = StationCode::parse("NDLS").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StationCode::parse("  BCT ").unwrap().as_str(), "BCT");
///
/// // Blank codes are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidStationCode {
                reason: "must not contain control characters",
            });
        }

        Ok(StationCode(trimmed.to_string()))
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationCode::parse(&value)
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        code.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any code without surrounding whitespace survives parsing unchanged
        #[test]
        fn roundtrip(s in "[A-Za-z0-9][A-Za-z0-9 ]{0,10}[A-Za-z0-9]") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Padding never changes the parsed code
        #[test]
        fn padding_is_ignored(s in "[A-Z]{2,6}", left in " {0,3}", right in " {0,3}") {
            let padded = format!("{left}{s}{right}");
            prop_assert_eq!(StationCode::parse(&padded).unwrap(), StationCode::parse(&s).unwrap());
        }

        /// Whitespace-only strings are always rejected
        #[test]
        fn whitespace_rejected(s in "[ \t\n]{0,8}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
