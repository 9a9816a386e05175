//! Rider berth preferences.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::BerthType;

/// Error returned when parsing a preference token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPreference {
    #[error("preference must not be empty")]
    Empty,

    #[error("unknown preference: {0:?}")]
    Unknown(String),
}

/// The berth a rider would like, or no preference at all.
///
/// `WINDOW` requests the berth type given to every seat of an unrecognised
/// coach class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Preference {
    #[default]
    Any,
    Berth(BerthType),
}

impl Preference {
    /// Parse a preference token such as `ANY`, `LOWER` or `SIDE_UPPER`.
    ///
    /// ```
    /// use rail_engine::allocator::Preference;
    /// use rail_engine::domain::BerthType;
    ///
    /// assert_eq!(Preference::parse("ANY").unwrap(), Preference::Any);
    /// assert_eq!(
    ///     Preference::parse("side_lower").unwrap(),
    ///     Preference::Berth(BerthType::SideLower)
    /// );
    /// assert!(Preference::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidPreference> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidPreference::Empty);
        }
        if trimmed.eq_ignore_ascii_case("ANY") {
            return Ok(Preference::Any);
        }
        BerthType::parse(trimmed)
            .map(Preference::Berth)
            .map_err(|_| InvalidPreference::Unknown(trimmed.to_string()))
    }

    /// Whether a seat of `berth` satisfies this preference.
    pub fn matches(self, berth: BerthType) -> bool {
        match self {
            Preference::Any => true,
            Preference::Berth(wanted) => wanted == berth,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Preference::Any => "ANY",
            Preference::Berth(berth) => berth.as_token(),
        }
    }
}

impl TryFrom<String> for Preference {
    type Error = InvalidPreference;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Preference::parse(&value)
    }
}

impl From<Preference> for String {
    fn from(preference: Preference) -> Self {
        preference.as_token().to_string()
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
