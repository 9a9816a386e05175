//! Coach classes and berth layout.
//!
//! A seat's berth type is never stored: it is derived from the seat number
//! and the coach class, so inventory seeding and allocation always agree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The physical category of a seat within a coach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum BerthType {
    Lower,
    Middle,
    Upper,
    SideLower,
    SideUpper,
    Cabin,
    Window,
}

impl BerthType {
    /// Every berth type, in declaration order.
    pub const ALL: [BerthType; 7] = [
        BerthType::Lower,
        BerthType::Middle,
        BerthType::Upper,
        BerthType::SideLower,
        BerthType::SideUpper,
        BerthType::Cabin,
        BerthType::Window,
    ];

    /// Parse a berth type token.
    ///
    /// Matching ignores case and treats spaces, hyphens and underscores
    /// alike, so `SIDE_LOWER`, `Side Lower` and `side-lower` all parse.
    ///
    /// ```
    /// use rail_engine::domain::BerthType;
    ///
    /// assert_eq!(BerthType::parse("SIDE_LOWER").unwrap(), BerthType::SideLower);
    /// assert_eq!(BerthType::parse("Side Lower").unwrap(), BerthType::SideLower);
    /// assert!(BerthType::parse("AISLE").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        BerthType::ALL
            .into_iter()
            .find(|berth| berth.as_token() == normalized)
            .ok_or_else(|| DomainError::UnknownBerth(s.trim().to_string()))
    }

    /// The wire token, e.g. `SIDE_LOWER`.
    pub fn as_token(self) -> &'static str {
        match self {
            BerthType::Lower => "LOWER",
            BerthType::Middle => "MIDDLE",
            BerthType::Upper => "UPPER",
            BerthType::SideLower => "SIDE_LOWER",
            BerthType::SideUpper => "SIDE_UPPER",
            BerthType::Cabin => "CABIN",
            BerthType::Window => "WINDOW",
        }
    }

    /// The human-readable label, e.g. `Side Lower`.
    pub fn label(self) -> &'static str {
        match self {
            BerthType::Lower => "Lower",
            BerthType::Middle => "Middle",
            BerthType::Upper => "Upper",
            BerthType::SideLower => "Side Lower",
            BerthType::SideUpper => "Side Upper",
            BerthType::Cabin => "Cabin",
            BerthType::Window => "Window",
        }
    }
}

impl TryFrom<String> for BerthType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BerthType::parse(&value)
    }
}

impl fmt::Display for BerthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The class of a coach, which fixes its berth layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CoachClass {
    Sleeper,
    Ac3,
    Ac2,
    Ac1,
    /// Any class without a known berth layout. Every seat is a window seat.
    Other(String),
}

impl CoachClass {
    /// Parse a class name.
    ///
    /// Known classes match case-insensitively by name or by their short
    /// code (`SL`, `3A`, `2A`, `1A`). Unrecognised names are kept verbatim
    /// as [`CoachClass::Other`].
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCoachClass);
        }

        Ok(match trimmed.to_ascii_uppercase().as_str() {
            "SLEEPER" | "SL" => CoachClass::Sleeper,
            "AC3" | "3A" => CoachClass::Ac3,
            "AC2" | "2A" => CoachClass::Ac2,
            "AC1" | "1A" => CoachClass::Ac1,
            _ => CoachClass::Other(trimmed.to_string()),
        })
    }

    /// The canonical class name.
    pub fn name(&self) -> &str {
        match self {
            CoachClass::Sleeper => "Sleeper",
            CoachClass::Ac3 => "AC3",
            CoachClass::Ac2 => "AC2",
            CoachClass::Ac1 => "AC1",
            CoachClass::Other(name) => name,
        }
    }

    /// Length of the repeating berth pattern, if the class has one.
    pub fn berth_cycle(&self) -> Option<u32> {
        match self {
            CoachClass::Sleeper | CoachClass::Ac3 => Some(8),
            CoachClass::Ac2 => Some(6),
            CoachClass::Ac1 | CoachClass::Other(_) => None,
        }
    }

    /// Derive the berth type of a seat number in a coach of this class.
    ///
    /// Total over all seat numbers.
    ///
    /// ```
    /// use rail_engine::domain::{BerthType, CoachClass};
    ///
    /// assert_eq!(CoachClass::Sleeper.berth_type(1), BerthType::Lower);
    /// assert_eq!(CoachClass::Sleeper.berth_type(8), BerthType::SideUpper);
    /// assert_eq!(CoachClass::Ac2.berth_type(5), BerthType::SideLower);
    /// assert_eq!(CoachClass::Ac1.berth_type(17), BerthType::Cabin);
    /// ```
    pub fn berth_type(&self, seat_number: u32) -> BerthType {
        match self {
            CoachClass::Sleeper | CoachClass::Ac3 => match seat_number % 8 {
                1 | 4 => BerthType::Lower,
                2 | 5 => BerthType::Middle,
                3 | 6 => BerthType::Upper,
                7 => BerthType::SideLower,
                _ => BerthType::SideUpper,
            },
            CoachClass::Ac2 => match seat_number % 6 {
                1 | 3 => BerthType::Lower,
                2 | 4 => BerthType::Upper,
                5 => BerthType::SideLower,
                _ => BerthType::SideUpper,
            },
            CoachClass::Ac1 => BerthType::Cabin,
            CoachClass::Other(_) => BerthType::Window,
        }
    }
}

impl TryFrom<String> for CoachClass {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CoachClass::parse(&value)
    }
}

impl From<CoachClass> for String {
    fn from(class: CoachClass) -> Self {
        class.name().to_string()
    }
}

impl fmt::Display for CoachClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleeper_first_bay() {
        let expected = [
            BerthType::Lower,
            BerthType::Middle,
            BerthType::Upper,
            BerthType::Lower,
            BerthType::Middle,
            BerthType::Upper,
            BerthType::SideLower,
            BerthType::SideUpper,
        ];
        for (i, berth) in expected.iter().enumerate() {
            assert_eq!(CoachClass::Sleeper.berth_type(i as u32 + 1), *berth);
        }
    }

    #[test]
    fn ac3_matches_sleeper() {
        for n in 1..=64 {
            assert_eq!(CoachClass::Ac3.berth_type(n), CoachClass::Sleeper.berth_type(n));
        }
    }

    #[test]
    fn ac2_first_bay() {
        let expected = [
            BerthType::Lower,
            BerthType::Upper,
            BerthType::Lower,
            BerthType::Upper,
            BerthType::SideLower,
            BerthType::SideUpper,
        ];
        for (i, berth) in expected.iter().enumerate() {
            assert_eq!(CoachClass::Ac2.berth_type(i as u32 + 1), *berth);
        }
    }

    #[test]
    fn ac2_has_no_middle() {
        assert!((1..=48).all(|n| CoachClass::Ac2.berth_type(n) != BerthType::Middle));
    }

    #[test]
    fn unknown_class_is_window() {
        let class = CoachClass::parse("Chair Car").unwrap();
        assert_eq!(class, CoachClass::Other("Chair Car".to_string()));
        assert_eq!(class.berth_type(3), BerthType::Window);
        assert_eq!(class.berth_cycle(), None);
    }

    #[test]
    fn class_parsing() {
        assert_eq!(CoachClass::parse("sleeper").unwrap(), CoachClass::Sleeper);
        assert_eq!(CoachClass::parse("SL").unwrap(), CoachClass::Sleeper);
        assert_eq!(CoachClass::parse("3A").unwrap(), CoachClass::Ac3);
        assert_eq!(CoachClass::parse(" ac2 ").unwrap(), CoachClass::Ac2);
        assert_eq!(CoachClass::parse("1a").unwrap(), CoachClass::Ac1);
        assert!(CoachClass::parse("  ").is_err());
    }

    #[test]
    fn berth_parsing() {
        assert_eq!(BerthType::parse("lower").unwrap(), BerthType::Lower);
        assert_eq!(BerthType::parse("Side-Upper").unwrap(), BerthType::SideUpper);
        assert_eq!(BerthType::parse(" WINDOW ").unwrap(), BerthType::Window);
        assert!(BerthType::parse("").is_err());
        assert!(BerthType::parse("SIDE").is_err());
    }

    #[test]
    fn berth_serde_uses_tokens() {
        assert_eq!(
            serde_json::to_string(&BerthType::SideLower).unwrap(),
            "\"SIDE_LOWER\""
        );
        let parsed: BerthType = serde_json::from_str("\"Side Lower\"").unwrap();
        assert_eq!(parsed, BerthType::SideLower);
    }

    #[test]
    fn labels_and_tokens() {
        assert_eq!(BerthType::SideUpper.to_string(), "Side Upper");
        assert_eq!(BerthType::SideUpper.as_token(), "SIDE_UPPER");
        for berth in BerthType::ALL {
            assert_eq!(BerthType::parse(berth.label()).unwrap(), berth);
            assert_eq!(BerthType::parse(berth.as_token()).unwrap(), berth);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn class_strategy() -> impl Strategy<Value = CoachClass> {
        prop_oneof![
            Just(CoachClass::Sleeper),
            Just(CoachClass::Ac3),
            Just(CoachClass::Ac2),
            Just(CoachClass::Ac1),
            "[A-Z][a-z]{2,8}".prop_map(CoachClass::Other),
        ]
    }

    proptest! {
        /// Berth derivation repeats with the class cycle
        #[test]
        fn derivation_is_periodic(class in class_strategy(), n in 1u32..10_000) {
            if let Some(cycle) = class.berth_cycle() {
                prop_assert_eq!(class.berth_type(n), class.berth_type(n + cycle));
            }
        }

        /// Sleeper seats 1, 9, 17, ... are always lower berths
        #[test]
        fn sleeper_bay_starts_lower(k in 0u32..1000) {
            prop_assert_eq!(CoachClass::Sleeper.berth_type(8 * k + 1), BerthType::Lower);
            prop_assert_eq!(CoachClass::Ac3.berth_type(8 * k + 1), BerthType::Lower);
        }

        #[test]
        fn ac1_is_always_cabin(n in 1u32..10_000) {
            prop_assert_eq!(CoachClass::Ac1.berth_type(n), BerthType::Cabin);
        }
    }
}
