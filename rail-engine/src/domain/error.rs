//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from business outcomes such as a full coach or an
//! unreachable station, which are ordinary return values.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Berth token that names no known berth type
    #[error("unknown berth type: {0:?}")]
    UnknownBerth(String),

    /// Blank coach class name
    #[error("coach class must not be empty")]
    EmptyCoachClass,

    /// Seat range that cannot describe a coach
    #[error("invalid coach layout: {0}")]
    InvalidLayout(&'static str),

    /// Train registered twice in the same fleet
    #[error("train {0} is already registered")]
    DuplicateTrain(String),
}
