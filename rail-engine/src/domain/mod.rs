//! Domain types for the rail engine.
//!
//! This module contains the value types shared by seat allocation and
//! route search. All types enforce their invariants at construction time,
//! so code that receives these types can trust their validity.

mod berth;
mod coach;
mod error;
mod station;
mod time;

pub use berth::{BerthType, CoachClass};
pub use coach::CoachLayout;
pub use error::DomainError;
pub use station::{InvalidStationCode, StationCode};
pub use time::{MINUTES_PER_DAY, MinuteOfDay, TimeError, format_duration};
