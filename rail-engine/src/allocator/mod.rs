//! Seat allocation.
//!
//! Given a coach's seat range, the seat numbers already confirmed for a
//! journey date and a rider preference, picks one free seat or signals the
//! waitlist. Allocation is a pure function of its inputs: it holds no
//! state and never mutates the occupancy it is given. Keeping concurrent
//! bookings apart is the caller's job (see [`crate::booking`]).

mod allocate;
mod boundary;
mod preference;

pub use allocate::{BookingResult, BookingStatus, allocate};
pub use boundary::{AllocationError, SeatReport, find_best_seat};
pub use preference::{InvalidPreference, Preference};
