//! Seat bookings against a fleet.
//!
//! The allocator is stateless; this module holds which seats are taken for
//! each train and journey date, and serializes bookings so a seat is never
//! handed out twice.

mod ledger;

pub use ledger::{CoachKey, LedgerBooking, LedgerError, SeatLedger};
