//! Best-seat selection.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Preference;
use crate::domain::{BerthType, CoachLayout};

/// Outcome status of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// A physical seat was assigned.
    #[serde(rename = "CNF")]
    Confirmed,

    /// No seat was free; the rider goes on the waitlist.
    #[serde(rename = "WL")]
    Waitlisted,
}

impl BookingStatus {
    pub fn as_token(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CNF",
            BookingStatus::Waitlisted => "WL",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// The allocator's answer for one request.
///
/// Ephemeral: turning a confirmed result into a ticket is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingResult {
    pub status: BookingStatus,

    /// Seat id, unset when waitlisted.
    pub seat_id: Option<i64>,

    /// 1-based seat number within the coach.
    pub seat_number: Option<u32>,

    pub berth_type: Option<BerthType>,
}

impl BookingResult {
    fn confirmed(layout: &CoachLayout, seat_number: u32) -> Self {
        Self {
            status: BookingStatus::Confirmed,
            seat_id: layout.seat_id(seat_number),
            seat_number: Some(seat_number),
            berth_type: Some(layout.berth_type(seat_number)),
        }
    }

    pub fn waitlisted() -> Self {
        Self {
            status: BookingStatus::Waitlisted,
            seat_id: None,
            seat_number: None,
            berth_type: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Pick the best free seat in a coach.
///
/// Seats are scanned in ascending number order. The lowest-numbered free
/// seat whose berth type equals the preference wins; failing that (or with
/// no preference) the lowest-numbered free seat of any type. When every
/// seat is in `occupied` the result is waitlisted.
///
/// `occupied` holds seat numbers, not ids. Numbers outside the coach are
/// ignored.
///
/// ```
/// use std::collections::HashSet;
/// use rail_engine::allocator::{Preference, allocate};
/// use rail_engine::domain::{BerthType, CoachClass, CoachLayout};
///
/// let layout = CoachLayout::new(CoachClass::Sleeper, 72, 1001).unwrap();
/// let occupied = HashSet::from([1, 2, 3]);
///
/// let result = allocate(&layout, &occupied, Preference::Berth(BerthType::Lower));
/// assert_eq!(result.seat_number, Some(4));
/// assert_eq!(result.seat_id, Some(1004));
/// ```
pub fn allocate(
    layout: &CoachLayout,
    occupied: &HashSet<u32>,
    preference: Preference,
) -> BookingResult {
    let preferred = match preference {
        Preference::Any => None,
        Preference::Berth(_) => {
            free_seats(layout, occupied).find(|&n| preference.matches(layout.berth_type(n)))
        }
    };

    match preferred.or_else(|| free_seats(layout, occupied).next()) {
        Some(seat_number) => {
            trace!(seat_number, %preference, "allocated seat");
            BookingResult::confirmed(layout, seat_number)
        }
        None => {
            trace!(total = layout.total_berths(), "coach full, waitlisting");
            BookingResult::waitlisted()
        }
    }
}

fn free_seats(layout: &CoachLayout, occupied: &HashSet<u32>) -> impl Iterator<Item = u32> {
    layout.seat_numbers().filter(move |n| !occupied.contains(n))
}
