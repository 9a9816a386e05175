//! Text-token entry point for callers outside the crate.
//!
//! Callers that read occupancy straight from storage hand over raw integers
//! and a preference token. This layer validates them, runs [`allocate`],
//! and flattens the result into a record of plain strings.

use std::collections::HashSet;

use serde::Serialize;

use super::preference::InvalidPreference;
use super::{BookingResult, BookingStatus, Preference, allocate};
use crate::domain::{CoachClass, CoachLayout, DomainError};

/// Marker used for the seat number and berth of a waitlisted result.
const WAITLIST_MARKER: &str = "WL";

/// Contract violations rejected before any seat is chosen.
///
/// A full coach is not an error: it yields a waitlisted report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error(transparent)]
    Layout(#[from] DomainError),

    #[error("occupied count {count} exceeds the {supplied} seat numbers supplied")]
    OccupiedCountOutOfRange { count: usize, supplied: usize },

    #[error("occupied seat number {seat} is outside 1..={total}")]
    SeatOutOfRange { seat: i64, total: u32 },

    #[error(transparent)]
    Preference(#[from] InvalidPreference),
}

/// Flattened allocation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatReport {
    /// Assigned seat id, `None` when waitlisted.
    pub seat_id: Option<i64>,

    pub status: BookingStatus,

    /// Seat number as text, or `WL`.
    pub seat_number: String,

    /// Berth token such as `SIDE_LOWER`, or `WL`.
    pub berth_type: String,
}

impl From<&BookingResult> for SeatReport {
    fn from(result: &BookingResult) -> Self {
        Self {
            seat_id: result.seat_id,
            status: result.status,
            seat_number: result
                .seat_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| WAITLIST_MARKER.to_string()),
            berth_type: result
                .berth_type
                .map(|b| b.as_token().to_string())
                .unwrap_or_else(|| WAITLIST_MARKER.to_string()),
        }
    }
}

/// Find the best seat from raw inputs.
///
/// Only the first `occupied_count` entries of `occupied_seat_numbers` are
/// read. Every one of them must be a seat number of the coach.
///
/// ```
/// use rail_engine::allocator::{BookingStatus, find_best_seat};
/// use rail_engine::domain::CoachClass;
///
/// let report = find_best_seat(&[1, 4], 2, 72, 301, "LOWER", &CoachClass::Sleeper).unwrap();
/// assert_eq!(report.status, BookingStatus::Confirmed);
/// assert_eq!(report.seat_number, "9");
/// assert_eq!(report.seat_id, Some(309));
/// assert_eq!(report.berth_type, "LOWER");
///
/// assert!(find_best_seat(&[], 0, -1, 1, "ANY", &CoachClass::Sleeper).is_err());
/// ```
pub fn find_best_seat(
    occupied_seat_numbers: &[i64],
    occupied_count: usize,
    total_seats: i64,
    start_seat_id: i64,
    preference: &str,
    class: &CoachClass,
) -> Result<SeatReport, AllocationError> {
    let preference = Preference::parse(preference)?;
    let layout = CoachLayout::new(class.clone(), total_seats, start_seat_id)?;

    let supplied = occupied_seat_numbers.get(..occupied_count).ok_or(
        AllocationError::OccupiedCountOutOfRange {
            count: occupied_count,
            supplied: occupied_seat_numbers.len(),
        },
    )?;

    let occupied = supplied
        .iter()
        .map(|&seat| {
            u32::try_from(seat)
                .ok()
                .filter(|n| layout.contains(*n))
                .ok_or(AllocationError::SeatOutOfRange {
                    seat,
                    total: layout.total_berths(),
                })
        })
        .collect::<Result<HashSet<u32>, _>>()?;

    Ok(SeatReport::from(&allocate(&layout, &occupied, preference)))
}
