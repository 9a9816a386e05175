//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::allocator::{BookingStatus, SeatReport};
use crate::domain::{MinuteOfDay, TimeError};
use crate::inventory::{Coach, SeatRecord, Train};
use crate::routing::{PathResult, RouteEdge, TimetableRow};

/// Request to allocate a seat without touching the ledger.
#[derive(Debug, Deserialize)]
pub struct AllocateSeatRequest {
    /// Seat numbers already confirmed in the coach
    #[serde(default)]
    pub occupied_seat_numbers: Vec<i64>,

    /// How many entries of `occupied_seat_numbers` to read (defaults to all)
    pub occupied_count: Option<usize>,

    pub total_seats: i64,

    /// Seat id of seat number 1
    pub start_seat_id: i64,

    /// Berth token or `ANY` (defaults to `ANY`)
    pub preference: Option<String>,

    /// Coach class name (defaults to Sleeper)
    pub coach_class: Option<String>,
}

/// A time given either as minutes since midnight or as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Minutes(i64),
    Clock(String),
}

impl TimeValue {
    /// Minutes since midnight.
    ///
    /// Clock strings are validated here; plain minute counts are validated
    /// when the segment is built.
    pub fn to_minutes(&self) -> Result<i64, TimeError> {
        match self {
            TimeValue::Minutes(m) => Ok(*m),
            TimeValue::Clock(s) => MinuteOfDay::parse_hhmm(s).map(|t| i64::from(t.minutes())),
        }
    }
}

/// One timetable row in a fastest-path request.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRow {
    pub from: String,
    pub to: String,
    pub departure: Option<TimeValue>,
    pub arrival: Option<TimeValue>,
}

impl RouteRow {
    pub fn to_timetable_row(&self) -> Result<TimetableRow, TimeError> {
        Ok(TimetableRow::new(
            self.from.as_str(),
            self.to.as_str(),
            self.departure.as_ref().map(TimeValue::to_minutes).transpose()?,
            self.arrival.as_ref().map(TimeValue::to_minutes).transpose()?,
        ))
    }
}

/// Request for the fastest route over a supplied timetable.
#[derive(Debug, Deserialize)]
pub struct FastestPathRequest {
    pub origin: String,
    pub destination: String,

    #[serde(default)]
    pub rows: Vec<RouteRow>,
}

/// One leg of a found route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
}

impl LegResult {
    pub fn from_edge(edge: &RouteEdge) -> Self {
        Self {
            from: edge.from.to_string(),
            to: edge.to.to_string(),
            departure: edge.departure.to_string(),
            arrival: edge.arrival.to_string(),
        }
    }
}

/// Response for a fastest-path request.
#[derive(Debug, Serialize)]
pub struct FastestPathResponse {
    /// `FOUND`, `NO_PATH` or `SAME_STATION`
    pub outcome: &'static str,

    /// Human-readable summary
    pub description: String,

    pub legs: Vec<LegResult>,

    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration_mins: Option<i64>,

    /// Rows dropped because they could not form a segment
    pub skipped_rows: usize,
}

impl FastestPathResponse {
    pub fn from_result(result: &PathResult, skipped_rows: usize) -> Self {
        let itinerary = result.itinerary();
        Self {
            outcome: result.outcome(),
            description: result.to_string(),
            legs: itinerary
                .map(|i| i.legs().iter().map(LegResult::from_edge).collect())
                .unwrap_or_default(),
            departure: itinerary.map(|i| i.departure().to_string()),
            arrival: itinerary.map(|i| i.arrival().to_string()),
            duration_mins: itinerary.map(|i| i.duration().num_minutes()),
            skipped_rows,
        }
    }
}

/// Request to book a seat through the ledger.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub train_number: String,

    /// Journey date as `YYYY-MM-DD`
    pub journey_date: String,

    /// Coach class name (defaults to Sleeper)
    pub coach_class: Option<String>,

    /// Berth token or `ANY` (defaults to `ANY`)
    pub preference: Option<String>,
}

/// Response for a booking.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub train_number: String,
    pub journey_date: String,

    /// Coach holding the seat, absent when waitlisted
    pub coach: Option<String>,

    #[serde(flatten)]
    pub seat: SeatReport,
}

/// Request to release a booked seat.
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub train_number: String,
    pub journey_date: String,
    pub coach: String,
    pub seat_number: u32,
}

/// Response for a cancellation.
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub train_number: String,
    pub journey_date: String,
    pub coach: String,
    pub seat_number: u32,
    pub released: bool,
}

/// Query for remaining capacity.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub train_number: String,
    pub journey_date: String,

    /// Coach class name (defaults to Sleeper)
    pub coach_class: Option<String>,
}

/// Remaining capacity of one class.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub train_number: String,
    pub journey_date: String,
    pub coach_class: String,
    pub available: u32,

    /// `CNF` while seats remain, otherwise `WL`
    pub status: BookingStatus,
}

/// A coach in the train list.
#[derive(Debug, Serialize)]
pub struct CoachResult {
    pub id: u32,
    pub name: String,
    pub coach_class: String,
    pub total_berths: u32,
    pub start_seat_id: i64,
}

impl CoachResult {
    pub fn from_coach(coach: &Coach) -> Self {
        Self {
            id: coach.id,
            name: coach.name.clone(),
            coach_class: coach.layout.class().to_string(),
            total_berths: coach.layout.total_berths(),
            start_seat_id: coach.layout.start_id(),
        }
    }
}

/// A train in the train list.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    pub number: String,
    pub name: String,
    pub base_fare: u32,
    pub coaches: Vec<CoachResult>,
}

impl TrainResult {
    pub fn from_train(train: &Train) -> Self {
        Self {
            number: train.number.clone(),
            name: train.name.clone(),
            base_fare: train.base_fare,
            coaches: train.coaches.iter().map(CoachResult::from_coach).collect(),
        }
    }
}

/// Response listing every train.
#[derive(Debug, Serialize)]
pub struct TrainsResponse {
    pub trains: Vec<TrainResult>,
}

/// Response listing every seat of one train.
#[derive(Debug, Serialize)]
pub struct SeatsResponse {
    pub train_number: String,
    pub seats: Vec<SeatRecord>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
