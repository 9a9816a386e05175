//! Scheduled segments and the raw rows they are built from.

use chrono::Duration;

use crate::domain::{InvalidStationCode, MinuteOfDay, StationCode, TimeError};

/// Why a segment was refused at the graph boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdgeError {
    #[error(transparent)]
    Station(#[from] InvalidStationCode),

    #[error(transparent)]
    Time(#[from] TimeError),

    /// Row with a null departure or arrival
    #[error("missing {0} time")]
    MissingTime(&'static str),

    #[error("segment starts and ends at {0}")]
    SelfLoop(StationCode),

    /// Arrival earlier than departure. No overnight rollover is assumed.
    #[error("arrival {arrival} is before departure {departure}")]
    ArrivalBeforeDeparture {
        departure: MinuteOfDay,
        arrival: MinuteOfDay,
    },

    #[error("graph already holds the maximum of {0} segments")]
    CapacityExceeded(usize),
}

/// A directed, time-stamped scheduled segment.
///
/// Usable only by a rider at `from` no later than `departure`; delivers
/// them to `to` at `arrival`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteEdge {
    pub from: StationCode,
    pub to: StationCode,
    pub departure: MinuteOfDay,
    pub arrival: MinuteOfDay,
}

impl RouteEdge {
    /// Create a segment, rejecting self loops and backwards times.
    pub fn new(
        from: StationCode,
        to: StationCode,
        departure: MinuteOfDay,
        arrival: MinuteOfDay,
    ) -> Result<Self, EdgeError> {
        if from == to {
            return Err(EdgeError::SelfLoop(from));
        }
        if arrival < departure {
            return Err(EdgeError::ArrivalBeforeDeparture { departure, arrival });
        }
        Ok(Self {
            from,
            to,
            departure,
            arrival,
        })
    }

    /// Parse a segment from raw codes and minute counts.
    pub fn parse(from: &str, to: &str, departure: i64, arrival: i64) -> Result<Self, EdgeError> {
        Self::new(
            StationCode::parse(from)?,
            StationCode::parse(to)?,
            MinuteOfDay::new(departure)?,
            MinuteOfDay::new(arrival)?,
        )
    }

    /// Time spent on board.
    pub fn duration(&self) -> Duration {
        self.departure.until(self.arrival)
    }
}

/// A timetable row as the caller reads it from storage.
///
/// Times are optional because storage may hold nulls; such rows are
/// rejected when converted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimetableRow {
    pub from: String,
    pub to: String,
    pub departure: Option<i64>,
    pub arrival: Option<i64>,
}

impl TimetableRow {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        departure: Option<i64>,
        arrival: Option<i64>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            departure,
            arrival,
        }
    }

    /// Validate the row into a segment.
    pub fn to_edge(&self) -> Result<RouteEdge, EdgeError> {
        let departure = self.departure.ok_or(EdgeError::MissingTime("departure"))?;
        let arrival = self.arrival.ok_or(EdgeError::MissingTime("arrival"))?;
        RouteEdge::parse(&self.from, &self.to, departure, arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_edge() {
        let edge = RouteEdge::parse("NDLS", "AGC", 600, 720).unwrap();
        assert_eq!(edge.from.as_str(), "NDLS");
        assert_eq!(edge.to.as_str(), "AGC");
        assert_eq!(edge.duration(), Duration::minutes(120));
    }

    #[test]
    fn zero_duration_is_allowed() {
        let edge = RouteEdge::parse("A", "B", 600, 600).unwrap();
        assert_eq!(edge.duration(), Duration::zero());
    }

    #[test]
    fn rejects_backwards_times() {
        let err = RouteEdge::parse("A", "B", 1380, 120).unwrap_err();
        assert!(matches!(err, EdgeError::ArrivalBeforeDeparture { .. }));
        assert_eq!(err.to_string(), "arrival 02:00 is before departure 23:00");
    }

    #[test]
    fn rejects_self_loop() {
        let err = RouteEdge::parse("A", " A ", 600, 660).unwrap_err();
        assert!(matches!(err, EdgeError::SelfLoop(_)));
    }

    #[test]
    fn rejects_bad_codes_and_times() {
        assert!(matches!(
            RouteEdge::parse("", "B", 600, 660),
            Err(EdgeError::Station(_))
        ));
        assert!(matches!(
            RouteEdge::parse("A", "B", -5, 660),
            Err(EdgeError::Time(_))
        ));
        assert!(matches!(
            RouteEdge::parse("A", "B", 600, 1440),
            Err(EdgeError::Time(_))
        ));
    }

    #[test]
    fn row_with_missing_time_is_rejected() {
        let row = TimetableRow::new("A", "B", None, Some(660));
        assert_eq!(row.to_edge(), Err(EdgeError::MissingTime("departure")));

        let row = TimetableRow::new("A", "B", Some(600), None);
        assert_eq!(row.to_edge(), Err(EdgeError::MissingTime("arrival")));
    }

    #[test]
    fn complete_row_converts() {
        let row = TimetableRow::new("A", "B", Some(600), Some(660));
        assert_eq!(row.to_edge().unwrap(), RouteEdge::parse("A", "B", 600, 660).unwrap());
    }
}
