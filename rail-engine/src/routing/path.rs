//! Route search results.

use std::fmt;

use chrono::Duration;

use super::RouteEdge;
use crate::domain::{MinuteOfDay, StationCode, format_duration};

/// An earliest-arrival itinerary: a non-empty chain of connecting segments.
///
/// Each leg starts where the previous one ended and departs no earlier
/// than the previous arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    legs: Vec<RouteEdge>,
}

impl Itinerary {
    /// Wrap a chain of legs. Returns `None` if there are no legs.
    pub(crate) fn new(legs: Vec<RouteEdge>) -> Option<Self> {
        if legs.is_empty() {
            return None;
        }
        Some(Self { legs })
    }

    pub fn legs(&self) -> &[RouteEdge] {
        &self.legs
    }

    fn first(&self) -> &RouteEdge {
        &self.legs[0]
    }

    fn last(&self) -> &RouteEdge {
        &self.legs[self.legs.len() - 1]
    }

    pub fn origin(&self) -> &StationCode {
        &self.first().from
    }

    pub fn destination(&self) -> &StationCode {
        &self.last().to
    }

    /// Departure from the origin.
    pub fn departure(&self) -> MinuteOfDay {
        self.first().departure
    }

    /// Arrival at the destination.
    pub fn arrival(&self) -> MinuteOfDay {
        self.last().arrival
    }

    /// Time from first departure to final arrival.
    pub fn duration(&self) -> Duration {
        self.departure().until(self.arrival())
    }

    /// Number of changes between segments.
    pub fn change_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// Stations visited, origin first.
    pub fn stations(&self) -> Vec<&StationCode> {
        std::iter::once(self.origin())
            .chain(self.legs.iter().map(|leg| &leg.to))
            .collect()
    }
}

/// The answer to a fastest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResult {
    /// Origin and destination are the same; nothing to travel.
    SameStation(StationCode),

    /// No time-feasible chain of segments reaches the destination.
    NoPath {
        origin: StationCode,
        destination: StationCode,
    },

    Found(Itinerary),
}

impl PathResult {
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            PathResult::Found(itinerary) => Some(itinerary),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    /// Short outcome token: `FOUND`, `NO_PATH` or `SAME_STATION`.
    pub fn outcome(&self) -> &'static str {
        match self {
            PathResult::SameStation(_) => "SAME_STATION",
            PathResult::NoPath { .. } => "NO_PATH",
            PathResult::Found(_) => "FOUND",
        }
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathResult::SameStation(station) => {
                write!(f, "Same station: {station} is both origin and destination.")
            }
            PathResult::NoPath {
                origin,
                destination,
            } => write!(f, "No path found from {origin} to {destination}."),
            PathResult::Found(itinerary) => {
                f.write_str("Fastest Path: ")?;
                for (i, station) in itinerary.stations().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" -> ")?;
                    }
                    write!(f, "{station}")?;
                }
                write!(
                    f,
                    " (departs {}, arrives {}, total time: {})",
                    itinerary.departure(),
                    itinerary.arrival(),
                    format_duration(itinerary.duration())
                )
            }
        }
    }
}
