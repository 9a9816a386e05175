//! Fastest-route search over a timetable.
//!
//! A [`RouteGraph`] is loaded with scheduled segments (from, to, departure,
//! arrival) and answers earliest-arrival queries between two stations. A
//! rider may only take a segment departing no earlier than their arrival
//! at its origin, plus any configured connection time.

mod config;
mod edge;
mod graph;
mod path;

pub use config::SearchConfig;
pub use edge::{EdgeError, RouteEdge, TimetableRow};
pub use graph::{QueryError, RouteGraph};
pub use path::{Itinerary, PathResult};
