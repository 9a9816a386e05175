//! Time-dependent earliest-arrival search.
//!
//! The graph is a directed multigraph of scheduled segments. A segment can
//! only be taken by a rider already standing at its origin by its departure
//! minute, so plain shortest-path over edge weights does not apply. Instead
//! a Dijkstra variant keys every station by its best known arrival time and
//! settles stations in arrival order.
//!
//! A graph is meant to be built from the current timetable, queried, and
//! dropped. Concurrent requests should each build their own.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace, warn};

use super::config::SearchConfig;
use super::edge::{EdgeError, RouteEdge, TimetableRow};
use super::path::{Itinerary, PathResult};
use crate::domain::{InvalidStationCode, MinuteOfDay, StationCode};

/// Error from a fastest-path query.
///
/// Unreachable destinations are not errors; they yield [`PathResult::NoPath`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid {role} station: {source}")]
    InvalidStation {
        role: &'static str,
        #[source]
        source: InvalidStationCode,
    },

    /// Station absent from every segment of a non-empty graph
    #[error("station {0} is not served by any route")]
    UnknownStation(StationCode),
}

/// How early a rider can be at a station.
///
/// `Origin` sorts before every concrete minute: the rider starts there with
/// no prior constraint and may catch any departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Reach {
    Origin,
    At(MinuteOfDay),
}

impl Reach {
    fn can_board(self, departure: MinuteOfDay, min_connection: u16) -> bool {
        match self {
            Reach::Origin => true,
            Reach::At(arrival) => {
                u32::from(departure.minutes())
                    >= u32::from(arrival.minutes()) + u32::from(min_connection)
            }
        }
    }
}

/// Outgoing segment with its endpoint already resolved to a station index.
#[derive(Debug, Clone, Copy)]
struct Link {
    edge: usize,
    target: usize,
}

/// Directed multigraph of scheduled segments.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    config: SearchConfig,
    stations: Vec<StationCode>,
    index: HashMap<StationCode, usize>,
    edges: Vec<RouteEdge>,
    /// Edge origin per edge, parallel to `edges`.
    sources: Vec<usize>,
    outgoing: Vec<Vec<Link>>,
}

impl RouteGraph {
    /// Create an empty graph with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Discard every station and segment, keeping the configuration.
    pub fn reset(&mut self) {
        self.stations.clear();
        self.index.clear();
        self.edges.clear();
        self.sources.clear();
        self.outgoing.clear();
    }

    /// Register one scheduled segment from raw values.
    ///
    /// Parallel segments between the same pair are all kept. A rejected
    /// segment leaves the graph untouched.
    ///
    /// ```
    /// use rail_engine::routing::RouteGraph;
    ///
    /// let mut graph = RouteGraph::new();
    /// graph.add_edge("A", "B", 600, 660).unwrap();
    /// graph.add_edge("A", "B", 900, 960).unwrap();
    /// assert_eq!(graph.edge_count(), 2);
    ///
    /// // Arrival before departure is refused
    /// assert!(graph.add_edge("B", "C", 1380, 60).is_err());
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        departure: i64,
        arrival: i64,
    ) -> Result<(), EdgeError> {
        let edge = RouteEdge::parse(from, to, departure, arrival)?;
        self.insert(edge)
    }

    /// Register a validated segment.
    pub fn insert(&mut self, edge: RouteEdge) -> Result<(), EdgeError> {
        if self.edges.len() >= self.config.max_edges {
            return Err(EdgeError::CapacityExceeded(self.config.max_edges));
        }

        let source = self.intern(&edge.from);
        let target = self.intern(&edge.to);
        let id = self.edges.len();

        self.outgoing[source].push(Link { edge: id, target });
        self.sources.push(source);
        self.edges.push(edge);
        Ok(())
    }

    /// Register one timetable row.
    pub fn add_row(&mut self, row: &TimetableRow) -> Result<(), EdgeError> {
        self.insert(row.to_edge()?)
    }

    /// Register many rows, skipping bad ones with a warning.
    ///
    /// Returns the number of rows skipped. One bad row never aborts the
    /// build.
    pub fn extend_from_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a TimetableRow>) -> usize {
        let mut skipped = 0;
        for row in rows {
            if let Err(e) = self.add_row(row) {
                warn!(from = %row.from, to = %row.to, error = %e, "skipping timetable row");
                skipped += 1;
            }
        }
        skipped
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains_station(&self, station: &StationCode) -> bool {
        self.index.contains_key(station)
    }

    pub fn edges(&self) -> &[RouteEdge] {
        &self.edges
    }

    /// Earliest-arrival path between two raw station codes.
    ///
    /// ```
    /// use rail_engine::routing::{PathResult, RouteGraph};
    ///
    /// let mut graph = RouteGraph::new();
    /// graph.add_edge("A", "B", 600, 660).unwrap();
    /// graph.add_edge("B", "C", 700, 760).unwrap();
    ///
    /// let result = graph.fastest_path("A", "C").unwrap();
    /// assert_eq!(result.itinerary().unwrap().arrival().minutes(), 760);
    ///
    /// assert!(matches!(graph.fastest_path("C", "A").unwrap(), PathResult::NoPath { .. }));
    /// assert!(matches!(graph.fastest_path("B", "B").unwrap(), PathResult::SameStation(_)));
    /// ```
    pub fn fastest_path(&self, origin: &str, destination: &str) -> Result<PathResult, QueryError> {
        let origin = StationCode::parse(origin).map_err(|source| QueryError::InvalidStation {
            role: "origin",
            source,
        })?;
        let destination =
            StationCode::parse(destination).map_err(|source| QueryError::InvalidStation {
                role: "destination",
                source,
            })?;
        self.fastest_path_between(&origin, &destination)
    }

    /// Earliest-arrival path between two stations.
    ///
    /// The rider may leave `origin` on any segment regardless of its
    /// departure time. Among segments arriving at a station at the same
    /// minute, the one departing latest is kept.
    pub fn fastest_path_between(
        &self,
        origin: &StationCode,
        destination: &StationCode,
    ) -> Result<PathResult, QueryError> {
        if origin == destination {
            return Ok(PathResult::SameStation(origin.clone()));
        }

        let no_path = || PathResult::NoPath {
            origin: origin.clone(),
            destination: destination.clone(),
        };

        if self.is_empty() {
            return Ok(no_path());
        }

        let from = self.lookup(origin)?;
        let to = self.lookup(destination)?;

        let legs = self.earliest_arrival(from, to);
        Ok(legs.and_then(Itinerary::new).map_or_else(no_path, PathResult::Found))
    }

    fn lookup(&self, station: &StationCode) -> Result<usize, QueryError> {
        self.index
            .get(station)
            .copied()
            .ok_or_else(|| QueryError::UnknownStation(station.clone()))
    }

    fn intern(&mut self, station: &StationCode) -> usize {
        if let Some(&idx) = self.index.get(station) {
            return idx;
        }
        let idx = self.stations.len();
        self.stations.push(station.clone());
        self.index.insert(station.clone(), idx);
        self.outgoing.push(Vec::new());
        idx
    }

    /// Run the search and return the chosen legs, or `None` if unreachable.
    fn earliest_arrival(&self, origin: usize, destination: usize) -> Option<Vec<RouteEdge>> {
        let n = self.stations.len();
        let min_connection = self.config.min_connection_mins;

        let mut best: Vec<Option<Reach>> = vec![None; n];
        let mut via: Vec<Option<usize>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap: BinaryHeap<Reverse<(Reach, usize)>> = BinaryHeap::new();

        best[origin] = Some(Reach::Origin);
        heap.push(Reverse((Reach::Origin, origin)));

        let mut settled_count = 0usize;
        let mut relaxed = 0usize;
        let mut arrived: Option<Reach> = None;

        while let Some(Reverse((reach, station))) = heap.pop() {
            if settled[station] || best[station] != Some(reach) {
                continue;
            }
            // Stations reached at the destination's time can still offer it
            // a later-departing final leg.
            if arrived.is_some_and(|done| reach > done) {
                break;
            }
            settled[station] = true;
            settled_count += 1;

            if station == destination {
                arrived = Some(reach);
                continue;
            }

            for link in &self.outgoing[station] {
                let edge = &self.edges[link.edge];
                if !reach.can_board(edge.departure, min_connection) {
                    continue;
                }
                relaxed += 1;

                let candidate = Reach::At(edge.arrival);
                match best[link.target] {
                    Some(current) if candidate > current => {}
                    Some(current) if candidate == current => {
                        // Equal arrival: keep the later departure, unless the
                        // swap would route the target through itself.
                        let later = via[link.target]
                            .is_some_and(|prev| edge.departure > self.edges[prev].departure);
                        if later && !self.passes_through(&via, station, link.target) {
                            trace!(
                                station = %self.stations[link.target],
                                departure = %edge.departure,
                                "tie on arrival, preferring later departure"
                            );
                            via[link.target] = Some(link.edge);
                        }
                    }
                    _ => {
                        best[link.target] = Some(candidate);
                        via[link.target] = Some(link.edge);
                        heap.push(Reverse((candidate, link.target)));
                    }
                }
            }
        }

        debug!(
            origin = %self.stations[origin],
            destination = %self.stations[destination],
            settled = settled_count,
            relaxed,
            reached = best[destination].is_some(),
            "route search finished"
        );

        if best[destination].is_none() {
            return None;
        }
        self.reconstruct(&via, origin, destination)
    }

    /// Whether the predecessor chain from `start` reaches `target`.
    fn passes_through(&self, via: &[Option<usize>], start: usize, target: usize) -> bool {
        let mut current = start;
        for _ in 0..self.stations.len() {
            if current == target {
                return true;
            }
            match via[current] {
                Some(edge) => current = self.sources[edge],
                None => return false,
            }
        }
        true
    }

    fn reconstruct(
        &self,
        via: &[Option<usize>],
        origin: usize,
        destination: usize,
    ) -> Option<Vec<RouteEdge>> {
        let mut legs = Vec::new();
        let mut current = destination;

        while current != origin {
            let edge = via[current]?;
            legs.push(self.edges[edge].clone());
            current = self.sources[edge];
            if legs.len() > self.stations.len() {
                return None;
            }
        }

        legs.reverse();
        Some(legs)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod graph_tests;
