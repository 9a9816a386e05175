//! Railway booking engine.
//!
//! Two independent cores behind one small JSON server: a seat allocator
//! that picks the best free berth in a coach, and a time-dependent route
//! graph that answers earliest-arrival queries over a timetable.

pub mod allocator;
pub mod booking;
pub mod config;
pub mod domain;
pub mod inventory;
pub mod routing;
pub mod web;
