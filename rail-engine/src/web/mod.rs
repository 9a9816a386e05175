//! Web layer for the booking engine.
//!
//! Provides JSON endpoints for seat allocation, bookings and route search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
