//! Application state for the web layer.

use std::sync::Arc;

use crate::booking::SeatLedger;
use crate::routing::SearchConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Confirmed seats and the fleet they belong to
    pub ledger: SeatLedger,

    /// Route search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(ledger: SeatLedger, config: SearchConfig) -> Self {
        Self {
            ledger,
            config: Arc::new(config),
        }
    }
}
