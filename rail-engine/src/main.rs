use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rail_engine::booking::SeatLedger;
use rail_engine::config::{FleetSeed, ServerConfig};
use rail_engine::inventory::Fleet;
use rail_engine::routing::SearchConfig;
use rail_engine::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rail_engine=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    let fleet = match config.fleet {
        FleetSeed::Standard => Fleet::standard(),
        FleetSeed::Empty => Fleet::new(),
    };
    info!(
        trains = fleet.len(),
        seats = fleet.total_berths(),
        "fleet loaded"
    );

    // Build app state
    let ledger = SeatLedger::new(Arc::new(fleet));
    let state = AppState::new(ledger, SearchConfig::default());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.addr;
    info!("Rail engine listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health                  - Health check");
    info!("  GET  /api/trains              - List trains and coaches");
    info!("  GET  /api/trains/:number/seats - Seats of a train with berth types");
    info!("  POST /api/seats/allocate      - Pick a seat from given occupancy");
    info!("  GET  /api/seats/availability  - Remaining seats for a class");
    info!("  POST /api/bookings            - Book a seat");
    info!("  POST /api/bookings/cancel     - Release a seat");
    info!("  POST /api/routes/fastest      - Earliest-arrival route search");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
