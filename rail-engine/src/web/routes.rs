//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::allocator::{
    AllocationError, BookingStatus, InvalidPreference, Preference, SeatReport, find_best_seat,
};
use crate::booking::{CoachKey, LedgerError};
use crate::domain::{CoachClass, DomainError};
use crate::routing::{PathResult, QueryError, RouteGraph, SearchConfig, TimetableRow};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/trains", get(list_trains))
        .route("/api/trains/:number/seats", get(train_seats))
        .route("/api/seats/allocate", post(allocate_seat))
        .route("/api/seats/availability", get(seat_availability))
        .route("/api/routes/fastest", post(fastest_path))
        .route("/api/bookings", post(book_seat))
        .route("/api/bookings/cancel", post(cancel_booking))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every train and its coaches.
async fn list_trains(State(state): State<AppState>) -> Json<TrainsResponse> {
    let trains = state
        .ledger
        .fleet()
        .trains()
        .iter()
        .map(TrainResult::from_train)
        .collect();
    Json(TrainsResponse { trains })
}

/// Every seat of one train with its derived berth type.
async fn train_seats(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<SeatsResponse>, AppError> {
    let fleet = state.ledger.fleet();
    let train = fleet.train(&number).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown train: {number}"),
    })?;

    Ok(Json(SeatsResponse {
        train_number: train.number.clone(),
        seats: train.seat_records().collect(),
    }))
}

/// Pick a seat from caller-supplied occupancy. Nothing is recorded.
async fn allocate_seat(body: Bytes) -> Result<Json<SeatReport>, AppError> {
    let req: AllocateSeatRequest = parse_json(&body)?;
    let class = parse_class(req.coach_class.as_deref())?;
    let occupied_count = req
        .occupied_count
        .unwrap_or(req.occupied_seat_numbers.len());

    let report = find_best_seat(
        &req.occupied_seat_numbers,
        occupied_count,
        req.total_seats,
        req.start_seat_id,
        req.preference.as_deref().unwrap_or("ANY"),
        &class,
    )?;
    Ok(Json(report))
}

/// Build a graph from the request's timetable and find the fastest route.
async fn fastest_path(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FastestPathResponse>, AppError> {
    let req: FastestPathRequest = parse_json(&body)?;

    let max_edges = state.config.max_edges;
    if req.rows.len() > max_edges {
        return Err(AppError::BadRequest {
            message: format!(
                "Timetable has {} rows; at most {max_edges} are accepted",
                req.rows.len()
            ),
        });
    }

    let config = state.config.as_ref().clone();
    let (result, skipped) = tokio::task::spawn_blocking(move || search_rows(&req, config))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("Route search failed: {e}"),
        })??;

    Ok(Json(FastestPathResponse::from_result(&result, skipped)))
}

/// Build a graph from request rows and answer the query.
///
/// Returns the result and the number of rows that were skipped.
fn search_rows(
    req: &FastestPathRequest,
    config: SearchConfig,
) -> Result<(PathResult, usize), QueryError> {
    let mut skipped = 0;
    let rows: Vec<TimetableRow> = req
        .rows
        .iter()
        .filter_map(|row| match row.to_timetable_row() {
            Ok(converted) => Some(converted),
            Err(e) => {
                warn!(from = %row.from, to = %row.to, error = %e, "skipping timetable row");
                skipped += 1;
                None
            }
        })
        .collect();

    let mut graph = RouteGraph::with_config(config);
    skipped += graph.extend_from_rows(&rows);

    let result = graph.fastest_path(&req.origin, &req.destination)?;
    info!(
        origin = %req.origin,
        destination = %req.destination,
        outcome = result.outcome(),
        segments = graph.edge_count(),
        skipped,
        "fastest path answered"
    );
    Ok((result, skipped))
}

/// Book a seat through the ledger.
async fn book_seat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BookResponse>, AppError> {
    let req: BookRequest = parse_json(&body)?;
    let date = parse_date(&req.journey_date)?;
    let class = parse_class(req.coach_class.as_deref())?;
    let preference = Preference::parse(req.preference.as_deref().unwrap_or("ANY"))?;

    let booking = state
        .ledger
        .book(&req.train_number, date, &class, preference)
        .await?;

    Ok(Json(BookResponse {
        train_number: req.train_number,
        journey_date: date.to_string(),
        coach: booking.coach,
        seat: SeatReport::from(&booking.result),
    }))
}

/// Release a booked seat.
async fn cancel_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CancelResponse>, AppError> {
    let req: CancelRequest = parse_json(&body)?;
    let date = parse_date(&req.journey_date)?;

    let key = CoachKey::new(&req.train_number, date, &req.coach);
    state.ledger.cancel(&key, req.seat_number).await?;

    Ok(Json(CancelResponse {
        train_number: req.train_number,
        journey_date: date.to_string(),
        coach: req.coach,
        seat_number: req.seat_number,
        released: true,
    }))
}

/// Remaining confirmed capacity for one class.
async fn seat_availability(
    State(state): State<AppState>,
    Query(req): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&req.journey_date)?;
    let class = parse_class(req.coach_class.as_deref())?;

    let available = state
        .ledger
        .available(&req.train_number, date, &class)
        .await?;

    Ok(Json(AvailabilityResponse {
        train_number: req.train_number,
        journey_date: date.to_string(),
        coach_class: class.to_string(),
        available,
        status: if available > 0 {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Waitlisted
        },
    }))
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "rejecting request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("Invalid journey date: {s} (expected YYYY-MM-DD)"),
    })
}

/// Parse an optional class name, defaulting to Sleeper.
fn parse_class(s: Option<&str>) -> Result<CoachClass, AppError> {
    match s {
        None => Ok(CoachClass::Sleeper),
        Some(name) => Ok(CoachClass::parse(name)?),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidPreference> for AppError {
    fn from(e: InvalidPreference) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(e: AllocationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::UnknownTrain(_)
            | LedgerError::UnknownCoach { .. }
            | LedgerError::SeatNotHeld { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            LedgerError::NoCoaches { .. } | LedgerError::SeatOutOfRange { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::booking::SeatLedger;
    use crate::domain::BerthType;
    use crate::inventory::Fleet;

    fn state() -> AppState {
        AppState::new(
            SeatLedger::new(Arc::new(Fleet::standard())),
            SearchConfig::default(),
        )
    }

    fn body(json: &str) -> Bytes {
        Bytes::from(json.to_string())
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn allocate_respects_preference() {
        let Json(report) = allocate_seat(body(
            r#"{"occupied_seat_numbers": [1, 2, 3], "total_seats": 72,
                "start_seat_id": 1001, "preference": "LOWER"}"#,
        ))
        .await
        .unwrap();

        assert_eq!(report.status, BookingStatus::Confirmed);
        assert_eq!(report.seat_number, "4");
        assert_eq!(report.seat_id, Some(1004));
        assert_eq!(report.berth_type, "LOWER");
    }

    #[tokio::test]
    async fn allocate_full_coach_waitlists() {
        let Json(report) = allocate_seat(body(
            r#"{"occupied_seat_numbers": [1, 2], "total_seats": 2,
                "start_seat_id": 1, "coach_class": "AC1"}"#,
        ))
        .await
        .unwrap();

        assert_eq!(report.status, BookingStatus::Waitlisted);
        assert_eq!(report.seat_number, "WL");
        assert_eq!(report.seat_id, None);
    }

    #[tokio::test]
    async fn allocate_rejects_bad_input() {
        let err = allocate_seat(body(r#"{"total_seats": -1, "start_seat_id": 1}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err = allocate_seat(body(
            r#"{"total_seats": 72, "start_seat_id": 1, "preference": "AISLE"}"#,
        ))
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err = allocate_seat(body("not json")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn fastest_path_found() {
        let Json(response) = fastest_path(
            State(state()),
            body(
                r#"{"origin": "A", "destination": "C", "rows": [
                    {"from": "A", "to": "B", "departure": "10:00", "arrival": 660},
                    {"from": "B", "to": "C", "departure": 700, "arrival": "12:40"},
                    {"from": "B", "to": "C", "departure": 650, "arrival": 760}
                ]}"#,
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.outcome, "FOUND");
        assert_eq!(response.arrival.as_deref(), Some("12:40"));
        assert_eq!(response.duration_mins, Some(160));
        assert_eq!(response.legs.len(), 2);
        assert_eq!(response.legs[1].departure, "11:40");
        assert_eq!(response.skipped_rows, 0);
        assert_eq!(
            response.description,
            "Fastest Path: A -> B -> C (departs 10:00, arrives 12:40, total time: 2h 40m)"
        );
    }

    #[tokio::test]
    async fn fastest_path_skips_bad_rows() {
        let Json(response) = fastest_path(
            State(state()),
            body(
                r#"{"origin": "A", "destination": "B", "rows": [
                    {"from": "A", "to": "B", "departure": null, "arrival": 660},
                    {"from": "A", "to": "B", "departure": "9am", "arrival": 660},
                    {"from": "A", "to": "B", "departure": 700, "arrival": 650}
                ]}"#,
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.outcome, "NO_PATH");
        assert_eq!(response.skipped_rows, 3);
        assert!(response.legs.is_empty());
        assert_eq!(response.description, "No path found from A to B.");
    }

    #[tokio::test]
    async fn fastest_path_same_station() {
        let Json(response) = fastest_path(
            State(state()),
            body(r#"{"origin": "X", "destination": "X"}"#),
        )
        .await
        .unwrap();
        assert_eq!(response.outcome, "SAME_STATION");
        assert_eq!(response.arrival, None);
    }

    #[tokio::test]
    async fn fastest_path_unknown_station() {
        let err = fastest_path(
            State(state()),
            body(
                r#"{"origin": "A", "destination": "Z", "rows": [
                    {"from": "A", "to": "B", "departure": 600, "arrival": 660}
                ]}"#,
            ),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn fastest_path_rejects_oversized_timetable() {
        let state = AppState::new(
            SeatLedger::new(Arc::new(Fleet::new())),
            SearchConfig::new(0, 1),
        );
        let err = fastest_path(
            State(state),
            body(
                r#"{"origin": "A", "destination": "C", "rows": [
                    {"from": "A", "to": "B", "departure": 600, "arrival": 660},
                    {"from": "B", "to": "C", "departure": 700, "arrival": 760}
                ]}"#,
            ),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn book_then_cancel() {
        let state = state();

        let Json(booked) = book_seat(
            State(state.clone()),
            body(
                r#"{"train_number": "12951", "journey_date": "2025-03-14",
                    "coach_class": "AC2", "preference": "SIDE_LOWER"}"#,
            ),
        )
        .await
        .unwrap();
        assert_eq!(booked.coach.as_deref(), Some("A1"));
        assert_eq!(booked.seat.status, BookingStatus::Confirmed);
        assert_eq!(booked.seat.seat_number, "5");
        assert_eq!(booked.seat.berth_type, "SIDE_LOWER");

        let Json(availability) = seat_availability(
            State(state.clone()),
            Query(AvailabilityQuery {
                train_number: "12951".into(),
                journey_date: "2025-03-14".into(),
                coach_class: Some("AC2".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(availability.available, 47);

        let Json(cancelled) = cancel_booking(
            State(state.clone()),
            body(
                r#"{"train_number": "12951", "journey_date": "2025-03-14",
                    "coach": "A1", "seat_number": 5}"#,
            ),
        )
        .await
        .unwrap();
        assert!(cancelled.released);

        let err = cancel_booking(
            State(state),
            body(
                r#"{"train_number": "12951", "journey_date": "2025-03-14",
                    "coach": "A1", "seat_number": 5}"#,
            ),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn booking_errors_map_to_status() {
        let err = book_seat(
            State(state()),
            body(r#"{"train_number": "99999", "journey_date": "2025-03-14"}"#),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = book_seat(
            State(state()),
            body(r#"{"train_number": "12951", "journey_date": "14/03/2025"}"#),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn lists_trains() {
        let Json(response) = list_trains(State(state())).await;
        assert_eq!(response.trains.len(), 3);
        assert_eq!(response.trains[0].number, "12951");
        assert_eq!(response.trains[0].coaches.len(), 13);
        assert_eq!(response.trains[1].coaches[0].start_seat_id, 841);
    }

    #[tokio::test]
    async fn lists_train_seats() {
        let Json(response) = train_seats(State(state()), Path("12001".into()))
            .await
            .unwrap();

        assert_eq!(response.train_number, "12001");
        assert_eq!(response.seats.len(), 840);
        assert_eq!(response.seats[0].seat_id, 841);
        assert_eq!(response.seats[0].berth_type, BerthType::Lower);

        let last = &response.seats[839];
        assert_eq!(last.seat_id, 1680);
        assert_eq!(last.seat_number, 24);
        assert_eq!(last.berth_type, BerthType::Cabin);
    }

    #[tokio::test]
    async fn seats_of_unknown_train() {
        let err = train_seats(State(state()), Path("99999".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn error_status_codes() {
        let response = AppError::NotFound {
            message: "gone".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Internal {
            message: "boom".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
