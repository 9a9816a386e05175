//! Confirmed-seat ledger.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::allocator::{BookingResult, Preference, allocate};
use crate::domain::CoachClass;
use crate::inventory::Fleet;

/// Occupancy is tracked per coach per journey date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoachKey {
    pub train_number: String,
    pub journey_date: NaiveDate,
    pub coach: String,
}

impl CoachKey {
    pub fn new(train_number: &str, journey_date: NaiveDate, coach: &str) -> Self {
        Self {
            train_number: train_number.to_string(),
            journey_date,
            coach: coach.to_string(),
        }
    }
}

/// Errors from ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown train {0}")]
    UnknownTrain(String),

    #[error("train {train} has no {class} coaches")]
    NoCoaches { train: String, class: CoachClass },

    #[error("train {train} has no coach {coach}")]
    UnknownCoach { train: String, coach: String },

    #[error("seat {seat} is outside coach {coach}")]
    SeatOutOfRange { coach: String, seat: u32 },

    /// Cancelling a seat that holds no confirmed booking
    #[error("seat {seat} in coach {coach} is not booked")]
    SeatNotHeld { coach: String, seat: u32 },
}

/// The outcome of a ledger booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerBooking {
    /// Coach holding the seat, unset when waitlisted.
    pub coach: Option<String>,
    pub result: BookingResult,
}

/// Thread-safe record of confirmed seats.
///
/// Every booking reads occupancy, allocates and records the seat under one
/// write lock, so two confirmed bookings for the same train and date can
/// never share a seat.
#[derive(Clone)]
pub struct SeatLedger {
    fleet: Arc<Fleet>,
    inner: Arc<RwLock<HashMap<CoachKey, HashSet<u32>>>>,
}

impl SeatLedger {
    pub fn new(fleet: Arc<Fleet>) -> Self {
        Self {
            fleet,
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Book one seat of `class` on a train.
    ///
    /// Coaches of the class are tried in composition order; the first one
    /// with a free seat wins. When all are full the booking is waitlisted
    /// and nothing is recorded.
    pub async fn book(
        &self,
        train_number: &str,
        journey_date: NaiveDate,
        class: &CoachClass,
        preference: Preference,
    ) -> Result<LedgerBooking, LedgerError> {
        let train = self
            .fleet
            .train(train_number)
            .ok_or_else(|| LedgerError::UnknownTrain(train_number.to_string()))?;

        let coaches: Vec<_> = train.coaches_of(class).collect();
        if coaches.is_empty() {
            return Err(LedgerError::NoCoaches {
                train: train_number.to_string(),
                class: class.clone(),
            });
        }

        let mut guard = self.inner.write().await;
        for coach in coaches {
            let key = CoachKey::new(train_number, journey_date, &coach.name);
            let occupied = guard.entry(key).or_default();

            let result = allocate(&coach.layout, occupied, preference);
            if let Some(seat_number) = result.seat_number {
                occupied.insert(seat_number);
                info!(
                    train = train_number,
                    date = %journey_date,
                    coach = %coach.name,
                    seat_number,
                    "seat confirmed"
                );
                return Ok(LedgerBooking {
                    coach: Some(coach.name.clone()),
                    result,
                });
            }
            debug!(coach = %coach.name, "coach full");
        }

        info!(train = train_number, date = %journey_date, %class, "booking waitlisted");
        Ok(LedgerBooking {
            coach: None,
            result: BookingResult::waitlisted(),
        })
    }

    /// Release a confirmed seat.
    pub async fn cancel(&self, key: &CoachKey, seat_number: u32) -> Result<(), LedgerError> {
        let coach = self
            .fleet
            .coach(&key.train_number, &key.coach)
            .ok_or_else(|| self.missing_coach(key))?;
        if !coach.layout.contains(seat_number) {
            return Err(LedgerError::SeatOutOfRange {
                coach: key.coach.clone(),
                seat: seat_number,
            });
        }

        let mut guard = self.inner.write().await;
        let released = guard
            .get_mut(key)
            .is_some_and(|occupied| occupied.remove(&seat_number));
        if !released {
            return Err(LedgerError::SeatNotHeld {
                coach: key.coach.clone(),
                seat: seat_number,
            });
        }

        info!(
            train = %key.train_number,
            date = %key.journey_date,
            coach = %key.coach,
            seat_number,
            "seat released"
        );
        Ok(())
    }

    /// Confirmed seat numbers in one coach, ascending.
    pub async fn occupied(&self, key: &CoachKey) -> Vec<u32> {
        let guard = self.inner.read().await;
        let mut seats: Vec<u32> = guard
            .get(key)
            .map(|occupied| occupied.iter().copied().collect())
            .unwrap_or_default();
        seats.sort_unstable();
        seats
    }

    /// Seats of `class` still free on a train for a date.
    pub async fn available(
        &self,
        train_number: &str,
        journey_date: NaiveDate,
        class: &CoachClass,
    ) -> Result<u32, LedgerError> {
        let train = self
            .fleet
            .train(train_number)
            .ok_or_else(|| LedgerError::UnknownTrain(train_number.to_string()))?;

        let guard = self.inner.read().await;
        let free = train
            .coaches_of(class)
            .map(|coach| {
                let key = CoachKey::new(train_number, journey_date, &coach.name);
                let taken = guard.get(&key).map_or(0, HashSet::len);
                coach.layout.total_berths() - taken as u32
            })
            .sum();
        Ok(free)
    }

    fn missing_coach(&self, key: &CoachKey) -> LedgerError {
        if self.fleet.train(&key.train_number).is_none() {
            LedgerError::UnknownTrain(key.train_number.clone())
        } else {
            LedgerError::UnknownCoach {
                train: key.train_number.clone(),
                coach: key.coach.clone(),
            }
        }
    }
}
