//! Trains, coaches and their seat ranges.
//!
//! A [`Fleet`] owns every train and assigns coach ids and seat ids
//! contiguously from 1 as trains are added, so each coach owns one
//! unbroken block of seat ids. Berth types are never stored; they are
//! derived from the coach class whenever a seat is listed.

use serde::Serialize;

use crate::domain::{BerthType, CoachClass, CoachLayout, DomainError};

/// One coach of a train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub id: u32,
    pub train_number: String,
    /// Coach name within the train, such as `S1` or `B2`.
    pub name: String,
    pub layout: CoachLayout,
}

impl Coach {
    /// Every seat of this coach, by seat number.
    pub fn seat_records(&self) -> impl Iterator<Item = SeatRecord> + '_ {
        self.layout.seat_numbers().map(move |seat_number| SeatRecord {
            seat_id: self.layout.start_id() + i64::from(seat_number) - 1,
            coach_id: self.id,
            seat_number,
            berth_type: self.layout.berth_type(seat_number),
        })
    }
}

/// A train and its composition, in boarding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub number: String,
    pub name: String,
    /// Base fare in whole rupees.
    pub base_fare: u32,
    pub coaches: Vec<Coach>,
}

impl Train {
    /// Total berths over every coach.
    pub fn total_berths(&self) -> u32 {
        self.coaches.iter().map(|c| c.layout.total_berths()).sum()
    }

    /// Coaches of one class, in composition order.
    pub fn coaches_of<'a>(&'a self, class: &CoachClass) -> impl Iterator<Item = &'a Coach> {
        self.coaches
            .iter()
            .filter(move |coach| coach.layout.class() == class)
    }

    pub fn coach(&self, name: &str) -> Option<&Coach> {
        self.coaches.iter().find(|coach| coach.name == name)
    }

    /// Every seat of the train, ordered by seat id.
    pub fn seat_records(&self) -> impl Iterator<Item = SeatRecord> + '_ {
        self.coaches.iter().flat_map(|coach| coach.seat_records())
    }
}

/// One seat as a storage layer would list it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRecord {
    pub seat_id: i64,
    pub coach_id: u32,
    pub seat_number: u32,
    pub berth_type: BerthType,
}

/// Every train the booking service knows about.
#[derive(Debug, Clone)]
pub struct Fleet {
    trains: Vec<Train>,
    next_coach_id: u32,
    next_seat_id: i64,
}

impl Fleet {
    /// Create an empty fleet.
    pub fn new() -> Self {
        Self {
            trains: Vec::new(),
            next_coach_id: 1,
            next_seat_id: 1,
        }
    }

    /// The demo fleet: three trains with the standard composition.
    pub fn standard() -> Self {
        let mut fleet = Self::new();
        for (number, name, fare) in STANDARD_TRAINS {
            fleet
                .add_train(number, name, fare, &standard_composition())
                .expect("standard train numbers are distinct");
        }
        fleet
    }

    /// Register a train, assigning ids to its coaches and seats.
    ///
    /// `composition` lists (coach name, class, berth count) in boarding
    /// order.
    ///
    /// ```
    /// use rail_engine::domain::CoachClass;
    /// use rail_engine::inventory::Fleet;
    ///
    /// let mut fleet = Fleet::new();
    /// fleet
    ///     .add_train("12001", "Shatabdi Express", 800, &[("C1", CoachClass::Ac3, 64)])
    ///     .unwrap();
    /// fleet
    ///     .add_train("12859", "Gitanjali Express", 650, &[("S1", CoachClass::Sleeper, 72)])
    ///     .unwrap();
    ///
    /// let s1 = &fleet.train("12859").unwrap().coaches[0];
    /// assert_eq!(s1.id, 2);
    /// assert_eq!(s1.layout.start_id(), 65);
    /// ```
    pub fn add_train(
        &mut self,
        number: &str,
        name: &str,
        base_fare: u32,
        composition: &[(&str, CoachClass, u32)],
    ) -> Result<&Train, DomainError> {
        if self.train(number).is_some() {
            return Err(DomainError::DuplicateTrain(number.to_string()));
        }

        let mut next_coach_id = self.next_coach_id;
        let mut next_seat_id = self.next_seat_id;
        let mut coaches = Vec::with_capacity(composition.len());

        for (coach_name, class, berths) in composition {
            let layout = CoachLayout::new(class.clone(), i64::from(*berths), next_seat_id)?;
            coaches.push(Coach {
                id: next_coach_id,
                train_number: number.to_string(),
                name: coach_name.to_string(),
                layout,
            });
            next_coach_id += 1;
            next_seat_id += i64::from(*berths);
        }

        self.next_coach_id = next_coach_id;
        self.next_seat_id = next_seat_id;
        self.trains.push(Train {
            number: number.to_string(),
            name: name.to_string(),
            base_fare,
            coaches,
        });
        Ok(&self.trains[self.trains.len() - 1])
    }

    pub fn train(&self, number: &str) -> Option<&Train> {
        self.trains.iter().find(|train| train.number == number)
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Coaches of one class on a train, in composition order.
    ///
    /// Empty if the train is unknown.
    pub fn coaches_of(&self, train_number: &str, class: &CoachClass) -> Vec<&Coach> {
        self.train(train_number)
            .map(|train| train.coaches_of(class).collect())
            .unwrap_or_default()
    }

    pub fn coach(&self, train_number: &str, coach_name: &str) -> Option<&Coach> {
        self.train(train_number)?.coach(coach_name)
    }

    /// Total berths over every train.
    pub fn total_berths(&self) -> u32 {
        self.trains.iter().map(Train::total_berths).sum()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

const STANDARD_TRAINS: [(&str, &str, u32); 3] = [
    ("12951", "Mumbai Rajdhani", 1500),
    ("12001", "Shatabdi Express", 800),
    ("12859", "Gitanjali Express", 650),
];

/// The standard coach composition: 840 berths over 13 coaches.
pub fn standard_composition() -> Vec<(&'static str, CoachClass, u32)> {
    let sleepers = ["S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8"]
        .into_iter()
        .map(|name| (name, CoachClass::Sleeper, 72));
    let ac3 = ["B1", "B2", "B3"]
        .into_iter()
        .map(|name| (name, CoachClass::Ac3, 64));

    sleepers
        .chain(ac3)
        .chain([("A1", CoachClass::Ac2, 48), ("H1", CoachClass::Ac1, 24)])
        .collect()
}
