//! Coach seat ranges.

use std::ops::RangeInclusive;

use super::{BerthType, CoachClass, DomainError};

/// The seat range of one coach.
///
/// A coach owns the contiguous seat ids `start_id ..= start_id + total_berths - 1`.
/// Seat numbers are 1-based within the coach, so seat number `n` has id
/// `start_id + n - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoachLayout {
    class: CoachClass,
    total_berths: u32,
    start_id: i64,
}

impl CoachLayout {
    /// Create a layout, rejecting negative counts and ids.
    ///
    /// ```
    /// use rail_engine::domain::{CoachClass, CoachLayout};
    ///
    /// let layout = CoachLayout::new(CoachClass::Sleeper, 72, 101).unwrap();
    /// assert_eq!(layout.seat_id(1), Some(101));
    /// assert_eq!(layout.seat_id(72), Some(172));
    /// assert_eq!(layout.seat_id(73), None);
    ///
    /// assert!(CoachLayout::new(CoachClass::Sleeper, -1, 1).is_err());
    /// ```
    pub fn new(class: CoachClass, total_berths: i64, start_id: i64) -> Result<Self, DomainError> {
        if total_berths < 0 {
            return Err(DomainError::InvalidLayout(
                "total berths must not be negative",
            ));
        }
        let total_berths = u32::try_from(total_berths)
            .map_err(|_| DomainError::InvalidLayout("total berths out of range"))?;

        if start_id < 0 {
            return Err(DomainError::InvalidLayout(
                "start seat id must not be negative",
            ));
        }
        if start_id.checked_add(i64::from(total_berths)).is_none() {
            return Err(DomainError::InvalidLayout("seat id range overflows"));
        }

        Ok(Self {
            class,
            total_berths,
            start_id,
        })
    }

    pub fn class(&self) -> &CoachClass {
        &self.class
    }

    pub fn total_berths(&self) -> u32 {
        self.total_berths
    }

    pub fn start_id(&self) -> i64 {
        self.start_id
    }

    /// Whether `seat_number` names a seat in this coach.
    pub fn contains(&self, seat_number: u32) -> bool {
        (1..=self.total_berths).contains(&seat_number)
    }

    /// Seat id for a 1-based seat number.
    pub fn seat_id(&self, seat_number: u32) -> Option<i64> {
        self.contains(seat_number)
            .then(|| self.start_id + i64::from(seat_number) - 1)
    }

    /// Seat number for a seat id owned by this coach.
    pub fn seat_number(&self, seat_id: i64) -> Option<u32> {
        let offset = seat_id.checked_sub(self.start_id)?;
        let number = u32::try_from(offset).ok()?.checked_add(1)?;
        self.contains(number).then_some(number)
    }

    /// Berth type of a seat number, derived from the class.
    pub fn berth_type(&self, seat_number: u32) -> BerthType {
        self.class.berth_type(seat_number)
    }

    /// All seat numbers in ascending order.
    pub fn seat_numbers(&self) -> RangeInclusive<u32> {
        1..=self.total_berths
    }
}
