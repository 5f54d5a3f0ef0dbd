use chrono::NaiveDate;

use crate::appresult::{AppError, AppResult};
use crate::models::Booking;
use crate::store::BookingStore;

/// Half-open stay interval [check_in, check_out). Construct through `new`,
/// which rejects empty and inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<Self> {
        if check_in >= check_out {
            return Err(AppError::Validation("check_in must be before check_out".to_owned()));
        }
        Ok(Self { check_in, check_out })
    }

    pub fn of(booking: &Booking) -> Self {
        // rows were validated on the way in
        Self {
            check_in: booking.check_in,
            check_out: booking.check_out,
        }
    }

    /// Strict inequalities on both ends: back-to-back stays, where one
    /// checkout day is the other check-in day, do not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        other.check_out > self.check_in && other.check_in < self.check_out
    }
}

/// True when no pending or confirmed booking on the property overlaps the
/// requested range. A read-side answer only; the insert in
/// `BookingStore::create_if_available` re-evaluates the same predicate
/// atomically and stays authoritative under concurrency.
pub async fn is_available(
    bookings: &BookingStore,
    property_id: &str,
    range: &StayRange,
) -> AppResult<bool> {
    let active = bookings.active_for_property(property_id).await?;
    Ok(active.iter().all(|b| !range.overlaps(&StayRange::of(b))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn range(from: u32, to: u32) -> StayRange {
        StayRange::new(day(from), day(to)).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert!(StayRange::new(day(10), day(10)).is_err());
        assert!(StayRange::new(day(11), day(10)).is_err());
        assert!(StayRange::new(day(10), day(11)).is_ok());
    }

    #[test]
    fn detects_partial_overlap() {
        // booked [7, 10); requesting [8, 11) collides
        assert!(range(7, 10).overlaps(&range(8, 11)));
        assert!(range(8, 11).overlaps(&range(7, 10)));
    }

    #[test]
    fn back_to_back_does_not_overlap() {
        // booked [7, 10); [10, 13) starts on the checkout day
        assert!(!range(7, 10).overlaps(&range(10, 13)));
        assert!(!range(10, 13).overlaps(&range(7, 10)));
        assert!(!range(1, 7).overlaps(&range(7, 10)));
    }

    #[test]
    fn containment_and_identity_overlap() {
        assert!(range(7, 10).overlaps(&range(7, 10)));
        assert!(range(7, 10).overlaps(&range(8, 9)));
        assert!(range(8, 9).overlaps(&range(7, 10)));
        assert!(range(7, 10).overlaps(&range(9, 12)));
        assert!(range(7, 10).overlaps(&range(5, 8)));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!range(1, 3).overlaps(&range(20, 25)));
        assert!(!range(20, 25).overlaps(&range(1, 3)));
    }
}
