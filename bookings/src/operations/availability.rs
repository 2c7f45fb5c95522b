//! Availability answers over the restriction calendar.
//!
//! The oracle takes validated [`DateRange`]s, so backwards or empty ranges
//! are rejected before any storage call is made. It only reads.

use crate::calendar::DateRange;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::{CheckRoomAvailabilityParams, ListAvailableRoomsParams, Room, RoomRestriction};
use crate::store::BookingStore;

/// Answers "is this room free?" and "which rooms are free?".
///
/// # Examples
///
/// ```no_run
/// use bookings::database::{Database, DatabaseConfig};
/// use bookings::operations::AvailabilityOracle;
/// use bookings::{DateRange, RequestContext};
/// use chrono::NaiveDate;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/bookings.db")).unwrap();
/// let oracle = AvailabilityOracle::new(&db);
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
/// ).unwrap();
///
/// let free = oracle.check(&RequestContext::default(), 1, range).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityOracle<S> {
    store: S,
}

impl<S: BookingStore> AvailabilityOracle<S> {
    /// Creates an oracle reading from `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns true iff no block on `room_id` overlaps `range`.
    ///
    /// # Errors
    ///
    /// Returns a connectivity or database error from the store.
    pub fn check(&self, ctx: &RequestContext, room_id: i64, range: DateRange) -> Result<bool> {
        self.store.check_room_availability(
            ctx,
            &CheckRoomAvailabilityParams {
                room_id,
                start_date: range.start(),
                end_date: range.end(),
            },
        )
    }

    /// Like [`check`](Self::check), but a taken room is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AvailabilityConflict`] if the room is taken, or a
    /// store error.
    pub fn require_available(
        &self,
        ctx: &RequestContext,
        room_id: i64,
        range: DateRange,
    ) -> Result<()> {
        if self.check(ctx, room_id, range)? {
            Ok(())
        } else {
            Err(Error::AvailabilityConflict {
                room_id,
                start: range.start(),
                end: range.end(),
            })
        }
    }

    /// Lists rooms free over `range`, ordered by name.
    ///
    /// A `limit` of zero returns no rooms.
    ///
    /// # Errors
    ///
    /// Returns a connectivity or database error from the store.
    pub fn list(
        &self,
        ctx: &RequestContext,
        range: DateRange,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Room>> {
        self.store.list_available_rooms(
            ctx,
            &ListAvailableRoomsParams {
                start_date: range.start(),
                end_date: range.end(),
                limit,
                offset,
            },
        )
    }
}

/// In-memory form of the availability rule.
///
/// Returns true iff none of the blocks on `room_id` overlaps `range`.
/// Blocks on other rooms are ignored.
///
/// # Examples
///
/// ```
/// use bookings::operations::is_available;
/// use bookings::{DateRange, RoomRestriction};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
/// let block = RoomRestriction { room_id: 1, start_date: d(1), end_date: d(8), ..Default::default() };
///
/// assert!(is_available(&[block.clone()], 1, DateRange::new(d(8), d(10)).unwrap()));
/// assert!(!is_available(&[block], 1, DateRange::new(d(5), d(10)).unwrap()));
/// ```
#[must_use]
pub fn is_available(blocks: &[RoomRestriction], room_id: i64, range: DateRange) -> bool {
    !blocks.iter().any(|block| {
        block.room_id == room_id
            && crate::calendar::intervals_overlap(
                block.start_date,
                block.end_date,
                range.start(),
                range.end(),
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{block_room, create_room, date, test_database};
    use crate::store::MockBookingStore;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    fn block(room_id: i64, start: &str, end: &str) -> RoomRestriction {
        RoomRestriction {
            room_id,
            start_date: date(start),
            end_date: date(end),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_available_boundaries() {
        let blocks = [block(1, "2024-05-01", "2024-05-08")];
        assert!(is_available(&blocks, 1, range("2024-05-08", "2024-05-10")));
        assert!(is_available(&blocks, 1, range("2024-04-28", "2024-05-01")));
        assert!(!is_available(&blocks, 1, range("2024-05-05", "2024-05-10")));
        assert!(!is_available(&blocks, 1, range("2024-04-30", "2024-05-02")));
        assert!(!is_available(&blocks, 1, range("2024-05-03", "2024-05-04")));
        assert!(is_available(&blocks, 2, range("2024-05-03", "2024-05-04")));
        assert!(is_available(&[], 1, range("2024-05-03", "2024-05-04")));
    }

    #[test]
    fn test_check_passes_range_through() {
        let mut store = MockBookingStore::new();
        store
            .expect_check_room_availability()
            .withf(|_, params| {
                params.room_id == 7
                    && params.start_date == date("2024-05-08")
                    && params.end_date == date("2024-05-10")
            })
            .times(1)
            .returning(|_, _| Ok(false));

        let oracle = AvailabilityOracle::new(store);
        let err = oracle
            .require_available(&RequestContext::default(), 7, range("2024-05-08", "2024-05-10"))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_store_errors_propagate() {
        let mut store = MockBookingStore::new();
        store
            .expect_list_available_rooms()
            .returning(|_, _| Err(Error::Timeout { millis: 3000 }));

        let oracle = AvailabilityOracle::new(store);
        let err = oracle
            .list(&RequestContext::default(), range("2024-05-08", "2024-05-10"), 10, 0)
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_oracle_against_database() {
        let (db, _dir) = test_database();
        let ctx = RequestContext::default();
        let r1 = create_room(&db, "R1");
        let r2 = create_room(&db, "R2");
        block_room(&db, r1.id, "2024-05-01", "2024-05-08");

        let oracle = AvailabilityOracle::new(&db);
        assert!(oracle.check(&ctx, r1.id, range("2024-05-08", "2024-05-10")).unwrap());
        assert!(!oracle.check(&ctx, r1.id, range("2024-05-05", "2024-05-10")).unwrap());

        let free = oracle.list(&ctx, range("2024-05-05", "2024-05-10"), 10, 0).unwrap();
        assert_eq!(free.into_iter().map(|r| r.id).collect::<Vec<_>>(), vec![r2.id]);
        assert!(oracle
            .list(&ctx, range("2024-05-05", "2024-05-10"), 0, 0)
            .unwrap()
            .is_empty());
    }
}
