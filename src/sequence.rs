//! Per-year order number allocation.
//!
//! Order numbers are `"{year}_{sequence}"` with the sequence unique and
//! increasing within a year. The next value is derived from the order
//! numbers already in the store (`max + 1`), with malformed entries counted
//! as zero. A per-process high-water mark, guarded by a mutex held across
//! the store read, keeps concurrent callers from ever observing the same
//! base: reservations advance the mark before the reserved numbers are
//! committed, so two in-flight batches cannot collide.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::ServiceError;
use crate::repositories::OrderStore;

/// Allocates per-year order number sequences.
///
/// One allocator instance is shared by every service that creates orders;
/// sharing is what makes the reservation atomic within the process.
#[derive(Debug, Default)]
pub struct OrderNumberAllocator {
    reserved: Mutex<HashMap<i32, u32>>,
}

impl OrderNumberAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused sequence number for `year` and reserves it.
    pub async fn next_sequence(
        &self,
        store: &dyn OrderStore,
        year: i32,
    ) -> Result<u32, ServiceError> {
        self.reserve(store, year, 1).await
    }

    /// Reserves a contiguous run of `count` sequence numbers for `year` and
    /// returns the first. `count` must be at least 1.
    pub async fn reserve(
        &self,
        store: &dyn OrderStore,
        year: i32,
        count: u32,
    ) -> Result<u32, ServiceError> {
        debug_assert!(count >= 1, "reserve called with an empty run");

        // The lock spans the store read so that no two callers can compute
        // the same base from an overlapping snapshot.
        let mut reserved = self.reserved.lock().await;

        let order_numbers = store.order_numbers_for_year(year).await?;
        let stored_max = order_numbers
            .iter()
            .map(|number| parse_sequence(number))
            .max()
            .unwrap_or(0);

        let high_water = reserved.entry(year).or_insert(0);
        let base = stored_max.max(*high_water) + 1;
        *high_water = base + count.saturating_sub(1);

        debug!(year, base, count, "reserved order number sequence run");
        Ok(base)
    }
}

/// Parses the numeric suffix of an order number. Malformed entries (wrong
/// separator count, non-numeric suffix) contribute 0 and never fail.
pub fn parse_sequence(order_number: &str) -> u32 {
    let parts: Vec<&str> = order_number.split('_').collect();
    if parts.len() != 2 {
        return 0;
    }
    parts[1].parse().unwrap_or(0)
}

pub fn format_order_number(year: i32, sequence: u32) -> String {
    format!("{year}_{sequence}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{order, order_item};
    use crate::unit_of_work::UnitOfWork;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// Store stub that only serves order numbers.
    struct NumbersOnlyStore {
        numbers: StdMutex<Vec<String>>,
    }

    impl NumbersOnlyStore {
        fn with(numbers: &[&str]) -> Self {
            Self {
                numbers: StdMutex::new(numbers.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl OrderStore for NumbersOnlyStore {
        async fn order_numbers_for_year(&self, _year: i32) -> Result<Vec<String>, ServiceError> {
            Ok(self.numbers.lock().unwrap().clone())
        }

        async fn insert_order(
            &self,
            _uow: &mut UnitOfWork,
            order: order::Model,
        ) -> Result<order::Model, ServiceError> {
            self.numbers.lock().unwrap().push(order.order_number.clone());
            Ok(order)
        }

        async fn insert_order_item(
            &self,
            _uow: &mut UnitOfWork,
            item: order_item::Model,
        ) -> Result<order_item::Model, ServiceError> {
            Ok(item)
        }

        async fn commit_batch(&self, mut uow: UnitOfWork) -> Result<u64, ServiceError> {
            Ok(uow.finish().len() as u64)
        }
    }

    #[test]
    fn parse_sequence_reads_the_numeric_suffix() {
        assert_eq!(parse_sequence("2024_7"), 7);
        assert_eq!(parse_sequence("2024_123"), 123);
    }

    #[test]
    fn parse_sequence_treats_malformed_entries_as_zero() {
        assert_eq!(parse_sequence("abc"), 0);
        assert_eq!(parse_sequence("2024"), 0);
        assert_eq!(parse_sequence("2024_x"), 0);
        assert_eq!(parse_sequence("2024_1_2"), 0);
        assert_eq!(parse_sequence(""), 0);
    }

    #[tokio::test]
    async fn empty_store_starts_at_one() {
        let store = NumbersOnlyStore::with(&[]);
        let allocator = OrderNumberAllocator::new();
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn next_sequence_is_max_plus_one() {
        let store = NumbersOnlyStore::with(&["2024_1", "2024_5", "2024_3"]);
        let allocator = OrderNumberAllocator::new();
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn malformed_entries_are_ignored() {
        let store = NumbersOnlyStore::with(&["abc", "2024", "2024_x", "2024_4"]);
        let allocator = OrderNumberAllocator::new();
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn sequential_calls_are_strictly_increasing_without_writes() {
        // Nothing is written back between calls; the high-water mark alone
        // must keep the sequence advancing.
        let store = NumbersOnlyStore::with(&["2024_2"]);
        let allocator = OrderNumberAllocator::new();
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 3);
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 4);
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn reserve_returns_the_base_of_a_contiguous_run() {
        let store = NumbersOnlyStore::with(&["2024_4"]);
        let allocator = OrderNumberAllocator::new();
        assert_eq!(allocator.reserve(&store, 2024, 3).await.unwrap(), 5);
        // The whole run is reserved, so the next caller starts after it.
        assert_eq!(allocator.next_sequence(&store, 2024).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn years_are_tracked_independently() {
        let store = NumbersOnlyStore::with(&["2024_9"]);
        let allocator = OrderNumberAllocator::new();
        assert_eq!(allocator.reserve(&store, 2025, 2).await.unwrap(), 10);
        // Different year, same stored numbers: 2025 entries parse to their
        // suffixes too (the store filters by year in production).
    }

    #[test]
    fn format_round_trips_through_parse() {
        assert_eq!(parse_sequence(&format_order_number(2024, 17)), 17);
    }
}
