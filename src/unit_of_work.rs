//! Deferred-commit batching for order and order item writes.
//!
//! A [`UnitOfWork`] is created per logical request and passed by reference to
//! the store. While it is `Idle` every insert commits immediately; after
//! [`UnitOfWork::start`] inserts are staged and nothing touches the database
//! until the store's `commit_batch` flushes the whole set in one transaction.
//! Dropping a started unit of work discards its staged writes.

use crate::entities::{order, order_item};
use crate::errors::ServiceError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    #[default]
    Idle,
    Batching,
}

/// A write recorded while a batch is open, flushed on commit.
#[derive(Debug, Clone)]
pub enum StagedWrite {
    Order(order::ActiveModel),
    OrderItem(order_item::ActiveModel),
}

#[derive(Debug, Default)]
pub struct UnitOfWork {
    state: BatchState,
    staged: Vec<StagedWrite>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the batch. Batches do not nest.
    pub fn start(&mut self) -> Result<(), ServiceError> {
        if self.state == BatchState::Batching {
            return Err(ServiceError::InvalidOperation(
                "a unit of work is already started".to_string(),
            ));
        }
        self.state = BatchState::Batching;
        Ok(())
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == BatchState::Batching
    }

    /// Records a write for the open batch.
    pub fn stage(&mut self, write: StagedWrite) -> Result<(), ServiceError> {
        if self.state != BatchState::Batching {
            return Err(ServiceError::InvalidOperation(
                "cannot stage a write outside a started unit of work".to_string(),
            ));
        }
        self.staged.push(write);
        Ok(())
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Drains the staged writes and returns the unit of work to `Idle`.
    /// Called by the store when committing the batch.
    pub fn finish(&mut self) -> Vec<StagedWrite> {
        self.state = BatchState::Idle;
        std::mem::take(&mut self.staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use sea_orm::Set;
    use uuid::Uuid;

    fn staged_order() -> StagedWrite {
        StagedWrite::Order(order::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_number: Set("2024_1".to_string()),
            customer_id: Set(Uuid::new_v4()),
            order_date: Set(chrono::Utc::now()),
            total_amount: Set(100),
        })
    }

    #[test]
    fn starts_idle_and_transitions_on_start() {
        let mut uow = UnitOfWork::new();
        assert_eq!(uow.state(), BatchState::Idle);
        assert!(!uow.is_started());

        uow.start().unwrap();
        assert_eq!(uow.state(), BatchState::Batching);
        assert!(uow.is_started());
    }

    #[test]
    fn batches_do_not_nest() {
        let mut uow = UnitOfWork::new();
        uow.start().unwrap();
        assert_matches!(uow.start(), Err(ServiceError::InvalidOperation(_)));
    }

    #[test]
    fn staging_requires_a_started_batch() {
        let mut uow = UnitOfWork::new();
        assert_matches!(
            uow.stage(staged_order()),
            Err(ServiceError::InvalidOperation(_))
        );
    }

    #[test]
    fn finish_drains_and_returns_to_idle() {
        let mut uow = UnitOfWork::new();
        uow.start().unwrap();
        uow.stage(staged_order()).unwrap();
        uow.stage(staged_order()).unwrap();
        assert_eq!(uow.staged_len(), 2);

        let staged = uow.finish();
        assert_eq!(staged.len(), 2);
        assert_eq!(uow.state(), BatchState::Idle);
        assert_eq!(uow.staged_len(), 0);

        // A fresh batch can be opened afterwards.
        uow.start().unwrap();
    }
}
