//! Unit of work port - the atomic-commit boundary

use async_trait::async_trait;

use crate::domain::result::Result;

/// Atomic-commit boundary abstraction
///
/// All writes staged through the store ports during one engine operation
/// become durable together when `commit` is called, or not at all. The
/// engine calls `commit` at most once per mutating operation, after every
/// write has been staged.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Apply all staged writes atomically, returning the number of applied
    /// records
    async fn commit(&self) -> Result<u64>;

    /// Drop all staged writes without applying them
    ///
    /// Called on the error and cancellation paths so an abandoned operation
    /// leaves no half-staged state behind for the next commit to pick up.
    async fn discard(&self);
}
