//! Store ports - durable state abstraction
//!
//! These traits define all store operations the engine needs. Implementations
//! (adapters) provide the actual persistence logic. Reads observe committed
//! state; mutations are staged and become durable only when the associated
//! [`UnitOfWork`](crate::ports::UnitOfWork) commits.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Account, Currency, NewUser, Transfer, User};

/// User store abstraction
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this id exists
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Get a user by id
    async fn get(&self, id: Uuid) -> Result<User>;

    /// Whether the user is referenced by any account, open or closed
    async fn has_accounts(&self, id: Uuid) -> Result<bool>;

    /// Stage a new user; the store assigns the id
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Stage an update of login/email
    async fn update(&self, user: User) -> Result<()>;

    /// Stage a deletion
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Get all users
    async fn list_all(&self) -> Result<Vec<User>>;
}

/// Account store abstraction
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Whether an account with this id exists
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Get an account by id
    async fn get(&self, id: Uuid) -> Result<Account>;

    /// Stage a new open account; the store assigns id and open date
    async fn create(&self, user_id: Uuid, currency: Currency, amount: Decimal)
        -> Result<Account>;

    /// Stage a balance overwrite
    async fn update_amount(&self, id: Uuid, new_amount: Decimal) -> Result<()>;

    /// Stage the close transition: `is_open = false`, close date set
    async fn close(&self, id: Uuid) -> Result<()>;

    /// Get all accounts
    async fn list_all(&self) -> Result<Vec<Account>>;

    /// Get all accounts owned by one user
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Account>>;
}

/// Append-only transfer log abstraction
#[async_trait]
pub trait TransferLog: Send + Sync {
    /// Stage a log entry for a completed transfer
    async fn append(
        &self,
        amount: Decimal,
        from_account_id: Uuid,
        to_account_id: Uuid,
    ) -> Result<Transfer>;

    /// Get every logged transfer
    async fn list_all(&self) -> Result<Vec<Transfer>>;
}
