//! User service - registration and profile lifecycle

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{NewUser, User};
use crate::ports::{UnitOfWork, UserStore};
use crate::services::ensure_active;

/// User lifecycle service
pub struct UserService {
    users: Arc<dyn UserStore>,
    uow: Arc<dyn UnitOfWork>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, uow: Arc<dyn UnitOfWork>) -> Self {
        Self { users, uow }
    }

    /// Get a user by id
    pub async fn get_user(&self, id: Uuid, cancel: &CancellationToken) -> Result<User> {
        ensure_active(cancel)?;
        self.resolve(id).await?;
        self.users.get(id).await
    }

    /// Get all users
    pub async fn list_users(&self, cancel: &CancellationToken) -> Result<Vec<User>> {
        ensure_active(cancel)?;
        self.users.list_all().await
    }

    /// Register a new user
    pub async fn create_user(&self, new: NewUser, cancel: &CancellationToken) -> Result<User> {
        ensure_active(cancel)?;
        new.validate()?;

        let user = self.users.create(new).await?;
        self.commit(cancel).await?;

        info!(user = %user.id, "user registered");
        Ok(user)
    }

    /// Update an existing user's login and email
    pub async fn update_user(&self, user: User, cancel: &CancellationToken) -> Result<()> {
        ensure_active(cancel)?;
        user.validate()?;
        self.resolve(user.id).await?;

        let id = user.id;
        self.users.update(user).await?;
        self.commit(cancel).await?;

        info!(user = %id, "user updated");
        Ok(())
    }

    /// Delete a user that owns no accounts
    ///
    /// Any account reference blocks deletion, closed accounts included.
    pub async fn delete_user(&self, id: Uuid, cancel: &CancellationToken) -> Result<()> {
        ensure_active(cancel)?;
        self.resolve(id).await?;
        if self.users.has_accounts(id).await? {
            return Err(Error::state_conflict(format!(
                "user {id} still owns accounts"
            )));
        }

        self.users.delete(id).await?;
        self.commit(cancel).await?;

        info!(user = %id, "user deleted");
        Ok(())
    }

    async fn commit(&self, cancel: &CancellationToken) -> Result<u64> {
        if cancel.is_cancelled() {
            self.uow.discard().await;
            return Err(Error::Cancelled);
        }
        self.uow.commit().await
    }

    async fn resolve(&self, id: Uuid) -> Result<()> {
        if !self.users.exists(id).await? {
            return Err(Error::not_found(format!("user {id} does not exist")));
        }
        Ok(())
    }
}
