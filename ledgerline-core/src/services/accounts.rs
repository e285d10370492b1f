//! Account service - account lifecycle and transfer execution
//!
//! This is the mutation engine of the ledger. Every mutating operation
//! stages its writes through the store ports and commits them through the
//! unit of work exactly once; a failure or cancellation before the commit
//! leaves durable state untouched.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, NewAccount, TransferOrder};
use crate::ports::{AccountStore, TransferLog, UnitOfWork, UserStore};
use crate::services::{ensure_active, ConverterService};

/// Account lifecycle and transfer engine
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    users: Arc<dyn UserStore>,
    log: Arc<dyn TransferLog>,
    uow: Arc<dyn UnitOfWork>,
    converter: ConverterService,
    commission_rate: Decimal,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        users: Arc<dyn UserStore>,
        log: Arc<dyn TransferLog>,
        uow: Arc<dyn UnitOfWork>,
        converter: ConverterService,
        commission_rate: Decimal,
    ) -> Self {
        Self {
            accounts,
            users,
            log,
            uow,
            converter,
            commission_rate,
        }
    }

    /// Get an account by id
    pub async fn get_account(&self, id: Uuid, cancel: &CancellationToken) -> Result<Account> {
        ensure_active(cancel)?;
        self.resolve_account(id).await
    }

    /// Get all accounts
    pub async fn list_accounts(&self, cancel: &CancellationToken) -> Result<Vec<Account>> {
        ensure_active(cancel)?;
        self.accounts.list_all().await
    }

    /// Get all accounts owned by one user
    pub async fn list_user_accounts(
        &self,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Vec<Account>> {
        ensure_active(cancel)?;
        self.resolve_user(user_id).await?;
        self.accounts.list_by_user(user_id).await
    }

    /// Open a new account for an existing user
    ///
    /// Rule order: the initial amount must be positive, the currency must be
    /// a supported one (guaranteed by the `Currency` type at the boundary),
    /// and the owning user must exist.
    pub async fn create_account(
        &self,
        new: NewAccount,
        cancel: &CancellationToken,
    ) -> Result<Account> {
        ensure_active(cancel)?;
        new.validate()?;
        self.resolve_user(new.user_id).await?;

        let account = self
            .accounts
            .create(new.user_id, new.currency, new.amount)
            .await?;
        self.commit(cancel).await?;

        info!(
            account = %account.id,
            user = %account.user_id,
            currency = %account.currency,
            "account opened"
        );
        Ok(account)
    }

    /// Close an account holding a zero balance
    pub async fn close_account(&self, id: Uuid, cancel: &CancellationToken) -> Result<()> {
        ensure_active(cancel)?;
        let account = self.resolve_account(id).await?;
        account.ensure_closable()?;

        self.accounts.close(id).await?;
        self.commit(cancel).await?;

        info!(account = %id, "account closed");
        Ok(())
    }

    /// Quote the commission a transfer between these accounts would attract
    ///
    /// Read-only: used standalone to quote a fee, and internally during
    /// transfer execution.
    pub async fn calculate_commission(
        &self,
        amount: Decimal,
        from_account_id: Uuid,
        to_account_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Decimal> {
        ensure_active(cancel)?;
        let from = self.resolve_account(from_account_id).await?;
        let to = self.resolve_account(to_account_id).await?;
        Ok(self.commission_for(amount, &from, &to))
    }

    /// Move money between two open accounts
    ///
    /// The log entry and the debit carry the full authorized amount; the
    /// destination is credited net of commission and, when the currencies
    /// differ, converted through the quote feed. Commission is absorbed by
    /// the ledger rather than credited anywhere.
    pub async fn transfer(&self, order: TransferOrder, cancel: &CancellationToken) -> Result<()> {
        ensure_active(cancel)?;
        order.validate()?;
        if order.from_account_id == order.to_account_id {
            return Err(Error::SameAccount);
        }

        let from = self.resolve_account(order.from_account_id).await?;
        let to = self.resolve_account(order.to_account_id).await?;

        // Feasibility is checked against the post-debit source balance.
        let debited = from.amount - order.amount;
        from.ensure_open()?;
        if debited < Decimal::ZERO {
            return Err(Error::InsufficientFunds(from.id));
        }
        to.ensure_open()?;

        match self.stage_transfer(&order, &from, &to, debited, cancel).await {
            Ok(credited) => {
                self.commit(cancel).await?;
                info!(
                    from = %from.id,
                    to = %to.id,
                    amount = %order.amount,
                    credited = %credited,
                    "transfer committed"
                );
                Ok(())
            }
            Err(e) => {
                self.uow.discard().await;
                Err(e)
            }
        }
    }

    /// Stage the log append, debit and credit, in that order
    ///
    /// The debit is staged before the credit so a torn write sequence can
    /// only leave the source debited, never the destination credited on its
    /// own. Returns the credited amount.
    async fn stage_transfer(
        &self,
        order: &TransferOrder,
        from: &Account,
        to: &Account,
        debited: Decimal,
        cancel: &CancellationToken,
    ) -> Result<Decimal> {
        self.log.append(order.amount, from.id, to.id).await?;
        self.accounts.update_amount(from.id, debited).await?;

        let commission = self.commission_for(order.amount, from, to);
        let mut credit = order.amount - commission;
        if from.currency != to.currency {
            credit = self
                .converter
                .convert(from.currency, to.currency, credit, cancel)
                .await?;
        }
        self.accounts.update_amount(to.id, to.amount + credit).await?;
        Ok(credit)
    }

    /// Commission rule: free between accounts of the same owner, otherwise a
    /// fixed share of the transferred amount
    fn commission_for(&self, amount: Decimal, from: &Account, to: &Account) -> Decimal {
        let commission = if from.user_id == to.user_id {
            Decimal::ZERO
        } else {
            amount * self.commission_rate
        };
        debug!(%amount, %commission, "commission computed");
        commission
    }

    /// Commit all staged writes, or discard them when the caller has
    /// cancelled before the commit step
    async fn commit(&self, cancel: &CancellationToken) -> Result<u64> {
        if cancel.is_cancelled() {
            self.uow.discard().await;
            return Err(Error::Cancelled);
        }
        self.uow.commit().await
    }

    async fn resolve_account(&self, id: Uuid) -> Result<Account> {
        if !self.accounts.exists(id).await? {
            return Err(Error::not_found(format!("account {id} does not exist")));
        }
        self.accounts.get(id).await
    }

    async fn resolve_user(&self, id: Uuid) -> Result<()> {
        if !self.users.exists(id).await? {
            return Err(Error::not_found(format!("user {id} does not exist")));
        }
        Ok(())
    }
}
