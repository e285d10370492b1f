//! In-process adapters for tests and demos
//!
//! [`MemoryBank`] implements every store port plus the unit of work with
//! staged-write semantics: reads observe committed state only, mutations
//! stage writes, and `commit` applies all staged writes atomically.
//! [`FixedRates`] is a deterministic quote source.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Currency, NewUser, Transfer, User};
use crate::ports::{AccountStore, RateSource, TransferLog, UnitOfWork, UserStore};

/// A write staged by one of the store ports, pending commit
#[derive(Debug, Clone)]
enum StagedWrite {
    InsertUser(User),
    UpdateUser(User),
    DeleteUser(Uuid),
    InsertAccount(Account),
    SetAmount { id: Uuid, amount: Decimal },
    CloseAccount { id: Uuid, close_date: DateTime<Utc> },
    AppendTransfer(Transfer),
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    accounts: HashMap<Uuid, Account>,
    transfers: Vec<Transfer>,
    staged: Vec<StagedWrite>,
    commits: u64,
}

/// In-memory bank state behind every store port
#[derive(Debug, Default)]
pub struct MemoryBank {
    state: Mutex<State>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful commits so far
    pub fn commits(&self) -> u64 {
        self.lock().commits
    }

    /// Number of writes currently staged and not yet committed
    pub fn staged_writes(&self) -> usize {
        self.lock().staged.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("bank state lock poisoned")
    }
}

#[async_trait]
impl UserStore for MemoryBank {
    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock().users.contains_key(&id))
    }

    async fn get(&self, id: Uuid) -> Result<User> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("user {id} does not exist")))
    }

    async fn has_accounts(&self, id: Uuid) -> Result<bool> {
        // Closed accounts count as references too.
        Ok(self.lock().accounts.values().any(|a| a.user_id == id))
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            login: user.login,
            email: user.email,
        };
        self.lock().staged.push(StagedWrite::InsertUser(user.clone()));
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<()> {
        self.lock().staged.push(StagedWrite::UpdateUser(user));
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.lock().staged.push(StagedWrite::DeleteUser(id));
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.lock().users.values().cloned().collect())
    }
}

#[async_trait]
impl AccountStore for MemoryBank {
    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock().accounts.contains_key(&id))
    }

    async fn get(&self, id: Uuid) -> Result<Account> {
        self.lock()
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("account {id} does not exist")))
    }

    async fn create(
        &self,
        user_id: Uuid,
        currency: Currency,
        amount: Decimal,
    ) -> Result<Account> {
        let account = Account {
            id: Uuid::new_v4(),
            user_id,
            amount,
            currency,
            is_open: true,
            open_date: Utc::now(),
            close_date: None,
        };
        self.lock()
            .staged
            .push(StagedWrite::InsertAccount(account.clone()));
        Ok(account)
    }

    async fn update_amount(&self, id: Uuid, new_amount: Decimal) -> Result<()> {
        self.lock().staged.push(StagedWrite::SetAmount {
            id,
            amount: new_amount,
        });
        Ok(())
    }

    async fn close(&self, id: Uuid) -> Result<()> {
        self.lock().staged.push(StagedWrite::CloseAccount {
            id,
            close_date: Utc::now(),
        });
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        Ok(self.lock().accounts.values().cloned().collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Account>> {
        Ok(self
            .lock()
            .accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransferLog for MemoryBank {
    async fn append(
        &self,
        amount: Decimal,
        from_account_id: Uuid,
        to_account_id: Uuid,
    ) -> Result<Transfer> {
        let transfer = Transfer {
            id: Uuid::new_v4(),
            amount,
            from_account_id,
            to_account_id,
        };
        self.lock()
            .staged
            .push(StagedWrite::AppendTransfer(transfer.clone()));
        Ok(transfer)
    }

    async fn list_all(&self) -> Result<Vec<Transfer>> {
        Ok(self.lock().transfers.clone())
    }
}

#[async_trait]
impl UnitOfWork for MemoryBank {
    async fn commit(&self) -> Result<u64> {
        let mut state = self.lock();
        let staged = std::mem::take(&mut state.staged);

        // Apply against scratch copies so a failing write leaves committed
        // state untouched.
        let mut users = state.users.clone();
        let mut accounts = state.accounts.clone();
        let mut transfers = state.transfers.clone();
        let mut applied = 0u64;

        for write in staged {
            match write {
                StagedWrite::InsertUser(user) => {
                    users.insert(user.id, user);
                }
                StagedWrite::UpdateUser(user) => {
                    let slot = users.get_mut(&user.id).ok_or_else(|| {
                        Error::persistence(format!("update of unknown user {}", user.id))
                    })?;
                    *slot = user;
                }
                StagedWrite::DeleteUser(id) => {
                    users
                        .remove(&id)
                        .ok_or_else(|| Error::persistence(format!("delete of unknown user {id}")))?;
                }
                StagedWrite::InsertAccount(account) => {
                    accounts.insert(account.id, account);
                }
                StagedWrite::SetAmount { id, amount } => {
                    let slot = accounts.get_mut(&id).ok_or_else(|| {
                        Error::persistence(format!("amount update of unknown account {id}"))
                    })?;
                    slot.amount = amount;
                }
                StagedWrite::CloseAccount { id, close_date } => {
                    let slot = accounts.get_mut(&id).ok_or_else(|| {
                        Error::persistence(format!("close of unknown account {id}"))
                    })?;
                    slot.is_open = false;
                    slot.close_date = Some(close_date);
                }
                StagedWrite::AppendTransfer(transfer) => {
                    transfers.push(transfer);
                }
            }
            applied += 1;
        }

        state.users = users;
        state.accounts = accounts;
        state.transfers = transfers;
        state.commits += 1;
        Ok(applied)
    }

    async fn discard(&self) {
        self.lock().staged.clear();
    }
}

/// Deterministic quote source for tests
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: HashMap<Currency, Decimal>,
}

impl FixedRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, currency: Currency, rate: Decimal) -> Self {
        self.rates.insert(currency, rate);
        self
    }
}

#[async_trait]
impl RateSource for FixedRates {
    async fn rate(&self, currency: Currency) -> Result<Decimal> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| Error::lookup(format!("no quote for {currency}")))
    }
}
