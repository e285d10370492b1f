//! Ledgerline Core - Business logic for a minimal multi-currency bank ledger
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Account, Transfer)
//! - **ports**: Trait definitions for external dependencies (stores, quote feed, unit of work)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (in-memory bank, CBR quote feed)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use anyhow::Result;

use adapters::{CbrQuotes, MemoryBank};
use config::Config;
use ports::{AccountStore, RateSource, TransferLog, UnitOfWork, UserStore};
use services::{AccountService, ConverterService, HistoryService, UserService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Violation, Violations};
pub use domain::{Account, Currency, NewAccount, NewUser, Transfer, TransferOrder, User};
pub use tokio_util::sync::CancellationToken;

/// Main context for ledger operations
///
/// This is the primary entry point for all business logic. It wires every
/// service over one set of collaborator implementations.
pub struct LedgerContext {
    pub config: Config,
    pub accounts: AccountService,
    pub users: UserService,
    pub history: HistoryService,
    pub converter: ConverterService,
}

impl LedgerContext {
    /// Wire the services over an explicit set of collaborators
    pub fn new(
        user_store: Arc<dyn UserStore>,
        account_store: Arc<dyn AccountStore>,
        transfer_log: Arc<dyn TransferLog>,
        rates: Arc<dyn RateSource>,
        uow: Arc<dyn UnitOfWork>,
        config: Config,
    ) -> Self {
        let converter = ConverterService::new(rates);
        let accounts = AccountService::new(
            Arc::clone(&account_store),
            Arc::clone(&user_store),
            Arc::clone(&transfer_log),
            Arc::clone(&uow),
            converter.clone(),
            config.commission_rate,
        );
        let users = UserService::new(user_store, uow);
        let history = HistoryService::new(transfer_log);

        Self {
            config,
            accounts,
            users,
            history,
            converter,
        }
    }

    /// Create an ephemeral context over the in-memory bank and the live
    /// quote feed
    pub fn in_memory(config: Config) -> Result<Self> {
        let bank = Arc::new(MemoryBank::new());
        let rates = Arc::new(CbrQuotes::new(&config.quotes_url, config.http_timeout())?);

        Ok(Self::new(
            Arc::clone(&bank) as Arc<dyn UserStore>,
            Arc::clone(&bank) as Arc<dyn AccountStore>,
            Arc::clone(&bank) as Arc<dyn TransferLog>,
            rates,
            bank,
            config,
        ))
    }
}
