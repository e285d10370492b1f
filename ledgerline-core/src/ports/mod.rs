//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod rates;
mod stores;
mod unit_of_work;

pub use rates::RateSource;
pub use stores::{AccountStore, TransferLog, UserStore};
pub use unit_of_work::UnitOfWork;
