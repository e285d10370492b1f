//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod accounts;
mod converter;
mod history;
mod users;

pub use accounts::AccountService;
pub use converter::ConverterService;
pub use history::HistoryService;
pub use users::UserService;

use tokio_util::sync::CancellationToken;

use crate::domain::result::{Error, Result};

/// Bail out of an operation whose caller has already given up
pub(crate) fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(Error::Cancelled)
    } else {
        Ok(())
    }
}
