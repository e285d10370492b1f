//! History service - read-only view of the transfer log

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::result::Result;
use crate::domain::Transfer;
use crate::ports::TransferLog;
use crate::services::ensure_active;

/// Read-only access to completed transfers
pub struct HistoryService {
    log: Arc<dyn TransferLog>,
}

impl HistoryService {
    pub fn new(log: Arc<dyn TransferLog>) -> Self {
        Self { log }
    }

    /// Get every logged transfer
    pub async fn list_transfers(&self, cancel: &CancellationToken) -> Result<Vec<Transfer>> {
        ensure_active(cancel)?;
        self.log.list_all().await
    }
}
