//! Transfer log domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Result, Violations};

/// An immutable record of a completed transfer
///
/// `amount` is what the source account authorized: pre-commission and
/// pre-conversion. The record never changes after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub amount: Decimal,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
}

/// Request to move money between two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOrder {
    pub amount: Decimal,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
}

impl TransferOrder {
    /// Validate field rules; account resolution and the same-account check
    /// are the engine's job
    pub fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        if self.amount <= Decimal::ZERO {
            violations.push("amount.positive", "amount must be greater than zero");
        }
        violations.into_result()
    }
}
