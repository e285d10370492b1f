//! Account domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::Currency;
use crate::domain::result::{Error, Result, Violations};

/// A balance-holding record owned by exactly one user
///
/// Invariants: `amount` is never negative; a closed account has a zero
/// balance (enforced before the close transition) and a `close_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Owning user, immutable after creation
    pub user_id: Uuid,
    pub amount: Decimal,
    pub currency: Currency,
    pub is_open: bool,
    pub open_date: DateTime<Utc>,
    pub close_date: Option<DateTime<Utc>>,
}

impl Account {
    /// Check that the account can take part in a transfer
    pub fn ensure_open(&self) -> Result<()> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::state_conflict(format!(
                "account {} is closed",
                self.id
            )))
        }
    }

    /// Check close eligibility: the account must still be open and hold
    /// exactly zero
    pub fn ensure_closable(&self) -> Result<()> {
        if !self.is_open {
            return Err(Error::state_conflict(format!(
                "account {} is already closed",
                self.id
            )));
        }
        if self.amount != Decimal::ZERO {
            return Err(Error::state_conflict(format!(
                "account {} holds a non-zero balance; transfer the funds to another account first",
                self.id
            )));
        }
        Ok(())
    }
}

/// Request to open a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub user_id: Uuid,
    pub currency: Currency,
    pub amount: Decimal,
}

impl NewAccount {
    /// Validate field rules; currency membership is already guaranteed by
    /// the `Currency` type at the input boundary
    pub fn validate(&self) -> Result<()> {
        let mut violations = Violations::new();
        if self.amount <= Decimal::ZERO {
            violations.push("amount.positive", "amount must be greater than zero");
        }
        violations.into_result()
    }
}
