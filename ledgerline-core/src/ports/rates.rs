//! Exchange-rate lookup port
//!
//! Defines the interface for fetching currency quotes from an external
//! feed. The lookup is stateless, remote and fallible; callers pin the base
//! currency to rate 1 regardless of what the feed reports for it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Currency;

/// Quote source trait
///
/// Implementations fetch the rate of one currency relative to the base
/// unit. Each call is an independent remote lookup; no caching happens at
/// this layer.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Current rate of `currency` against the base unit
    async fn rate(&self, currency: Currency) -> Result<Decimal>;
}
