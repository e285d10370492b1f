//! Currency converter service

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::Currency;
use crate::ports::RateSource;
use crate::services::ensure_active;

/// Converts amounts between supported currencies using a remote quote feed
///
/// Each conversion performs two independent rate lookups (source and
/// destination) with no caching. Results are rounded to 2 decimal places
/// with half-to-even rounding.
#[derive(Clone)]
pub struct ConverterService {
    rates: Arc<dyn RateSource>,
}

impl ConverterService {
    pub fn new(rates: Arc<dyn RateSource>) -> Self {
        Self { rates }
    }

    /// Convert `amount` from one currency to another
    pub async fn convert(
        &self,
        from: Currency,
        to: Currency,
        amount: Decimal,
        cancel: &CancellationToken,
    ) -> Result<Decimal> {
        ensure_active(cancel)?;
        if amount < Decimal::ZERO {
            return Err(Error::NegativeAmount);
        }

        let rate_from = self.course(from).await?;
        let rate_to = self.course(to).await?;

        let converted = (amount * rate_from / rate_to).round_dp(2);
        debug!(%from, %to, %amount, %converted, "converted amount");
        Ok(converted)
    }

    /// Fetch the quote for a currency, pinning the base unit to 1 after the
    /// response regardless of what the feed reported
    async fn course(&self, currency: Currency) -> Result<Decimal> {
        let fetched = self.rates.rate(currency).await?;
        if currency.is_base() {
            Ok(Decimal::ONE)
        } else {
            Ok(fetched)
        }
    }
}
