//! CBR daily-quotes client
//!
//! Fetches the Bank of Russia daily JSON feed. The feed quotes every
//! currency against the base unit under a `Valute` map keyed by currency
//! code and omits the base unit itself, so the client inserts a rate of 1
//! for it after parsing the response.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::Currency;
use crate::ports::RateSource;

/// HTTP client for the daily-quotes feed
#[derive(Debug, Clone)]
pub struct CbrQuotes {
    client: Client,
    endpoint: Url,
}

/// Daily feed payload
#[derive(Debug, Deserialize)]
struct DailyQuotes {
    #[serde(rename = "Valute")]
    valute: HashMap<String, Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(rename = "Value")]
    value: Decimal,
}

impl CbrQuotes {
    /// Create a client for the given feed endpoint
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint).context("invalid quotes endpoint URL")?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("quotes endpoint must use http or https");
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RateSource for CbrQuotes {
    async fn rate(&self, currency: Currency) -> Result<Decimal> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(%currency, error = %e, "quote request failed");
                Error::lookup(format!("quote request failed: {e}"))
            })?;

        if !response.status().is_success() {
            warn!(%currency, status = %response.status(), "quote feed returned an error");
            return Err(Error::lookup(format!(
                "quote feed returned {}",
                response.status()
            )));
        }

        let mut quotes: DailyQuotes = response
            .json()
            .await
            .map_err(|e| Error::lookup(format!("malformed quote response: {e}")))?;

        quotes.valute.insert(
            Currency::BASE.code().to_string(),
            Quote {
                value: Decimal::ONE,
            },
        );

        quotes
            .valute
            .get(currency.code())
            .map(|q| q.value)
            .ok_or_else(|| Error::lookup(format!("no quote for {currency}")))
    }
}
