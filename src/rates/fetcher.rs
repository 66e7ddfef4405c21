//! Daily rates feed client
//!
//! Performs a single GET against the feed and extracts one currency from it.
//! There is no retry and no caching: every call hits the network.

use hyper::body::Bytes;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::types::{CurrencyCode, FeedEntry, RateError, RateRecord};
use crate::config::UpstreamConfig;
use crate::logger;

pub struct RateFetcher {
    url: String,
    timeout: Option<Duration>,
}

impl RateFetcher {
    pub fn new(upstream: &UpstreamConfig) -> Self {
        Self {
            url: upstream.url.clone(),
            timeout: upstream.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Fetch the feed and return the record for `currency_code`
    pub async fn fetch_rate(&self, currency_code: &str) -> Result<RateRecord, RateError> {
        let body = self.download().await?;
        parse_feed(&body, currency_code)
    }

    async fn download(&self) -> Result<Bytes, RateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| unreachable(&self.url, e))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| unreachable(&self.url, e))?;

        response.bytes().await.map_err(|e| unreachable(&self.url, e))
    }
}

fn unreachable(url: &str, err: reqwest::Error) -> RateError {
    logger::log_warning(&format!("Rates feed request to {url} failed: {err}"));
    RateError::Unreachable(err)
}

/// Extract one currency from a raw feed document
pub fn parse_feed(body: &[u8], currency_code: &str) -> Result<RateRecord, RateError> {
    let doc: Value = serde_json::from_slice(body).map_err(|e| {
        logger::log_warning(&format!("Rates feed returned invalid JSON: {e}"));
        RateError::Unparseable(e)
    })?;

    let table = doc
        .get("Valute")
        .and_then(Value::as_object)
        .ok_or(RateError::SchemaChanged)?;

    let entry = table
        .get(&currency_code.to_uppercase())
        .ok_or_else(|| RateError::NotFound(currency_code.to_string()))?;

    let date = doc
        .get("Date")
        .and_then(Value::as_str)
        .ok_or(RateError::SchemaChanged)?;

    let entry = FeedEntry::deserialize(entry).map_err(|e| {
        logger::log_warning(&format!("Unexpected rates feed entry: {e}"));
        RateError::SchemaChanged
    })?;

    // Every conversion divides or multiplies by this
    if !(entry.value.is_finite() && entry.value > 0.0) {
        logger::log_warning(&format!("Rates feed returned unusable rate: {}", entry.value));
        return Err(RateError::SchemaChanged);
    }

    Ok(RateRecord {
        date: date.to_string(),
        code: CurrencyCode {
            num: entry.num_code,
            label: entry.char_code,
        },
        name: entry.name,
        rate: entry.value,
    })
}
