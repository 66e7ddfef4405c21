//! Rate record and fetch error types

use serde::{Deserialize, Serialize};

/// One currency's daily rate, as served to clients under the `currency` key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRecord {
    /// Date label supplied by the feed
    pub date: String,
    pub code: CurrencyCode,
    /// Human-readable currency name
    pub name: String,
    /// Roubles per one unit of the currency
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyCode {
    /// ISO 4217 numeric code ("840")
    pub num: String,
    /// ISO 4217 letter code ("USD")
    pub label: String,
}

/// A single entry of the feed's `Valute` table
#[derive(Debug, Deserialize)]
pub(super) struct FeedEntry {
    #[serde(rename = "NumCode")]
    pub num_code: String,
    #[serde(rename = "CharCode")]
    pub char_code: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// Everything that can go wrong while obtaining a rate.
///
/// The `Display` strings are returned to clients as-is.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Error getting data from service.")]
    Unreachable(#[source] reqwest::Error),

    #[error("Failed to get data from the service. Service is unavailable")]
    Unparseable(#[source] serde_json::Error),

    #[error("No currencies named \"{0}\" found")]
    NotFound(String),

    #[error("Internal error. The format of the data to receive has been changed")]
    SchemaChanged,
}
