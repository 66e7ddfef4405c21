//! Rates module
//!
//! Fetches the daily rates feed and normalizes one currency's record from it.

mod fetcher;
mod types;

#[cfg(test)]
pub mod testing;

pub use fetcher::RateFetcher;
pub use types::{RateError, RateRecord};

/// The feed quotes every currency in roubles, so the only record needed is USD
pub const FEED_CURRENCY: &str = "USD";
