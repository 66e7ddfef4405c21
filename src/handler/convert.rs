//! Currency conversion module
//!
//! Validates `/get_currency` parameters, fetches today's USD rate and
//! converts between roubles and dollars.

use serde::Serialize;
use std::fmt;

use crate::config::UpstreamConfig;
use crate::http::QueryParams;
use crate::logger;
use crate::rates::{RateError, RateFetcher, RateRecord, FEED_CURRENCY};

/// The two currencies the service converts between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "RUB")]
    Rub,
}

impl Currency {
    /// Exact, case-sensitive match on the letter code
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Self::Usd),
            "RUB" => Some(Self::Rub),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Rub => "RUB",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Usd => Self::Rub,
            Self::Rub => Self::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful conversion, serialized as the 200 response body
#[derive(Debug, Serialize)]
pub struct ConversionResult {
    pub currency: RateRecord,
    pub from: Currency,
    pub to: Currency,
    pub amount: f64,
    pub total: f64,
}

/// Every reason a conversion request is answered with 422
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Missing parameter: \"{0}\".")]
    MissingParameter(&'static str),

    #[error("Invalid data format. Amount data must be a number")]
    InvalidAmount,

    #[error("Invalid currency")]
    InvalidCurrency,

    #[error(transparent)]
    Rate(#[from] RateError),
}

/// JSON body shared by all error responses
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ConvertError> for ErrorBody {
    fn from(err: &ConvertError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Validated conversion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub to: Currency,
    pub amount: f64,
}

impl ConversionRequest {
    /// Check order: `to` present, `amount` present, `amount` numeric, `to` supported
    pub fn from_query(params: &QueryParams) -> Result<Self, ConvertError> {
        let to = params
            .get("to")
            .ok_or(ConvertError::MissingParameter("to"))?;
        let amount = params
            .get("amount")
            .ok_or(ConvertError::MissingParameter("amount"))?;
        let amount = parse_amount(amount).ok_or(ConvertError::InvalidAmount)?;
        let to = Currency::parse(to).ok_or(ConvertError::InvalidCurrency)?;

        Ok(Self { to, amount })
    }

    pub const fn source(&self) -> Currency {
        self.to.opposite()
    }
}

/// Surrounding whitespace is ignored; NaN and infinities are rejected
/// because they have no JSON representation.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Apply a RUB-per-USD rate in the requested direction
///
/// An amount whose total overflows `f64` is rejected like a malformed one.
pub fn convert(
    request: ConversionRequest,
    record: RateRecord,
) -> Result<ConversionResult, ConvertError> {
    let total = match request.to {
        Currency::Usd => request.amount / record.rate,
        Currency::Rub => request.amount * record.rate,
    };
    if !total.is_finite() {
        return Err(ConvertError::InvalidAmount);
    }

    Ok(ConversionResult {
        from: request.source(),
        to: request.to,
        amount: request.amount,
        total,
        currency: record,
    })
}

/// Run the whole conversion flow for one request
pub async fn handle_conversion(
    params: &QueryParams,
    upstream: &UpstreamConfig,
) -> Result<ConversionResult, ConvertError> {
    let request = ConversionRequest::from_query(params).inspect_err(|e| {
        logger::log_info(&format!("Invalid request for conversion: {e}"));
    })?;

    logger::log_info(&format!(
        "Request for conversion of {:?} {} to {}",
        request.amount,
        request.source(),
        request.to
    ));

    let record = RateFetcher::new(upstream)
        .fetch_rate(FEED_CURRENCY)
        .await
        .inspect_err(|e| logger::log_info(&format!("Error getting data from service: {e}")))?;

    convert(request, record).inspect_err(|e| {
        logger::log_info(&format!("Invalid request for conversion: {e}"));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{capture, Level};
    use crate::rates::testing::{feed_json, mock_feed, upstream_for, usd_record};

    fn query(raw: &str) -> QueryParams {
        QueryParams::parse(Some(raw))
    }

    #[test]
    fn test_missing_to_is_reported_first() {
        let err = ConversionRequest::from_query(&query("amount=abc")).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: \"to\".");

        let err = ConversionRequest::from_query(&query("")).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: \"to\".");
    }

    #[test]
    fn test_missing_amount() {
        let err = ConversionRequest::from_query(&query("to=EUR")).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: \"amount\".");
    }

    #[test]
    fn test_amount_checked_before_currency() {
        let err = ConversionRequest::from_query(&query("to=EUR&amount=abc")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid data format. Amount data must be a number"
        );
    }

    #[test]
    fn test_non_finite_amount() {
        for raw in ["to=USD&amount=nan", "to=USD&amount=inf", "to=USD&amount=-infinity"] {
            let err = ConversionRequest::from_query(&query(raw)).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidAmount), "{raw}");
        }
    }

    #[test]
    fn test_unsupported_currency() {
        for raw in ["to=EUR&amount=1", "to=usd&amount=1"] {
            let err = ConversionRequest::from_query(&query(raw)).unwrap_err();
            assert_eq!(err.to_string(), "Invalid currency", "{raw}");
        }
    }

    #[test]
    fn test_amount_formats() {
        let req = ConversionRequest::from_query(&query("to=RUB&amount=%201e2%20")).unwrap();
        assert_eq!(req.to, Currency::Rub);
        assert!((req.amount - 100.0).abs() < f64::EPSILON);

        let req = ConversionRequest::from_query(&query("to=USD&amount=-2.5")).unwrap();
        assert!((req.amount + 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_convert_rub_to_usd() {
        let request = ConversionRequest {
            to: Currency::Usd,
            amount: 100.0,
        };
        let result = convert(request, usd_record(90.5)).unwrap();

        assert_eq!(result.from, Currency::Rub);
        assert_eq!(result.to, Currency::Usd);
        assert!((result.total - 100.0 / 90.5).abs() < 1e-12);
    }

    #[test]
    fn test_convert_usd_to_rub() {
        let request = ConversionRequest {
            to: Currency::Rub,
            amount: 10.0,
        };
        let result = convert(request, usd_record(90.5)).unwrap();

        assert_eq!(result.from, Currency::Usd);
        assert_eq!(result.to, Currency::Rub);
        assert!((result.total - 905.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let request = ConversionRequest {
            to: Currency::Rub,
            amount: 1e308,
        };
        let err = convert(request, usd_record(90.5)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidAmount));

        let request = ConversionRequest {
            to: Currency::Usd,
            amount: 1e308,
        };
        let err = convert(request, usd_record(1e-10)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidAmount));
    }

    #[test]
    fn test_result_key_order() {
        let request = ConversionRequest {
            to: Currency::Rub,
            amount: 10.0,
        };
        let result = convert(request, usd_record(90.5)).unwrap();
        let json = serde_json::to_string(&result).unwrap();

        let keys = ["\"currency\"", "\"from\"", "\"to\"", "\"amount\"", "\"total\""];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[tokio::test]
    async fn test_handle_conversion_with_feed() {
        let server = mock_feed(&feed_json(90.5)).await;
        let result = handle_conversion(&query("to=RUB&amount=10"), &upstream_for(&server))
            .await
            .unwrap();

        assert_eq!(result.currency.code.label, "USD");
        assert!((result.total - 905.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_validation_skips_feed() {
        let server = mock_feed(&feed_json(90.5)).await;
        let err = handle_conversion(&query("to=EUR&amount=1"), &upstream_for(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::InvalidCurrency));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feed_error_is_forwarded() {
        let server = mock_feed("not json").await;
        let err = handle_conversion(&query("to=USD&amount=1"), &upstream_for(&server))
            .await
            .unwrap_err();

        assert_eq!(
            ErrorBody::from(&err).error,
            "Failed to get data from the service. Service is unavailable"
        );
    }

    #[tokio::test]
    async fn test_rejection_logs_one_line() {
        let server = mock_feed(&feed_json(90.5)).await;

        capture::start();
        let _ = handle_conversion(&query("to=EUR&amount=1"), &upstream_for(&server)).await;
        let lines = capture::take();

        assert_eq!(
            lines,
            vec![(
                Level::Info,
                "Invalid request for conversion: Invalid currency".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_intent_logged_before_fetch() {
        let server = mock_feed("not json").await;

        capture::start();
        let _ = handle_conversion(&query("to=USD&amount=100"), &upstream_for(&server)).await;
        let lines = capture::take();

        let info: Vec<&str> = lines
            .iter()
            .filter(|(level, _)| *level == Level::Info)
            .map(|(_, message)| message.as_str())
            .collect();
        assert_eq!(info.len(), 2, "{lines:?}");
        assert_eq!(info[0], "Request for conversion of 100.0 RUB to USD");
        assert!(info[1].starts_with("Error getting data from service: "), "{lines:?}");
        assert_eq!(lines.first().map(|(l, _)| *l), Some(Level::Info));
    }

    #[tokio::test]
    async fn test_success_logs_intent_only() {
        let server = mock_feed(&feed_json(90.5)).await;

        capture::start();
        handle_conversion(&query("to=RUB&amount=10"), &upstream_for(&server))
            .await
            .unwrap();
        let lines = capture::take();

        assert_eq!(
            lines,
            vec![(
                Level::Info,
                "Request for conversion of 10.0 USD to RUB".to_string()
            )]
        );
    }
}
