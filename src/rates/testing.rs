//! Shared helpers for tests that need a fake rates feed

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::UpstreamConfig;
use crate::rates::types::CurrencyCode;
use crate::rates::RateRecord;

pub const FEED_PATH: &str = "/daily_json.js";

/// A trimmed-down daily feed with USD at `usd_rate`
pub fn feed_json(usd_rate: f64) -> String {
    serde_json::json!({
        "Date": "2024-03-07T11:30:00+03:00",
        "PreviousDate": "2024-03-06T11:30:00+03:00",
        "Timestamp": "2024-03-06T20:00:00+03:00",
        "Valute": {
            "USD": {
                "ID": "R01235",
                "NumCode": "840",
                "CharCode": "USD",
                "Nominal": 1,
                "Name": "Доллар США",
                "Value": usd_rate,
                "Previous": 90.1
            },
            "EUR": {
                "ID": "R01239",
                "NumCode": "978",
                "CharCode": "EUR",
                "Nominal": 1,
                "Name": "Евро",
                "Value": 98.2,
                "Previous": 97.9
            }
        }
    })
    .to_string()
}

pub async fn mock_feed(body: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    server
}

pub fn upstream_for(server: &MockServer) -> UpstreamConfig {
    UpstreamConfig {
        url: format!("{}{FEED_PATH}", server.uri()),
        timeout_secs: Some(5),
    }
}

pub fn usd_record(rate: f64) -> RateRecord {
    RateRecord {
        date: "2024-03-07T11:30:00+03:00".to_string(),
        code: CurrencyCode {
            num: "840".to_string(),
            label: "USD".to_string(),
        },
        name: "Доллар США".to_string(),
        rate,
    }
}
