//! Query string parsing module
//!
//! Decodes `application/x-www-form-urlencoded` query strings.

use std::collections::HashMap;

/// Parsed query parameters
///
/// Only the first non-blank value of each key is kept; blank values are
/// treated as if the key were absent.
#[derive(Debug, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let mut values = HashMap::new();
        if let Some(query) = query {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                if value.is_empty() {
                    continue;
                }
                values
                    .entry(key.into_owned())
                    .or_insert_with(|| value.into_owned());
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
