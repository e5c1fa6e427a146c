//! Exchange-rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

use super::currency::CurrencyCode;

/// Rate document for a single source currency, as served by the rates API:
/// `{ "date": "2024-03-06", "usd": { "inr": 83.25, ... } }`.
///
/// Fetched per conversion and dropped afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<String>,
    #[serde(flatten)]
    currencies: HashMap<String, Value>,
}

/// The date is informational only, so an unexpected shape must not reject
/// the document.
fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(date)) => Some(date),
        Some(Value::Number(date)) => Some(date.to_string()),
        _ => None,
    })
}

impl RateTable {
    /// Rate from `source` to `target`.
    ///
    /// `None` when either key is absent, the value is not a number, or it is
    /// exactly zero. A zero rate cannot be told apart from a missing one.
    pub fn rate(&self, source: &CurrencyCode, target: &CurrencyCode) -> Option<f64> {
        self.currencies
            .get(&source.api_key())
            .and_then(|rates| rates.get(target.api_key()))
            .and_then(Value::as_f64)
            .filter(|rate| *rate != 0.0)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, source: &CurrencyCode) -> Result<RateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> RateTable {
        serde_json::from_value(value).expect("valid rate table")
    }

    #[test]
    fn test_rate_lookup() {
        let rates = table(json!({
            "date": "2024-03-06",
            "usd": { "inr": 83.25, "eur": 0.92 }
        }));
        let usd = CurrencyCode::new("USD");
        assert_eq!(rates.date.as_deref(), Some("2024-03-06"));
        assert_eq!(rates.rate(&usd, &CurrencyCode::new("INR")), Some(83.25));
        assert_eq!(rates.rate(&usd, &CurrencyCode::new("eur")), Some(0.92));
    }

    #[test]
    fn test_missing_zero_and_non_numeric_rates_are_unavailable() {
        let rates = table(json!({
            "usd": { "inr": 0, "gbp": "0.78", "jpy": null }
        }));
        let usd = CurrencyCode::new("USD");
        assert_eq!(rates.rate(&usd, &CurrencyCode::new("XYZ")), None);
        assert_eq!(rates.rate(&usd, &CurrencyCode::new("INR")), None);
        assert_eq!(rates.rate(&usd, &CurrencyCode::new("GBP")), None);
        assert_eq!(rates.rate(&usd, &CurrencyCode::new("JPY")), None);
        assert!(rates.date.is_none());
    }

    #[test]
    fn test_missing_source_table() {
        let rates = table(json!({ "eur": { "inr": 90.1 } }));
        assert_eq!(
            rates.rate(&CurrencyCode::new("USD"), &CurrencyCode::new("INR")),
            None
        );
    }

    #[test]
    fn test_unexpected_date_shape_keeps_rates() {
        let rates = table(json!({ "date": 20240306, "usd": { "inr": 83.25 } }));
        assert_eq!(rates.date.as_deref(), Some("20240306"));
        assert_eq!(
            rates.rate(&CurrencyCode::new("USD"), &CurrencyCode::new("INR")),
            Some(83.25)
        );

        let rates = table(json!({ "date": { "day": 6 }, "usd": { "inr": 83.25 } }));
        assert!(rates.date.is_none());
        assert_eq!(
            rates.rate(&CurrencyCode::new("USD"), &CurrencyCode::new("INR")),
            Some(83.25)
        );
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let parsed: std::result::Result<RateTable, _> = serde_json::from_str("[1, 2, 3]");
        assert!(parsed.is_err());
    }
}
