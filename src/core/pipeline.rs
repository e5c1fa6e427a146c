//! The conversion pipeline: amount clamping, rate lookup and result formatting

use rust_decimal::prelude::*;
use std::fmt::Display;
use tracing::{debug, instrument, warn};

use super::currency::CurrencyCode;
use super::error::{ConversionError, ErrorKind};
use super::rates::{RateProvider, RateTable};

pub const MIN_AMOUNT: f64 = 1.0;

/// Amount as entered by the user, after clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    text: String,
    value: f64,
    corrected: bool,
}

impl Amount {
    /// Text shown in the result line and written back to the input field.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// True when the input was replaced with the minimum amount.
    pub fn was_corrected(&self) -> bool {
        self.corrected
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.corrected.then_some(ErrorKind::InvalidAmount)
    }
}

/// Parses the amount input, substituting 1 when it is empty, below 1 or not a
/// finite number.
pub fn parse_amount(input: &str) -> Amount {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= MIN_AMOUNT => Amount {
            text: trimmed.to_string(),
            value,
            corrected: false,
        },
        _ => {
            debug!(input, "Clamping amount to minimum");
            Amount {
                text: "1".to_string(),
                value: MIN_AMOUNT,
                corrected: true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub amount: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
    pub converted: String,
    pub date: Option<String>,
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            self.amount, self.from, self.converted, self.to
        )
    }
}

/// Formats with exactly two decimals, rounding halves away from zero on the
/// exact binary value.
pub fn format_two_decimals(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        // Outside Decimal's range
        None => format!("{value:.2}"),
    }
}

pub fn compute(
    request: &ConversionRequest,
    table: &RateTable,
) -> Result<ConversionResult, ConversionError> {
    let rate = table.rate(&request.from, &request.to).ok_or_else(|| {
        ConversionError::RateUnavailable {
            from: request.from.to_string(),
            to: request.to.to_string(),
        }
    })?;

    Ok(ConversionResult {
        amount: request.amount.text().to_string(),
        from: request.from.clone(),
        to: request.to.clone(),
        rate,
        converted: format_two_decimals(request.amount.value() * rate),
        date: table.date.clone(),
    })
}

#[instrument(
    name = "Convert",
    skip(provider, request),
    fields(from = %request.from, to = %request.to, amount = request.amount.text())
)]
pub async fn convert(
    provider: &dyn RateProvider,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConversionError> {
    let table = provider.fetch_rates(&request.from).await.map_err(|e| {
        warn!(error = %e, "Rate fetch failed");
        ConversionError::from(e)
    })?;
    let result = compute(request, &table);
    match &result {
        Ok(r) => debug!(rate = r.rate, converted = %r.converted, "Conversion done"),
        Err(e) => debug!(error = %e, "Conversion not available"),
    }
    result
}

/// Text for the message region.
pub fn render(outcome: &Result<ConversionResult, ConversionError>) -> String {
    match outcome {
        Ok(result) => result.to_string(),
        Err(e) => e.user_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{NETWORK_FAILURE_MESSAGE, RATE_UNAVAILABLE_MESSAGE};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticRates(serde_json::Value);

    #[async_trait]
    impl RateProvider for StaticRates {
        async fn fetch_rates(&self, _source: &CurrencyCode) -> anyhow::Result<RateTable> {
            Ok(serde_json::from_value(self.0.clone())?)
        }
    }

    struct Offline;

    #[async_trait]
    impl RateProvider for Offline {
        async fn fetch_rates(&self, _source: &CurrencyCode) -> anyhow::Result<RateTable> {
            Err(anyhow!("connection refused"))
        }
    }

    fn request(from: &str, to: &str, amount: &str) -> ConversionRequest {
        ConversionRequest {
            from: CurrencyCode::new(from),
            to: CurrencyCode::new(to),
            amount: parse_amount(amount),
        }
    }

    fn usd_table() -> RateTable {
        serde_json::from_value(json!({
            "date": "2024-03-06",
            "usd": { "inr": 83.25, "zero": 0 }
        }))
        .unwrap()
    }

    #[test]
    fn test_amount_below_minimum_is_clamped() {
        for input in ["", "   ", "0", "0.5", "-10", "abc", "inf", "NaN"] {
            let amount = parse_amount(input);
            assert_eq!(amount.value(), 1.0, "input {input:?}");
            assert_eq!(amount.text(), "1", "input {input:?}");
            assert!(amount.was_corrected());
            assert_eq!(amount.error_kind(), Some(ErrorKind::InvalidAmount));
        }
    }

    #[test]
    fn test_amount_at_or_above_minimum_is_kept() {
        let amount = parse_amount("1");
        assert_eq!(amount.value(), 1.0);
        assert!(!amount.was_corrected());

        let amount = parse_amount(" 100.50 ");
        assert_eq!(amount.value(), 100.5);
        assert_eq!(amount.text(), "100.50");
        assert!(amount.error_kind().is_none());
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_two_decimals(8325.0), "8325.00");
        assert_eq!(format_two_decimals(0.125), "0.13");
        assert_eq!(format_two_decimals(1.005), "1.00");
        assert_eq!(format_two_decimals(2.5), "2.50");
        assert_eq!(format_two_decimals(1234.5678), "1234.57");
    }

    #[test]
    fn test_compute_formats_result() {
        let result = compute(&request("USD", "INR", "100"), &usd_table()).unwrap();
        assert_eq!(result.to_string(), "100 USD = 8325.00 INR");
        assert_eq!(result.rate, 83.25);
        assert_eq!(result.date.as_deref(), Some("2024-03-06"));
    }

    #[test]
    fn test_compute_missing_or_zero_rate() {
        let err = compute(&request("USD", "xyz", "100"), &usd_table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateUnavailable);

        let err = compute(&request("USD", "zero", "100"), &usd_table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateUnavailable);
        assert_eq!(render(&Err(err)), RATE_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_convert_with_provider() {
        let provider = StaticRates(json!({ "usd": { "inr": 83.25 } }));
        let outcome = convert(&provider, &request("usd", "inr", "")).await;
        assert_eq!(render(&outcome), "1 USD = 83.25 INR");
    }

    #[tokio::test]
    async fn test_convert_network_failure() {
        let outcome = convert(&Offline, &request("USD", "INR", "10")).await;
        let err = outcome.as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(render(&outcome), NETWORK_FAILURE_MESSAGE);
    }
}
