//! Converter widget state: two currency selectors with flags, the amount
//! input, the message region and the theme.
//!
//! Conversions are split into [`ConverterWidget::begin_conversion`],
//! [`PendingConversion::resolve`] and [`ConverterWidget::apply`] so the fetch
//! does not hold the widget. Outcomes are applied in the order they resolve,
//! so with overlapping conversions the last one to resolve wins.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

use super::config::WidgetConfig;
use super::currency::{CurrencyCode, CurrencyTable, flag_url};
use super::error::{ConversionError, ErrorKind};
use super::pipeline::{self, ConversionRequest, ConversionResult};
use super::rates::RateProvider;

pub const LIGHT_ICON: &str = "🌙";
pub const DARK_ICON: &str = "☀️";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Glyph on the toggle control; shows the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => LIGHT_ICON,
            Theme::Dark => DARK_ICON,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

#[derive(Debug, Clone)]
struct Selector {
    selected: CurrencyCode,
    flag_url: String,
}

pub struct ConverterWidget {
    currencies: Arc<CurrencyTable>,
    flag_base: String,
    from: Selector,
    to: Selector,
    amount_input: String,
    message: Option<String>,
    last_error: Option<ErrorKind>,
    theme: Theme,
}

impl ConverterWidget {
    pub fn new(
        currencies: Arc<CurrencyTable>,
        config: &WidgetConfig,
        flag_base: &str,
    ) -> Result<Self> {
        let flag_base = flag_base.to_string();
        let from = Self::selector(&currencies, &flag_base, &config.from)?;
        let to = Self::selector(&currencies, &flag_base, &config.to)?;
        Ok(ConverterWidget {
            currencies,
            flag_base,
            from,
            to,
            amount_input: config.amount.clone(),
            message: None,
            last_error: None,
            theme: config.theme,
        })
    }

    fn selector(currencies: &CurrencyTable, flag_base: &str, code: &str) -> Result<Selector> {
        let selected = currencies
            .resolve(code)
            .ok_or_else(|| anyhow!("Unknown currency code: {}", code))?
            .clone();
        let country = currencies
            .country_for(&selected)
            .ok_or_else(|| anyhow!("No country mapped for currency: {}", selected))?;
        Ok(Selector {
            flag_url: flag_url(flag_base, country),
            selected,
        })
    }

    /// Options offered by both selectors, in display order.
    pub fn options(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.currencies.codes()
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    pub fn flag_base(&self) -> &str {
        &self.flag_base
    }

    /// Selects `code` on one side and updates that side's flag only.
    /// Codes outside the currency table are rejected without changing state.
    pub fn select(&mut self, side: Side, code: &str) -> Result<()> {
        let selector = Self::selector(&self.currencies, &self.flag_base, code)?;
        debug!(?side, code = %selector.selected, flag = %selector.flag_url, "Currency selected");
        match side {
            Side::From => self.from = selector,
            Side::To => self.to = selector,
        }
        Ok(())
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn selected(&self, side: Side) -> &CurrencyCode {
        match side {
            Side::From => &self.from.selected,
            Side::To => &self.to.selected,
        }
    }

    pub fn flag_url(&self, side: Side) -> &str {
        match side {
            Side::From => &self.from.flag_url,
            Side::To => &self.to.flag_url,
        }
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount_input = text.into();
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Kind of failure behind the current message, if it is not a result.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        debug!(theme = %self.theme, "Theme toggled");
        self.theme
    }

    /// Snapshots the selections and amount. A clamped amount is written back
    /// to the input before the fetch starts.
    pub fn begin_conversion(&mut self) -> PendingConversion {
        let amount = pipeline::parse_amount(&self.amount_input);
        if amount.was_corrected() {
            self.amount_input = amount.text().to_string();
        }
        PendingConversion {
            request: ConversionRequest {
                from: self.from.selected.clone(),
                to: self.to.selected.clone(),
                amount,
            },
        }
    }

    /// Renders an outcome into the message region, replacing whatever was there.
    pub fn apply(&mut self, outcome: &Result<ConversionResult, ConversionError>) -> &str {
        self.last_error = outcome.as_ref().err().map(ConversionError::kind);
        self.message.insert(pipeline::render(outcome)).as_str()
    }

    pub async fn convert(&mut self, provider: &dyn RateProvider) -> &str {
        let outcome = self.begin_conversion().resolve(provider).await;
        self.apply(&outcome)
    }
}

/// A conversion whose request has been captured but not yet fetched.
#[derive(Debug, Clone)]
pub struct PendingConversion {
    request: ConversionRequest,
}

impl PendingConversion {
    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    pub async fn resolve(
        self,
        provider: &dyn RateProvider,
    ) -> Result<ConversionResult, ConversionError> {
        pipeline::convert(provider, &self.request).await
    }
}
