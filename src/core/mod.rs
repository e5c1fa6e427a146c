//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod rates;
pub mod widget;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, CurrencyTable};
pub use error::{ConversionError, ErrorKind};
pub use pipeline::{ConversionRequest, ConversionResult};
pub use rates::{RateProvider, RateTable};
pub use widget::{ConverterWidget, Side, Theme};
