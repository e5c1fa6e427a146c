use thiserror::Error;

pub const RATE_UNAVAILABLE_MESSAGE: &str = "❌ Conversion not available!";
pub const NETWORK_FAILURE_MESSAGE: &str = "❌ Could not fetch exchange rates. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Amount was empty or below the minimum and got clamped. Never shown as an error.
    InvalidAmount,
    NetworkFailure,
    RateUnavailable,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Failed to fetch rates: {0}")]
    NetworkFailure(String),

    #[error("No rate available from {from} to {to}")]
    RateUnavailable { from: String, to: String },
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::NetworkFailure(_) => ErrorKind::NetworkFailure,
            ConversionError::RateUnavailable { .. } => ErrorKind::RateUnavailable,
        }
    }

    /// Fixed text rendered in place of a result.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConversionError::NetworkFailure(_) => NETWORK_FAILURE_MESSAGE,
            ConversionError::RateUnavailable { .. } => RATE_UNAVAILABLE_MESSAGE,
        }
    }
}

impl From<anyhow::Error> for ConversionError {
    fn from(err: anyhow::Error) -> Self {
        ConversionError::NetworkFailure(format!("{err:#}"))
    }
}
