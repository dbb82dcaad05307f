//! Error type shared by the pricing crates
//!
//! Malformed numeric input is never an error in this workspace: it coerces
//! to zero. What remains are lookups that fail, bad configuration and a
//! remote calculator that cannot answer.

use std::fmt::Display;
use thiserror::Error;

/// Pricing error type
#[derive(Debug, Error)]
pub enum Error {
    /// An IVA or withholding id is not in the catalog
    #[error("Tax rate not found: {0}")]
    TaxRateNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The remote calculator could not produce a usable answer
    #[error("Remote pricing unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Reference data that is not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error message with what was being done
pub trait ErrorExt<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn();
            match e {
                Error::TaxRateNotFound(msg) => Error::TaxRateNotFound(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::RemoteUnavailable(msg) => Error::RemoteUnavailable(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                // serde_json::Error carries its own position information
                Error::Serialization(e) => Error::Internal(format!("{}: {}", context, e)),
            }
        })
    }
}

/// Wrap a foreign error as [`Error::Internal`]
pub trait IntoError {
    fn into_error(self, message: &str) -> Error;
}

impl<E: std::error::Error> IntoError for E {
    fn into_error(self, message: &str) -> Error {
        Error::Internal(format!("{}: {}", message, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_prefixed_to_message() {
        let result: Result<()> = Err(Error::TaxRateNotFound("IVA rate 99".to_string()));
        let err = result.with_context(|| "Resolving sale line").unwrap_err();
        assert_eq!(err.to_string(), "Tax rate not found: Resolving sale line: IVA rate 99");
    }

    #[test]
    fn context_on_bad_json_names_the_source() {
        let parsed: Result<serde_json::Value> = serde_json::from_str("{").map_err(Error::from);
        let err = parsed.with_context(|| "tax_rates.json").unwrap_err();
        assert!(err.to_string().starts_with("Internal error: tax_rates.json: "));
    }

    #[test]
    fn foreign_errors_become_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        match io.into_error("Reading tax rates") {
            Error::Internal(msg) => assert_eq!(msg, "Reading tax rates: disk gone"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
