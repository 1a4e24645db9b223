//! Error types for the medical text simplifier plugin.
//!
//! This module defines the centralized error type [`SimplifierError`] and a type
//! alias [`Result`] used throughout the crate. All variants are implemented with
//! `thiserror`.

use thiserror::Error;

/// The main error type for simplifier plugin operations.
///
/// None of these errors are fatal to a running session. Catalog errors are
/// absorbed by the fallback list, service errors become a warning panel, and
/// configuration or theme errors fall back to defaults.
///
/// # Examples
///
/// ```
/// use medsimplifier::SimplifierError;
///
/// fn read_feed(status: u16) -> Result<(), SimplifierError> {
///     Err(SimplifierError::Catalog(format!("feed returned status {status}")))
/// }
/// ```
#[derive(Debug, Error)]
pub enum SimplifierError {
    /// The catalog feed could not be fetched or normalized.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The simplification service could not be reached or answered with
    /// something other than a JSON document.
    #[error("Request failed with status {status}{}", format_body(.body))]
    Service {
        /// HTTP status reported by the host for the failed request.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// A payload was not valid JSON or had an unexpected shape.
    #[error("Invalid response from service: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// A specialized `Result` type for simplifier operations.
pub type Result<T> = std::result::Result<T, SimplifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_without_body_reports_status_only() {
        let err = SimplifierError::Service {
            status: 503,
            body: "  ".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 503");
    }

    #[test]
    fn service_error_appends_body() {
        let err = SimplifierError::Service {
            status: 400,
            body: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 400: connection refused");
    }
}
