//! Outcome of a simplification request.

/// Result of one submission to the simplification service.
///
/// Exactly one variant is active. A `Success` term map keeps the order in
/// which the service listed the pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimplifyOutcome {
    /// The service returned a simplified rewrite.
    Success {
        /// Simplified version of the submitted text.
        simplified_text: String,
        /// Ordered `(original, simplified)` term pairs, possibly empty.
        term_map: Vec<(String, String)>,
    },

    /// The service refused the text (for example, no recognized medical terms).
    Blocked {
        /// Refusal message provided by the service.
        message: String,
    },

    /// The request failed or the reply could not be interpreted.
    Error {
        /// Best available description of the failure.
        message: String,
    },
}

impl SimplifyOutcome {
    /// Short label used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Blocked { .. } => "blocked",
            Self::Error { .. } => "error",
        }
    }
}
