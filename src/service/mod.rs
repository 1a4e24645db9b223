//! Remote service interface: endpoint addresses, request descriptors and reply
//! interpretation.
//!
//! - `messages`: Outbound requests and inbound replies with trace propagation
//! - `response`: Mapping of simplify replies to [`SimplifyOutcome`](crate::SimplifyOutcome)

pub mod messages;
pub mod response;

pub use messages::{HttpMethod, RequestKind, ServiceReply, ServiceRequest, TraceContext};
pub use response::interpret_simplify_reply;

/// Path of the simplification endpoint, relative to the service URL.
pub const SIMPLIFY_PATH: &str = "/simplify";

/// Path of the static catalog feed, relative to the service URL.
pub const CATALOG_PATH: &str = "/static/data/medical_examples.json";

/// Default base URL of the simplification service.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Fully qualified URLs of the two consumed endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub catalog_url: String,
    pub simplify_url: String,
}

impl Endpoints {
    /// Derives both endpoint URLs from a base service URL.
    ///
    /// Trailing slashes on the base are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use medsimplifier::service::Endpoints;
    ///
    /// let endpoints = Endpoints::from_base("https://simplify.example.org/");
    /// assert_eq!(endpoints.simplify_url, "https://simplify.example.org/simplify");
    /// ```
    #[must_use]
    pub fn from_base(service_url: &str) -> Self {
        let base = service_url.trim().trim_end_matches('/');
        Self {
            catalog_url: format!("{base}{CATALOG_PATH}"),
            simplify_url: format!("{base}{SIMPLIFY_PATH}"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_SERVICE_URL)
    }
}
