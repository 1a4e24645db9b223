//! Medsimplifier: a Zellij plugin front-end for a medical text simplification
//! service.
//!
//! The plugin lets a user:
//! - browse and search a catalog of example medical passages
//! - edit a passage with live, debounced validation
//! - submit it to the simplification service
//! - read the plain-language rewrite with its term explanations, or the
//!   reason it was refused

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, timers, HTTP
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Request lifecycle
//! │  - Event handling and debounce                      │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Service       │
//! │ (ui/)         │   │ (catalog/)    │   │ (service/)    │
//! │ - Rendering   │   │ - Feed load   │   │ - Requests    │
//! │ - Theming     │   │ - Fallback    │   │ - Replies     │
//! │ - Components  │   │ - Search      │   │ - Outcomes    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/) + validation                │  ← Core types
//! │  - Errors, catalog entries, outcomes                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to OTLP JSON files         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/medsimplifier.wasm" {
//!         service_url "http://localhost:5000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! 1. On load the shim parses [`Config`], installs tracing, builds the
//!    [`AppState`] and asks for web access.
//! 2. Once access is granted the catalog feed is requested. If the feed is
//!    unreachable or malformed, or access is denied, a built-in catalog is
//!    used instead.
//! 3. Keystrokes in the editor revalidate after a 0.3 s pause.
//! 4. Submitting a valid passage sends one `POST /simplify`. The reply is
//!    shown as a [`SimplifyOutcome`] and the editor becomes interactive again.
//!
//! # Example
//!
//! ```rust
//! use medsimplifier::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! // Without web access the built-in catalog is loaded.
//! handle_event(&mut state, &Event::PermissionsResult { granted: false })?;
//! handle_event(&mut state, &Event::SelectExample)?;
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), medsimplifier::SimplifierError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod service;
pub mod ui;
pub mod validation;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Pane, SearchFocus};
pub use domain::{MedicalExample, Result, SimplifierError, SimplifyOutcome};
pub use service::DEFAULT_SERVICE_URL;
pub use ui::Theme;

use service::Endpoints;
use std::collections::BTreeMap;

/// Plugin configuration from the KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the simplification service, without a trailing slash.
    pub service_url: String,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file. `~` refers to the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads options from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. A malformed `service_url` is logged and
    /// replaced by the default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use medsimplifier::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("service_url".to_string(), "https://simplify.example.org/".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.service_url, "https://simplify.example.org");
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let service_url = config.get("service_url").map_or_else(
            || DEFAULT_SERVICE_URL.to_string(),
            |raw| {
                parse_service_url(raw).unwrap_or_else(|e| {
                    tracing::warn!(service_url = %raw, error = %e, "ignoring service_url, using default");
                    DEFAULT_SERVICE_URL.to_string()
                })
            },
        );

        Self {
            service_url,
            theme_name: non_empty(config.get("theme")),
            theme_file: non_empty(config.get("theme_file")),
            trace_level: non_empty(config.get("trace_level")),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from)
}

/// Accepts absolute `http` or `https` URLs and trims trailing slashes.
fn parse_service_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    let host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| SimplifierError::Config(format!("service_url must start with http:// or https://: {raw}")))?;

    if host.is_empty() {
        return Err(SimplifierError::Config(format!("service_url has no host: {raw}")));
    }
    Ok(url.to_string())
}

/// Builds the initial state: resolved theme, service endpoints and an empty
/// catalog awaiting its feed.
///
/// Theme resolution order is `theme_file`, then `theme`, then the default.
/// A theme that fails to load is logged and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(service_url = %config.service_url, "initializing medsimplifier plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(Endpoints::from_base(&config.service_url), theme)
}
