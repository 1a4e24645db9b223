//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns a `Vec<Action>` and the
//! plugin shim executes each one in order.
//!
//! # Example
//!
//! ```rust
//! use medsimplifier::app::Action;
//! use medsimplifier::service::ServiceRequest;
//!
//! let actions = vec![
//!     Action::ScheduleTimer { seconds: 0.3 },
//!     Action::SendRequest(ServiceRequest::fetch_catalog("http://localhost:5000/feed.json")),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::service::ServiceRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Arms a one-shot host timer. Delivered back as a debounce tick.
    ScheduleTimer {
        /// Delay before the tick, in seconds.
        seconds: f64,
    },

    /// Performs an HTTP request through the host.
    ///
    /// The reply comes back as [`Event::ServiceResponse`](crate::app::Event::ServiceResponse).
    SendRequest(ServiceRequest),
}
