//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the domain,
//! catalog, validation and service modules. It owns the request lifecycle:
//! read input, validate, submit, interpret the reply, and restore the
//! interactive state.
//!
//! # Architecture
//!
//! ```text
//! Keys / Timers → Events → handle_event → State Mutations → Actions → Host calls
//!                              ↑                                        ↓
//!                              └──────────── HTTP replies ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Cancellable debounce over host timers
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Focus, input mode and request phase types
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::{Debounce, DEBOUNCE_SECONDS};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Pane, RequestPhase, SearchFocus};
pub use state::{AppState, BUSY_LABEL, SUBMIT_LABEL};
