//! Domain layer for the simplifier plugin.
//!
//! Core types independent of Zellij APIs and of the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`example`]: Catalog entry model and display-field resolution
//! - [`outcome`]: Tagged result of a simplification request

pub mod error;
pub mod example;
pub mod outcome;

pub use error::{Result, SimplifierError};
pub use example::{DisplayFields, MedicalExample};
pub use outcome::SimplifyOutcome;
