//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled terminal output. The application
//! layer decides *what* is shown by computing a [`UIViewModel`]; this layer
//! decides *how*.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Component renderers and layout
//! - [`helpers`]: Highlighting, truncation and wrapping
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EditorInfo, EmptyState, FooterInfo, HeaderInfo, OutputPanel, SearchBarInfo, SubmitControl,
    TermPair, UIViewModel, WarningKind,
};
