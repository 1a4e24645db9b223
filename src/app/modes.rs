//! Focus, input mode and request phase types.
//!
//! These enums decide which keybindings are active, where typed characters
//! go, and whether the submit control is usable.
//!
//! # State Machine
//!
//! Focus alternates between two panes:
//! - **Catalog**: browse and search example conditions
//! - **Editor**: type or edit the passage to simplify
//!
//! Inside the catalog pane the input mode is either **Normal** (navigation)
//! or **Search** (typing a query, or navigating its results).
//!
//! The request phase follows the editor contents and the in-flight call:
//!
//! ```text
//!            keystroke               debounce fires
//! Idle ───────────────► Validating ─────────────────► Ready / Idle
//!                                                       │ submit
//!                                                       ▼
//!        Ready / Idle ◄──────── reply + finalizer ── Submitting
//! ```

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Example catalog list with search.
    Catalog,
    /// Free-text passage editor with the submit control.
    Editor,
}

impl Pane {
    /// The other pane.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Catalog => Self::Editor,
            Self::Editor => Self::Catalog,
        }
    }
}

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters are appended to the query.
    Typing,

    /// j/k move through the filtered results, Enter picks one.
    Navigating,
}

/// Input handling mode of the catalog pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation: j/k, `/` to search, Enter to pick an example.
    Normal,

    /// Active search with a [`SearchFocus`].
    Search(SearchFocus),
}

/// Where the editor contents stand relative to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// Nothing submittable: empty or invalid input.
    Idle,

    /// Input changed; validation is waiting for typing to pause.
    Validating,

    /// Input passed validation and can be submitted.
    Ready,

    /// A simplify request is in flight.
    Submitting,
}
