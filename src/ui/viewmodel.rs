//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry no behavior, only display-ready data: windowed
//! catalog rows with highlight ranges, the editor with its live count and
//! verdict, the submit control, and the output panel.
//!
//! # Example
//!
//! ```rust
//! use medsimplifier::ui::viewmodel::{OutputPanel, TermPair};
//!
//! let output = OutputPanel::Simplified {
//!     text: "Pasien mengalami tekanan darah tinggi.".to_string(),
//!     terms: vec![TermPair {
//!         original: "hipertensi".to_string(),
//!         simplified: "tekanan darah tinggi".to_string(),
//!     }],
//! };
//! assert!(matches!(output, OutputPanel::Simplified { .. }));
//! ```

use crate::validation::Severity;

/// Width of the catalog NAME column, including its gap.
pub const NAME_COLUMN_WIDTH: usize = 28;

/// Width of the catalog CATEGORY column, including its gap.
pub const CATEGORY_COLUMN_WIDTH: usize = 18;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Visible window of catalog rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Rows reserved for the catalog list, whether filled or not.
    pub catalog_height: usize,

    /// Whether keyboard input goes to the catalog pane.
    pub catalog_focused: bool,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Shown in place of the catalog rows when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    pub editor: EditorInfo,
    pub submit: SubmitControl,

    /// Result of the last submission. Cleared when a new one starts.
    pub output: Option<OutputPanel>,

    /// Banner for locally refused submissions.
    pub alert: Option<String>,
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Resolved name, truncated to the name column.
    pub name: String,

    /// Resolved category.
    pub category: String,

    /// Resolved description, truncated to the remaining width.
    pub description: String,

    /// Whether this row is the selection cursor.
    pub is_selected: bool,

    /// Character ranges of `name` matching the search query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the focused pane and mode.
    pub keybindings: String,
}

/// Message shown when the catalog list has no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether characters are currently typed into the query.
    pub is_typing: bool,

    /// Number of catalog entries matching the query.
    pub match_count: usize,
}

/// Passage editor with its validation feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInfo {
    /// Raw editor text.
    pub text: String,

    /// Live character count, e.g. `"42/256"`.
    pub char_count: String,

    /// Whether the count exceeds the maximum.
    pub over_limit: bool,

    /// Validation message, possibly empty.
    pub message: String,

    pub severity: Severity,

    /// Whether validation is waiting for typing to pause.
    pub is_validating: bool,

    pub is_focused: bool,
}

/// The submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    /// `"Simplify"`, or the busy label while a request is in flight.
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
}

/// Output panel contents for the last outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPanel {
    /// Simplified rewrite with its term explanations.
    Simplified {
        text: String,
        terms: Vec<TermPair>,
    },

    /// Refusal or failure notice.
    Warning {
        kind: WarningKind,
        message: String,
    },
}

/// Why the output panel shows a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The service refused the text.
    Blocked,
    /// The request or its reply failed.
    Failed,
}

impl WarningKind {
    /// Panel title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Blocked => "Text blocked",
            Self::Failed => "Simplification failed",
        }
    }
}

/// One `original → simplified` term explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPair {
    pub original: String,
    pub simplified: String,
}
