//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of all transient UI state: the catalog,
//! the filtered view of it, the editor contents with their verdict, the
//! request phase, the debounce, the last outcome and the alert banner.
//!
//! # State Components
//!
//! - **Catalog**: load-once example store and its filtered subsequence
//! - **Selection**: cursor position within the filtered rows
//! - **Focus / Input Mode**: which pane gets keys and whether search is active
//! - **Editor**: raw passage text plus the current [`ValidationVerdict`]
//! - **Lifecycle**: [`RequestPhase`], [`Debounce`], last [`SimplifyOutcome`]
//!
//! # Example
//!
//! ```rust
//! use medsimplifier::app::AppState;
//! use medsimplifier::service::Endpoints;
//! use medsimplifier::ui::Theme;
//!
//! let state = AppState::new(Endpoints::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(40, 100);
//! assert_eq!(viewmodel.submit.label, "Simplify");
//! assert!(!viewmodel.submit.enabled);
//! ```

use super::debounce::Debounce;
use super::modes::{InputMode, Pane, RequestPhase, SearchFocus};
use crate::catalog::{self, CatalogStore};
use crate::domain::{MedicalExample, Result, SimplifyOutcome};
use crate::service::{Endpoints, ServiceRequest};
use crate::ui::helpers::truncate_chars;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EditorInfo, EmptyState, FooterInfo, HeaderInfo, OutputPanel, SearchBarInfo, SubmitControl,
    TermPair, UIViewModel, WarningKind, CATEGORY_COLUMN_WIDTH, NAME_COLUMN_WIDTH,
};
use crate::validation::{self, ValidationVerdict, MAX_INPUT_CHARS};

/// Submit label while idle.
pub const SUBMIT_LABEL: &str = "Simplify";

/// Submit label while a request is in flight.
pub const BUSY_LABEL: &str = "Simplifying...";

const MAX_CATALOG_ROWS: usize = 8;

/// Rows used by everything except the catalog list in normal mode: blank
/// line, header, border, column headers, border, editor block, border,
/// minimum output area, alert line, border and footer.
const NORMAL_CHROME_ROWS: usize = 1 + 1 + 1 + 1 + 1 + EDITOR_BLOCK_ROWS + 1 + 4 + 1 + 1 + 1;

/// Search bar height.
const SEARCH_BAR_ROWS: usize = 3;

/// Title, text lines, message and button.
pub const EDITOR_BLOCK_ROWS: usize = 1 + EDITOR_TEXT_ROWS + 1 + 1;

/// Lines of wrapped editor text shown.
pub const EDITOR_TEXT_ROWS: usize = 3;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Load-once example catalog.
    pub catalog: CatalogStore,

    /// Catalog entries matching the search query, in catalog order.
    pub filtered_examples: Vec<MedicalExample>,

    /// Zero-based index within `filtered_examples`.
    pub selected_index: usize,

    pub focus: Pane,
    pub input_mode: InputMode,
    pub search_query: String,

    /// Raw editor text.
    pub input: String,

    /// Verdict for `input` as of the last validation run.
    pub verdict: ValidationVerdict,

    pub phase: RequestPhase,
    pub debounce: Debounce,

    /// Outcome of the last finished submission.
    pub outcome: Option<SimplifyOutcome>,

    /// Banner text for a refused submission. Cleared on the next edit.
    pub alert: Option<String>,

    pub endpoints: Endpoints,
    pub theme: Theme,
}

impl AppState {
    /// Creates a state with an unloaded catalog and an empty editor.
    #[must_use]
    pub fn new(endpoints: Endpoints, theme: Theme) -> Self {
        Self {
            catalog: CatalogStore::new(),
            filtered_examples: vec![],
            selected_index: 0,
            focus: Pane::Catalog,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            input: String::new(),
            verdict: ValidationVerdict::default(),
            phase: RequestPhase::Idle,
            debounce: Debounce::default(),
            outcome: None,
            alert: None,
            endpoints,
            theme,
        }
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_examples.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_examples.len();
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_examples.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_examples.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_example(&self) -> Option<&MedicalExample> {
        self.filtered_examples.get(self.selected_index)
    }

    /// Recomputes `filtered_examples` from the catalog and query, and clamps
    /// the cursor.
    pub fn apply_search_filter(&mut self) {
        self.filtered_examples = catalog::filter(self.catalog.get(), &self.search_query);

        if self.filtered_examples.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_examples.len() - 1);
        }
    }

    /// Applies an edit to the editor text and restarts the debounce.
    ///
    /// Returns the delay of the timer to request from the host.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut String)) -> f64 {
        edit(&mut self.input);
        self.alert = None;
        if self.phase != RequestPhase::Submitting {
            self.phase = RequestPhase::Validating;
        }

        tracing::trace!(input_len = self.input.chars().count(), "editor input changed");
        self.debounce.schedule()
    }

    /// Validates the current editor text and settles the phase.
    ///
    /// An in-flight submission keeps its phase; only the verdict is updated.
    pub fn run_validation(&mut self) {
        self.verdict = validation::validate(&self.input);
        if self.phase != RequestPhase::Submitting {
            self.phase = if self.verdict.is_valid {
                RequestPhase::Ready
            } else {
                RequestPhase::Idle
            };
        }
    }

    /// Copies the selected catalog example into the editor and focuses it.
    ///
    /// Validation runs immediately and any prior output is cleared. Returns
    /// `false` when nothing is selected.
    pub fn load_selected_example(&mut self) -> bool {
        let Some(example) = self.selected_example() else {
            return false;
        };
        let text = example.display_fields().example.to_string();

        tracing::debug!(example_id = %example.id, "example loaded into editor");

        self.input = text;
        self.focus = Pane::Editor;
        self.debounce.cancel();
        self.outcome = None;
        self.alert = None;
        self.run_validation();
        true
    }

    /// Starts a submission of the current editor text.
    ///
    /// Returns the request to send, or `None` when the submission is refused:
    /// either one is already in flight, or the input fails validation (which
    /// sets the alert banner).
    ///
    /// # Errors
    ///
    /// Returns an error if the request body cannot be serialized.
    pub fn begin_submission(&mut self) -> Result<Option<ServiceRequest>> {
        if self.phase == RequestPhase::Submitting {
            tracing::debug!("submission already in flight, ignoring");
            return Ok(None);
        }

        self.debounce.cancel();
        self.run_validation();

        if !self.verdict.is_valid {
            let reason = if self.verdict.message.is_empty() {
                "enter a passage to simplify"
            } else {
                self.verdict.message.as_str()
            };
            self.alert = Some(format!("Cannot simplify: {reason}"));
            tracing::debug!(reason = %reason, "submission refused");
            return Ok(None);
        }

        let request = ServiceRequest::simplify(&self.endpoints.simplify_url, self.input.trim())?;

        self.phase = RequestPhase::Submitting;
        self.outcome = None;
        self.alert = None;

        tracing::debug!(url = %request.url, "submission started");
        Ok(Some(request))
    }

    /// Records the outcome of the in-flight submission and restores the
    /// interactive state from a fresh verdict on the current input.
    pub fn finish_submission(&mut self, outcome: SimplifyOutcome) {
        tracing::debug!(outcome = outcome.kind(), "submission finished");

        self.outcome = Some(outcome);
        self.phase = RequestPhase::Idle;
        self.run_validation();
    }

    /// Whether the submit control accepts activation.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.verdict.is_valid && self.phase != RequestPhase::Submitting
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.phase == RequestPhase::Submitting {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Computes a renderable UI view model for the given terminal size.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Reserve rows for everything but the catalog list
    /// 2. Center the window around the selected row
    /// 3. Shift the window back near the end to keep it full
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let catalog_height = self.calculate_available_rows(rows);

        let (display_items, selected_display_index) = if self.filtered_examples.is_empty() {
            (vec![], 0)
        } else {
            let mut visible_start = self.selected_index.saturating_sub(catalog_height / 2);
            let visible_end = (visible_start + catalog_height).min(self.filtered_examples.len());

            let actual_count = visible_end - visible_start;
            if actual_count < catalog_height && self.filtered_examples.len() >= catalog_height {
                visible_start = visible_end.saturating_sub(catalog_height);
            }

            let items = self.filtered_examples[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(relative_idx, example)| {
                    self.compute_display_item(example, visible_start + relative_idx, cols)
                })
                .collect();

            (items, self.selected_index.saturating_sub(visible_start))
        };

        UIViewModel {
            display_items,
            selected_index: selected_display_index,
            catalog_height,
            catalog_focused: self.focus == Pane::Catalog,
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            search_bar: self.compute_search_bar(),
            editor: self.compute_editor(),
            submit: SubmitControl {
                label: self.submit_label().to_string(),
                enabled: self.submit_enabled(),
                busy: self.phase == RequestPhase::Submitting,
            },
            output: self.outcome.as_ref().map(Self::compute_output),
            alert: self.alert.clone(),
        }
    }

    fn compute_display_item(&self, example: &MedicalExample, absolute_idx: usize, cols: usize) -> DisplayItem {
        let fields = example.display_fields();
        let description_width = cols.saturating_sub(NAME_COLUMN_WIDTH + CATEGORY_COLUMN_WIDTH + 2);

        let name = truncate_chars(&fields.name, NAME_COLUMN_WIDTH - 2);
        let highlight_ranges = if matches!(self.input_mode, InputMode::Search(_)) {
            catalog::match_range(&name, &self.search_query)
                .into_iter()
                .collect()
        } else {
            vec![]
        };

        DisplayItem {
            name,
            category: truncate_chars(fields.category, CATEGORY_COLUMN_WIDTH - 2),
            description: truncate_chars(fields.description, description_width),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let total = self.catalog.get().len();
        let title = if self.catalog.is_loaded() {
            format!(
                " Medical Text Simplifier  ({}/{total} examples) ",
                self.filtered_examples.len()
            )
        } else {
            " Medical Text Simplifier ".to_string()
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.focus, self.input_mode) {
            (Pane::Editor, _) => "Type to edit  Enter/Ctrl+s: simplify  Tab/Esc: catalog  Ctrl+q: quit",
            (Pane::Catalog, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (Pane::Catalog, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: use example  Tab: editor"
            }
            (Pane::Catalog, InputMode::Normal) => {
                "j/k: navigate  /: search  Enter: use example  Tab: editor  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_examples.is_empty() {
            return None;
        }

        Some(if self.catalog.is_loaded() {
            EmptyState {
                message: "No examples found".to_string(),
                subtitle: "Try a different search term".to_string(),
            }
        } else {
            EmptyState {
                message: "Loading examples...".to_string(),
                subtitle: "Waiting for the catalog feed".to_string(),
            }
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing && self.focus == Pane::Catalog,
                match_count: self.filtered_examples.len(),
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_editor(&self) -> EditorInfo {
        let length = self.input.chars().count();
        EditorInfo {
            text: self.input.clone(),
            char_count: format!("{length}/{MAX_INPUT_CHARS}"),
            over_limit: length > MAX_INPUT_CHARS,
            message: self.verdict.message.clone(),
            severity: self.verdict.severity,
            is_validating: self.phase == RequestPhase::Validating,
            is_focused: self.focus == Pane::Editor,
        }
    }

    fn compute_output(outcome: &SimplifyOutcome) -> OutputPanel {
        match outcome {
            SimplifyOutcome::Success {
                simplified_text,
                term_map,
            } => OutputPanel::Simplified {
                text: simplified_text.clone(),
                terms: term_map
                    .iter()
                    .map(|(original, simplified)| TermPair {
                        original: original.clone(),
                        simplified: simplified.clone(),
                    })
                    .collect(),
            },
            SimplifyOutcome::Blocked { message } => OutputPanel::Warning {
                kind: WarningKind::Blocked,
                message: message.clone(),
            },
            SimplifyOutcome::Error { message } => OutputPanel::Warning {
                kind: WarningKind::Failed,
                message: message.clone(),
            },
        }
    }

    /// Rows available to the catalog list after the fixed blocks.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Normal => NORMAL_CHROME_ROWS,
            InputMode::Search(_) => NORMAL_CHROME_ROWS + SEARCH_BAR_ROWS,
        };
        total_rows.saturating_sub(chrome).clamp(1, MAX_CATALOG_ROWS)
    }
}
