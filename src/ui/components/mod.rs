//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box
//! - [`catalog`]: Example list with NAME, CATEGORY and DESCRIPTION columns
//! - [`empty`]: Message shown in place of an empty list
//! - [`editor`]: Passage editor, live count, verdict and submit button
//! - [`output`]: Simplified text with term explanations, warnings, alert
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]                 ← focus color while the catalog has focus
//! [Search Bar - 3 lines]   ← search mode only
//! [Table Headers]
//! [Catalog Rows]           ← fixed height, empty state drawn inside
//! [Border]                 ← focus color while the editor has focus
//! [Editor Block]
//! [Border]
//! [Output Panel]           ← fills the remaining rows
//! [Alert]
//! [Border]
//! [Footer]
//! ```

mod catalog;
mod editor;
mod empty;
mod footer;
mod header;
mod output;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use catalog::{render_table_headers, render_table_rows};
use editor::render_editor;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use output::{render_alert, render_output};
use search::render_search_bar;

/// Renders a horizontal border line. Returns the next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout top to bottom.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let colors = &theme.colors;
    let catalog_border = if vm.catalog_focused { &colors.focus_border } else { &colors.border };
    let editor_border = if vm.editor.is_focused { &colors.focus_border } else { &colors.border };

    let mut current_row = 2; // Row 1 stays blank.

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, catalog_border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, theme);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, vm.catalog_height, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, vm.catalog_focused, theme, cols);
    }
    current_row += vm.catalog_height;

    current_row = render_border(current_row, editor_border, cols);
    current_row = render_editor(current_row, &vm.editor, &vm.submit, theme, cols);
    current_row = render_border(current_row, &colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let footer_border_row = footer_row.saturating_sub(1);
    let alert_row = footer_border_row.saturating_sub(1);

    let output_height = alert_row.saturating_sub(current_row);
    render_output(current_row, output_height, vm.output.as_ref(), theme, cols);
    render_alert(alert_row, vm.alert.as_deref(), theme, cols);

    render_border(footer_border_row, &colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
