//! Catalog table renderer.
//!
//! Three columns: NAME, CATEGORY and DESCRIPTION. The selected row gets a
//! full-width selection background while the catalog has focus, and name
//! matches are highlighted during search.

use crate::ui::helpers::{self, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, CATEGORY_COLUMN_WIDTH, NAME_COLUMN_WIDTH};

/// Renders the column headers. Returns the next available row.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<name$}{:<category$}{}",
        "NAME",
        "CATEGORY",
        "DESCRIPTION",
        name = NAME_COLUMN_WIDTH,
        category = CATEGORY_COLUMN_WIDTH
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`. Returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], focused: bool, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, focused, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, focused: bool, theme: &Theme, cols: usize) -> usize {
    let is_highlighted = item.is_selected && focused;

    position_cursor(row, 1);

    if is_highlighted {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else if item.is_selected {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, is_highlighted);
    let name_len = item.name.chars().count();
    pad(NAME_COLUMN_WIDTH.saturating_sub(name_len));

    if !is_highlighted {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.category);
    pad(CATEGORY_COLUMN_WIDTH.saturating_sub(item.category.chars().count()));

    print!("{}", item.description);

    let line_len = NAME_COLUMN_WIDTH + CATEGORY_COLUMN_WIDTH + item.description.chars().count();
    pad(cols.saturating_sub(line_len));

    print!("{}", Theme::reset());
    row + 1
}
