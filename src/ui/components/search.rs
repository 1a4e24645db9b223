//! Search box.

use crate::ui::helpers::{pad, position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Columns left blank on each side of the box.
const MARGIN: usize = 5;

/// Renders the three-row box and returns the row below it.
///
/// ```text
/// ┌──────────────────────────────────┐
/// │ Search: diab█          1 match   │
/// └──────────────────────────────────┘
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(MARGIN * 2 + 2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let edge = "─".repeat(inner);

    position_cursor(row, 1);
    pad(MARGIN);
    print!("{border}┌{edge}┐{}", Theme::reset());

    let mut count = match search.match_count {
        1 => "1 match ".to_string(),
        n => format!("{n} matches "),
    };
    if count.chars().count() > inner {
        count.clear();
    }
    let cursor = if search.is_typing { "█" } else { "" };
    let query_width = inner.saturating_sub(count.chars().count());
    let query = truncate_chars(&format!(" Search: {}{cursor}", search.query), query_width);
    let gap = query_width.saturating_sub(query.chars().count());

    position_cursor(row + 1, 1);
    pad(MARGIN);
    print!("{border}│{}{query}", Theme::fg(&theme.colors.text_normal));
    pad(gap);
    print!("{}{count}", Theme::fg(&theme.colors.text_dim));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    pad(MARGIN);
    print!("{border}└{edge}┘{}", Theme::reset());

    row + 3
}
