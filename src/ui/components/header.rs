//! Title bar.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the bold, centered title. Returns the next available row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let colors = &theme.colors;

    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&colors.header_fg));
    if let Some(bg) = colors.header_bg.as_deref() {
        print!("{}", Theme::bg(bg));
    }
    print_centered(&header.title, cols);
    print!("{}", Theme::reset());

    row + 1
}
