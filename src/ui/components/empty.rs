//! Placeholder drawn where catalog rows would go.

use crate::ui::helpers::{pad, position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Fills the `height` catalog rows starting at `row`: message first, then
/// the subtitle if there is room, then blanks.
pub fn render_empty_state(row: usize, height: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    for offset in 0..height {
        position_cursor(row + offset, 1);
        match offset {
            0 => {
                print!("{}", Theme::fg(&theme.colors.empty_state_fg));
                print_centered(&empty.message, cols);
            }
            1 => {
                print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
                print_centered(&empty.subtitle, cols);
            }
            _ => pad(cols),
        }
        print!("{}", Theme::reset());
    }
}
