//! Passage editor and submit button renderer.
//!
//! ```text
//! Passage                                               42/256
//! Pasien mengalami demam tinggi sejak kemarin dan
//! mengeluh nyeri kepala.█
//!
//! ✓ Input is valid and ready to simplify
//! [ Simplify ]
//! ```

use crate::app::state::EDITOR_TEXT_ROWS;
use crate::ui::helpers::{pad, position_cursor, truncate_chars, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EditorInfo, SubmitControl};
use crate::validation::Severity;

const PLACEHOLDER: &str = "Type a medical passage, or pick an example from the catalog";

/// Renders the editor block. Returns the next available row.
pub fn render_editor(row: usize, editor: &EditorInfo, submit: &SubmitControl, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_title(row, editor, theme, cols);
    current_row = render_text(current_row, editor, theme, cols);
    current_row = render_message(current_row, editor, theme, cols);
    render_button(current_row, submit, theme, cols)
}

fn render_title(row: usize, editor: &EditorInfo, theme: &Theme, cols: usize) -> usize {
    const TITLE: &str = "Passage";

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    if editor.is_focused {
        print!("{}", Theme::fg(&theme.colors.focus_border));
    } else {
        print!("{}", Theme::fg(&theme.colors.header_fg));
    }
    print!("{TITLE}");
    print!("{}", Theme::reset());

    let count_len = editor.char_count.chars().count();
    pad(cols.saturating_sub(TITLE.len() + count_len));
    if editor.over_limit {
        print!("{}", Theme::fg(&theme.colors.error_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", editor.char_count);
    print!("{}", Theme::reset());
    row + 1
}

/// Shows the tail of the wrapped text so the cursor end stays visible.
fn render_text(row: usize, editor: &EditorInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(1).max(1);
    let mut lines = wrap_text(&editor.text, width);

    if lines.is_empty() {
        position_cursor(row, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate_chars(PLACEHOLDER, cols));
        print!("{}", Theme::reset());
        for offset in 1..EDITOR_TEXT_ROWS {
            position_cursor(row + offset, 1);
            pad(cols);
        }
        return row + EDITOR_TEXT_ROWS;
    }

    let skip = lines.len().saturating_sub(EDITOR_TEXT_ROWS);
    lines.drain(..skip);
    let last = lines.len() - 1;

    for offset in 0..EDITOR_TEXT_ROWS {
        position_cursor(row + offset, 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        let line = lines.get(offset).map_or("", String::as_str);
        print!("{line}");
        let mut used = line.chars().count();
        if editor.is_focused && offset == last {
            print!("█");
            used += 1;
        }
        pad(cols.saturating_sub(used));
        print!("{}", Theme::reset());
    }
    row + EDITOR_TEXT_ROWS
}

fn render_message(row: usize, editor: &EditorInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (marker, color) = match editor.severity {
        _ if editor.is_validating => ("… ", &theme.colors.text_dim),
        Severity::Error => ("✗ ", &theme.colors.error_fg),
        Severity::Success => ("✓ ", &theme.colors.success_fg),
        Severity::None => ("", &theme.colors.text_dim),
    };

    let text = if editor.message.is_empty() {
        String::new()
    } else {
        truncate_chars(&format!("{marker}{}", editor.message), cols)
    };

    print!("{}", Theme::fg(color));
    if editor.is_validating {
        print!("{}", Theme::dim());
    }
    print!("{text}");
    pad(cols.saturating_sub(text.chars().count()));
    print!("{}", Theme::reset());
    row + 1
}

fn render_button(row: usize, submit: &SubmitControl, theme: &Theme, cols: usize) -> usize {
    let label = format!("[ {} ]", submit.label);

    position_cursor(row, 1);
    if submit.enabled {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.button_fg));
        print!("{}", Theme::bg(&theme.colors.button_bg));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{label}");
    print!("{}", Theme::reset());
    pad(cols.saturating_sub(label.chars().count()));
    row + 1
}
