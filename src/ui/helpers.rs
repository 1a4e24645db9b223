//! Shared rendering utilities.
//!
//! Cursor positioning, search match highlighting, and character-safe
//! truncation and word wrapping. All widths and ranges are in characters, not
//! bytes.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. When
/// `is_selected` is `true` the text is printed plain so the selection colors
/// stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Truncates `text` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }

    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split. Whitespace runs collapse to single
/// spaces. Returns no lines for blank text.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        while chars.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }

        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(chars);
        line_len += word_len;
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Prints `count` spaces.
pub fn pad(count: usize) {
    print!("{}", " ".repeat(count));
}

/// Prints `text` centered in a `cols`-wide line, truncated to fit.
///
/// Styling is left to the caller.
pub fn print_centered(text: &str, cols: usize) {
    let (left, text, right) = centered(text, cols);
    pad(left);
    print!("{text}");
    pad(right);
}

/// Left padding, fitted text and right padding for a centered line.
fn centered(text: &str, cols: usize) -> (usize, String, usize) {
    let text = truncate_chars(text, cols);
    let len = text.chars().count();
    let left = cols.saturating_sub(len) / 2;
    (left, text, cols.saturating_sub(left + len))
}
