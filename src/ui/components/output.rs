//! Output panel and alert banner renderers.
//!
//! The output panel is the only place that knows how a term mapping is
//! presented: one `original → simplified` line per pair, in service order,
//! below the simplified text.

use crate::ui::helpers::{pad, position_cursor, truncate_chars, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{OutputPanel, WarningKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Title,
    Body,
    Term,
    Blocked,
    Failed,
}

/// Lays the panel out as styled lines wrapped to `width`.
fn panel_lines(panel: &OutputPanel, width: usize) -> Vec<(LineStyle, String)> {
    let mut lines = Vec::new();

    match panel {
        OutputPanel::Simplified { text, terms } => {
            lines.push((LineStyle::Title, "Simplified text".to_string()));
            lines.extend(wrap_text(text, width).into_iter().map(|l| (LineStyle::Body, l)));

            if !terms.is_empty() {
                lines.push((LineStyle::Body, String::new()));
                lines.push((LineStyle::Title, "Term explanations".to_string()));
                lines.extend(terms.iter().map(|pair| {
                    let line = format!("  {} → {}", pair.original, pair.simplified);
                    (LineStyle::Term, truncate_chars(&line, width))
                }));
            }
        }
        OutputPanel::Warning { kind, message } => {
            let style = match kind {
                WarningKind::Blocked => LineStyle::Blocked,
                WarningKind::Failed => LineStyle::Failed,
            };
            lines.push((style, format!("⚠ {}", kind.title())));
            lines.extend(wrap_text(message, width).into_iter().map(|l| (LineStyle::Body, l)));
        }
    }

    lines
}

/// Renders the output panel into `height` rows starting at `row`.
///
/// Lines that do not fit are dropped from the bottom. Unused rows are
/// blanked.
pub fn render_output(row: usize, height: usize, panel: Option<&OutputPanel>, theme: &Theme, cols: usize) {
    let lines = panel.map_or_else(Vec::new, |p| panel_lines(p, cols.max(1)));

    for offset in 0..height {
        position_cursor(row + offset, 1);
        let Some((style, text)) = lines.get(offset) else {
            pad(cols);
            continue;
        };

        match style {
            LineStyle::Title => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
            }
            LineStyle::Body => print!("{}", Theme::fg(&theme.colors.text_normal)),
            LineStyle::Term => print!("{}", Theme::fg(&theme.colors.success_fg)),
            LineStyle::Blocked => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.warning_fg));
            }
            LineStyle::Failed => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.error_fg));
            }
        }
        print!("{text}");
        pad(cols.saturating_sub(text.chars().count()));
        print!("{}", Theme::reset());
    }
}

/// Renders the alert banner line, or blanks it.
pub fn render_alert(row: usize, alert: Option<&str>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    let Some(alert) = alert else {
        pad(cols);
        return;
    };

    let text = truncate_chars(&format!("! {alert}"), cols);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.warning_fg));
    print!("{text}");
    pad(cols.saturating_sub(text.chars().count()));
    print!("{}", Theme::reset());
}
