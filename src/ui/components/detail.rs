//! Event detail screen renderer.
//!
//! Renders the facts of one event as aligned label/value pairs, the wrapped
//! summary, then each non-empty section as a bulleted list.

use crate::ui::helpers::{pad, width, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const INDENT: &str = "  ";

pub fn render_detail(out: &mut String, detail: &DetailView, theme: &Theme, cols: usize) {
    let text_cols = cols.saturating_sub(INDENT.len() * 2).max(20);

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(INDENT);
    out.push_str(&detail.title);
    out.push_str(Theme::reset());
    out.push_str("\n\n");

    let label_width = detail
        .facts
        .iter()
        .map(|(label, _)| width(label))
        .max()
        .unwrap_or(0)
        + 2;
    for (label, value) in &detail.facts {
        out.push_str(INDENT);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&pad(label, label_width));
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(value);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    if !detail.summary.is_empty() {
        out.push('\n');
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        for line in wrap(&detail.summary, text_cols) {
            out.push_str(INDENT);
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(Theme::reset());
    }

    for section in &detail.sections {
        out.push('\n');
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.accent));
        out.push_str(INDENT);
        out.push_str(&section.heading);
        out.push_str(Theme::reset());
        out.push('\n');

        out.push_str(&Theme::fg(&theme.colors.text_normal));
        for entry in &section.lines {
            let mut lines = wrap(entry, text_cols.saturating_sub(2)).into_iter();
            if let Some(first) = lines.next() {
                out.push_str(INDENT);
                out.push_str("• ");
                out.push_str(&first);
                out.push('\n');
            }
            for rest in lines {
                out.push_str(INDENT);
                out.push_str("  ");
                out.push_str(&rest);
                out.push('\n');
            }
        }
        out.push_str(Theme::reset());
    }
}
