//! Empty state component renderer.
//!
//! Shown in place of the table when no event matches the current filters.

use crate::ui::helpers::centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line empty state message, centered, with a blank line
/// above and below.
///
/// The message uses `empty_state_fg`; the subtitle is dimmed `text_dim`.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&centered(&empty.message, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&centered(&empty.subtitle, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    out.push('\n');
}
