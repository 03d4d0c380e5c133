//! Footer component renderer.
//!
//! Renders the command hints, centered and dimmed.

use crate::infrastructure::text::truncate_chars;
use crate::ui::helpers::centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help line.
///
/// Hints wider than the terminal are truncated so the line never wraps.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let hints = truncate_chars(&footer.keybindings, cols);

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&centered(&hints, cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
