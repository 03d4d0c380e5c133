//! Notification line renderer.

use crate::infrastructure::text::truncate_chars;
use crate::ui::theme::Theme;

/// Renders the transient message on its own bold line.
pub fn render_notification(out: &mut String, message: &str, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.notification_fg));
    out.push(' ');
    out.push_str(&truncate_chars(message, cols.saturating_sub(1)));
    out.push_str(Theme::reset());
    out.push('\n');
}
