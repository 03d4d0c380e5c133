//! Header component renderer.
//!
//! Renders the title bar: the title on the left and the result count on the
//! right, bold, on the theme's optional header background.

use crate::ui::helpers::{padding, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar as one line.
///
/// # Layout
///
/// ```text
///  TITLE [padding] 12 results
/// ```
///
/// The count is dropped when the terminal is too narrow for both.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title = format!(" {}", header.title);
    let count = match header.result_count {
        1 => "1 result ".to_string(),
        n => format!("{n} results "),
    };

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&title);
    if width(&title) + width(&count) <= cols {
        out.push_str(&padding(&title, cols - width(&count)));
        out.push_str(&count);
    } else {
        out.push_str(&padding(&title, cols));
    }

    out.push_str(Theme::reset());
    out.push('\n');
}
