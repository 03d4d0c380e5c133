//! Pagination bar renderer.

use crate::ui::helpers::centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `‹ prev   Page 2 / 3   next ›`, centered.
///
/// The `prev` and `next` hints are dimmed away at the first and last page.
pub fn render_pagination(out: &mut String, page: &PaginationInfo, theme: &Theme, cols: usize) {
    let prev = if page.has_prev() { "‹ prev" } else { "      " };
    let next = if page.has_next() { "next ›" } else { "      " };
    let line = format!("{prev}   Page {} / {}   {next}", page.current_page, page.total_pages);

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&centered(&line, cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
