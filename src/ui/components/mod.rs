//! Composable UI component renderers.
//!
//! Each component appends one part of the screen to an output buffer.
//!
//! # Components
//!
//! - [`header`]: Title bar with the result count
//! - [`chips`]: Active filters with their removal commands
//! - [`table`]: One page of events (ID, DATE, WHEN, TITLE, CITY, VOL, MODE)
//! - [`empty`]: Empty state message when nothing matches
//! - [`pagination`]: Page position with prev/next hints
//! - [`detail`]: Detail screen of a single event
//! - [`notification`]: Transient message line
//! - [`footer`]: Command hints
//!
//! # Layout Modes
//!
//! - [`render_list_screen`]: Header + Chips + Table (or Empty) + Pagination + Footer
//! - [`render_detail_screen`]: Header + Detail + Footer

mod chips;
mod detail;
mod empty;
mod footer;
mod header;
mod notification;
mod pagination;
mod table;

pub use table::FIXED_COLUMNS_WIDTH;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, UIViewModel};

use chips::render_chips;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use notification::render_notification;
use pagination::render_pagination;
use table::{render_table_headers, render_table_rows, title_column_width};

/// Appends a horizontal separator line.
fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Renders the result list layout.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Chips]            only with active filters
/// [Table Headers]
/// [Table Rows]       or [Empty State]
/// [Border]
/// [Pagination]
/// [Notification]     only while a message is shown
/// [Footer]
/// ```
pub fn render_list_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    render_border(out, &theme.colors.border, cols);
    render_chips(out, &vm.chips, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        let title_width = title_column_width(&vm.display_items);
        render_table_headers(out, title_width, theme);
        render_table_rows(out, &vm.display_items, title_width, theme);
    }

    render_border(out, &theme.colors.border, cols);
    if let Some(page) = &vm.pagination {
        render_pagination(out, page, theme, cols);
    }
    render_tail(out, vm, theme, cols);
}

/// Renders the detail screen layout.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Title, Facts, Summary, Sections]
/// [Border]
/// [Notification]     only while a message is shown
/// [Footer]
/// ```
pub fn render_detail_screen(
    out: &mut String,
    vm: &UIViewModel,
    detail: &DetailView,
    theme: &Theme,
    cols: usize,
) {
    render_header(out, &vm.header, theme, cols);
    render_border(out, &theme.colors.border, cols);
    render_detail(out, detail, theme, cols);
    render_border(out, &theme.colors.border, cols);
    render_tail(out, vm, theme, cols);
}

fn render_tail(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    if let Some(message) = &vm.notification {
        render_notification(out, message, theme, cols);
    }
    render_footer(out, &vm.footer, theme, cols);
}
