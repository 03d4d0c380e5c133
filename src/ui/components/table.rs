//! Table component renderer.
//!
//! Renders one page of events as a table with ID, DATE, WHEN, TITLE, CITY,
//! VOL and MODE columns. Each row is followed by a dimmed line with the
//! organization and tags. Search matches in titles are highlighted.

use crate::ui::helpers::{self, pad, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const ID_WIDTH: usize = 4;
const DATE_WIDTH: usize = 11;
const WHEN_WIDTH: usize = 13;
const CITY_WIDTH: usize = 12;
const VOL_WIDTH: usize = 5;
const MODE_WIDTH: usize = 8;
const TITLE_GAP: usize = 2;

/// Width of every column except TITLE, gaps included.
pub const FIXED_COLUMNS_WIDTH: usize =
    ID_WIDTH + DATE_WIDTH + WHEN_WIDTH + TITLE_GAP + CITY_WIDTH + VOL_WIDTH + MODE_WIDTH;

/// Renders the bold column header line.
///
/// `title_width` is the width of the TITLE column, matching the rows below.
pub fn render_table_headers(out: &mut String, title_width: usize, theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&pad("ID", ID_WIDTH));
    out.push_str(&pad("DATE", DATE_WIDTH));
    out.push_str(&pad("WHEN", WHEN_WIDTH));
    out.push_str(&pad("TITLE", title_width + TITLE_GAP));
    out.push_str(&pad("CITY", CITY_WIDTH));
    out.push_str(&pad("VOL", VOL_WIDTH));
    out.push_str("MODE");
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Width of the TITLE column for `items`: the widest title, at least the
/// header's own width.
#[must_use]
pub fn title_column_width(items: &[DisplayItem]) -> usize {
    items
        .iter()
        .map(|item| width(&item.title))
        .max()
        .unwrap_or(0)
        .max(width("TITLE"))
}

/// Renders every item as a two-line table row.
pub fn render_table_rows(out: &mut String, items: &[DisplayItem], title_width: usize, theme: &Theme) {
    for item in items {
        render_table_row(out, item, title_width, theme);
    }
}

/// Renders one event.
///
/// # Layout
///
/// ```text
/// 3   2024-06-18 in 3d         Şehir İçi Gıda Paylaşım Ağı  İzmir       50   Yerinde
///     Paylaş İzmir · Gıda Kurtarma, Lojistik, Topluluk
/// ```
fn render_table_row(out: &mut String, item: &DisplayItem, title_width: usize, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&pad(&item.id.to_string(), ID_WIDTH));

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&pad(&item.date, DATE_WIDTH));
    out.push_str(&pad(&item.when, WHEN_WIDTH));

    out.push_str(&helpers::highlighted(&item.title, &item.highlight_ranges, theme));
    out.push_str(&helpers::padding(&item.title, title_width + TITLE_GAP));

    out.push_str(&pad(&item.location, CITY_WIDTH));
    out.push_str(&pad(&item.volunteers_needed.to_string(), VOL_WIDTH));
    out.push_str(&item.mode);
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&" ".repeat(ID_WIDTH));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&item.organization);
    out.push_str(" · ");
    out.push_str(&item.category);
    if !item.tags.is_empty() {
        out.push_str(" · ");
        out.push_str(&item.tags);
    }
    out.push_str(Theme::reset());
    out.push('\n');
}
