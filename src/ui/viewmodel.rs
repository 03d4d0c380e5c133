//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from
//! [`DiscoveryState`](crate::app::DiscoveryState). View models contain no
//! business logic, only display-ready data: formatted dates, chip labels,
//! pre-computed search highlight ranges and the pagination numbers.
//!
//! # Example
//!
//! ```rust
//! use eventscout::ui::viewmodel::{FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: "Volunteer events".to_string(), result_count: 0 },
//!     chips: vec![],
//!     display_items: vec![],
//!     empty_state: None,
//!     detail: None,
//!     pagination: None,
//!     notification: None,
//!     footer: FooterInfo { keybindings: "help: commands".to_string() },
//! };
//! assert!(vm.display_items.is_empty());
//! ```

use crate::domain::EventId;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title and result count.
    pub header: HeaderInfo,

    /// One chip per active filter criterion, in display order.
    pub chips: Vec<FilterChip>,

    /// Rows of the current page. Empty on the detail screen.
    pub display_items: Vec<DisplayItem>,

    /// Shown instead of rows when no event matches.
    pub empty_state: Option<EmptyState>,

    /// Detail screen content; when set, the list is not rendered.
    pub detail: Option<DetailView>,

    /// Page position; absent on the detail screen.
    pub pagination: Option<PaginationInfo>,

    /// Transient message from the notifier.
    pub notification: Option<String>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Number of events matching the current filters (all pages).
    pub result_count: usize,
}

/// An active filter, rendered as a removable chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    /// Command that removes this criterion.
    pub remove_command: String,
}

/// Display information for one event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: EventId,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Relative time, e.g. `in 3d`.
    pub when: String,
    pub location: String,
    pub organization: String,
    pub category: String,
    pub mode: String,
    pub volunteers_needed: u32,
    pub tags: String,

    /// Character ranges of `title` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Current page out of total pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
}

impl PaginationInfo {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Content of the event detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    /// Short facts (date, place, organizer, ...) as label/value pairs.
    pub facts: Vec<(String, String)>,
    pub summary: String,
    pub sections: Vec<DetailSection>,
}

/// A titled list on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub heading: String,
    pub lines: Vec<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current screen.
    pub keybindings: String,
}
