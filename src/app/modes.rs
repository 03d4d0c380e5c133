//! Screen selection for the terminal browser.
//!
//! The browser shows either the paginated result list or the detail screen of
//! one event. Filter and page state survive a visit to the detail screen, so
//! `back` returns to the same page of the same results.

use crate::domain::EventId;

/// Which screen the binder renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Current page of filtered results.
    #[default]
    List,

    /// Detail screen of a single event.
    Detail(EventId),
}
