//! The event discovery pipeline.
//!
//! Turns the full catalog and the current filters into an ordered result set
//! that the paginator slices into pages:
//!
//! ```text
//! Catalog → predicate::matches → sort::compare (stable) → paginate → view
//! ```
//!
//! Every stage is pure and total. Nothing here suspends, allocates shared
//! state, or fails.
//!
//! # Modules
//!
//! - [`predicate`]: Inclusion test for one event under the current filters
//! - [`sort`]: Ordering strategies
//! - [`paginate`]: Page slicing and page-state bookkeeping

pub mod paginate;
pub mod predicate;
pub mod sort;

pub use paginate::{paginate, total_pages, PageState, DEFAULT_PAGE_SIZE};
pub use predicate::{is_within_range, matches, matches_search};
pub use sort::{compare, sort_events};

use crate::domain::{Event, FilterState};
use chrono::{DateTime, Utc};

/// Filters `catalog` by `filters` and orders the survivors by `filters.sort_by`.
#[must_use]
pub fn filter_and_sort(catalog: &[Event], filters: &FilterState, now: DateTime<Utc>) -> Vec<Event> {
    let _span = tracing::debug_span!(
        "filter_and_sort",
        catalog_size = catalog.len(),
        sort_by = %filters.sort_by
    )
    .entered();

    let mut filtered: Vec<Event> = catalog
        .iter()
        .filter(|event| matches(event, filters, now))
        .cloned()
        .collect();
    sort_events(&mut filtered, filters.sort_by);

    tracing::debug!(filtered_count = filtered.len(), "discovery pipeline applied");
    filtered
}
