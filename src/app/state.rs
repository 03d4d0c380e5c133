//! Discovery state and view model computation.
//!
//! This module defines [`DiscoveryState`], the single source of truth for the
//! browser: the catalog, the user's filters, the page position and the derived
//! result set. Every mutator recomputes the result set before it returns, so
//! readers never observe filters and results out of step.
//!
//! # State Components
//!
//! - **Catalog**: Every event of the session, in source order
//! - **Filters**: The current [`FilterState`]
//! - **Filtered**: Events matching the filters, sorted by the chosen strategy
//! - **Page**: Current page and page size over the filtered events
//! - **View Mode**: Result list or the detail screen of one event
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use eventscout::app::DiscoveryState;
//! use eventscout::discovery::DEFAULT_PAGE_SIZE;
//! use eventscout::domain::{Category, SystemClock};
//! use eventscout::storage::Catalog;
//! use eventscout::ui::Theme;
//!
//! let mut state = DiscoveryState::new(
//!     Catalog::default(),
//!     DEFAULT_PAGE_SIZE,
//!     Arc::new(SystemClock),
//!     Theme::default(),
//! );
//! state.toggle_category(Category::Environment);
//! assert_eq!(state.current_page(), 1);
//! assert_eq!(state.total_pages(), 1);
//! ```

use super::modes::ViewMode;
use crate::discovery::{self, PageState};
use crate::domain::{
    Category, Clock, Event, EventDetail, EventId, FilterChange, FilterState, SortOption,
};
use crate::infrastructure::text::truncate_chars;
use crate::storage::Catalog;
use crate::ui::components::FIXED_COLUMNS_WIDTH;
use crate::ui::helpers::search_highlight_ranges;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailSection, DetailView, DisplayItem, EmptyState, FilterChip, FooterInfo, HeaderInfo,
    PaginationInfo, UIViewModel,
};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Widest title shown in the result table before truncation.
const MAX_TITLE_WIDTH: usize = 40;

/// What the binder needs to render one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a> {
    pub filtered_count: usize,
    pub current_page_items: &'a [Event],
    pub current_page: usize,
    pub total_pages: usize,
}

/// Central browser state.
///
/// Mutated by the command handler. All mutators are synchronous and leave the
/// state consistent: the result set reflects the filters and the current page
/// lies within `1..=total_pages`.
#[derive(Debug)]
pub struct DiscoveryState {
    catalog: Catalog,
    filters: FilterState,
    page: PageState,
    filtered: Vec<Event>,
    clock: Arc<dyn Clock>,

    /// Screen currently shown.
    pub view_mode: ViewMode,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl DiscoveryState {
    /// Creates a state showing page 1 of the unfiltered catalog.
    #[must_use]
    pub fn new(catalog: Catalog, page_size: NonZeroUsize, clock: Arc<dyn Clock>, theme: Theme) -> Self {
        let mut state = Self {
            catalog,
            filters: FilterState::default(),
            page: PageState::new(page_size),
            filtered: Vec::new(),
            clock,
            view_mode: ViewMode::List,
            theme,
        };
        state.recompute();
        state
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Swaps in a freshly loaded catalog, keeping filters and page where valid.
    ///
    /// A detail screen whose event disappeared falls back to the list.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        if let ViewMode::Detail(id) = self.view_mode {
            if self.catalog.get(id).is_none() {
                self.view_mode = ViewMode::List;
            }
        }
        self.recompute();
        self.page.clamp(self.filtered.len());
    }

    /// Applies a keyed filter change and returns to page 1.
    pub fn set_filter(&mut self, change: FilterChange) {
        self.filters.apply(change);
        self.filters_changed();
    }

    /// Adds or removes a category chip and returns to page 1.
    pub fn toggle_category(&mut self, category: Category) {
        self.filters.toggle_category(category);
        self.filters_changed();
    }

    /// Adds or removes a tag chip and returns to page 1.
    pub fn toggle_tag(&mut self, tag: &str) {
        self.filters.toggle_tag(tag);
        self.filters_changed();
    }

    /// Restores default filters and returns to page 1.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.page.reset();
        self.recompute();
    }

    fn recompute(&mut self) {
        let now = self.clock.now();
        self.filtered = discovery::filter_and_sort(self.catalog.events(), &self.filters, now);
    }

    /// Moves to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        self.page.go_to(page, self.filtered.len());
    }

    pub fn prev_page(&mut self) {
        self.page.prev();
    }

    pub fn next_page(&mut self) {
        self.page.next(self.filtered.len());
    }

    /// Number of events matching the filters, across all pages.
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.page.current_page()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        discovery::total_pages(self.filtered.len(), self.page.page_size())
    }

    #[must_use]
    pub fn current_page_items(&self) -> &[Event] {
        self.page.slice(&self.filtered)
    }

    /// Snapshot of everything the binder consumes.
    #[must_use]
    pub fn view(&self) -> PageView<'_> {
        PageView {
            filtered_count: self.filtered_count(),
            current_page_items: self.current_page_items(),
            current_page: self.current_page(),
            total_pages: self.total_pages(),
        }
    }

    /// Switches to the detail screen of `id`. Returns `false` if the catalog
    /// has no such event.
    pub fn open_detail(&mut self, id: EventId) -> bool {
        if self.catalog.get(id).is_none() {
            return false;
        }
        self.view_mode = ViewMode::Detail(id);
        true
    }

    pub fn close_detail(&mut self) {
        self.view_mode = ViewMode::List;
    }

    /// Computes a renderable view model for a terminal `cols` wide.
    ///
    /// # Parameters
    ///
    /// * `cols` - Terminal width in character cells
    /// * `notification` - Message currently held by the notifier, if any
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize, notification: Option<&str>) -> UIViewModel {
        let _span = tracing::debug_span!(
            "compute_viewmodel",
            view_mode = ?self.view_mode,
            filtered_count = self.filtered.len()
        )
        .entered();

        let header = HeaderInfo {
            title: "Volunteer events".to_string(),
            result_count: self.filtered.len(),
        };
        let notification = notification.map(ToString::to_string);

        if let ViewMode::Detail(id) = self.view_mode {
            if let Some(event) = self.catalog.get(id) {
                return UIViewModel {
                    header,
                    chips: vec![],
                    display_items: vec![],
                    empty_state: None,
                    detail: Some(self.compute_detail(event, self.catalog.detail(id))),
                    pagination: None,
                    notification,
                    footer: FooterInfo {
                        keybindings: "back: results  help: commands  quit: exit".to_string(),
                    },
                };
            }
        }

        let title_width = cols.saturating_sub(FIXED_COLUMNS_WIDTH).clamp(12, MAX_TITLE_WIDTH);
        let display_items: Vec<DisplayItem> = self
            .current_page_items()
            .iter()
            .map(|event| self.compute_display_item(event, title_width))
            .collect();

        let empty_state = self.filtered.is_empty().then(|| EmptyState {
            message: "No events match these filters.".to_string(),
            subtitle: "Try widening them, or type `reset` to clear every filter.".to_string(),
        });

        UIViewModel {
            header,
            chips: self.compute_chips(),
            display_items,
            empty_state,
            detail: None,
            pagination: Some(PaginationInfo {
                current_page: self.current_page(),
                total_pages: self.total_pages(),
            }),
            notification,
            footer: FooterInfo {
                keybindings: "next/prev/page N  show ID  search TEXT  category NAME  reset  help  quit"
                    .to_string(),
            },
        }
    }

    fn compute_display_item(&self, event: &Event, title_width: usize) -> DisplayItem {
        let title = truncate_chars(&event.title, title_width);
        let highlight_ranges = search_highlight_ranges(&title, &self.filters.search);

        DisplayItem {
            id: event.id,
            title,
            date: event.occurs_at.format("%Y-%m-%d").to_string(),
            when: event.relative_label(self.clock.now()),
            location: event.location.clone(),
            organization: event.organization.clone(),
            category: event.category.label().to_string(),
            mode: event.mode.label().to_string(),
            volunteers_needed: event.volunteers_needed,
            tags: event.tags.join(", "),
            highlight_ranges,
        }
    }

    /// One chip per active criterion, in the order the filter panel lists them.
    fn compute_chips(&self) -> Vec<FilterChip> {
        let filters = &self.filters;
        let mut chips = Vec::new();
        let mut push = |label: String, remove_command: String| {
            chips.push(FilterChip {
                label,
                remove_command,
            });
        };

        let search = filters.search.trim();
        if !search.is_empty() {
            push(format!("Search: \"{search}\""), "search".to_string());
        }
        if let Some(location) = &filters.location {
            push(location.clone(), "location all".to_string());
        }
        if let Some(organization) = &filters.organization {
            push(organization.clone(), "org all".to_string());
        }
        if let Some(days) = filters.date_range.days() {
            push(format!("Next {days} days"), "date any".to_string());
        }
        if let Some(mode) = filters.mode {
            push(format!("Mode: {mode}"), "mode all".to_string());
        }
        if filters.min_volunteers > 0 {
            push(format!("+{} volunteers", filters.min_volunteers), "min 0".to_string());
        }
        for category in &filters.categories {
            push(category.label().to_string(), format!("category {category}"));
        }
        for tag in &filters.tags {
            push(format!("Tag: {tag}"), format!("tag {tag}"));
        }
        if filters.sort_by != SortOption::default() {
            push(format!("Sort: {}", filters.sort_by), "sort date".to_string());
        }

        chips
    }

    fn compute_detail(&self, event: &Event, detail: Option<&EventDetail>) -> DetailView {
        let mut facts = vec![
            (
                "Date".to_string(),
                format!(
                    "{} ({})",
                    event.occurs_at.format("%Y-%m-%d"),
                    event.relative_label(self.clock.now())
                ),
            ),
            ("Location".to_string(), event.location.clone()),
            ("Organizer".to_string(), event.organization.clone()),
            ("Category".to_string(), event.category.label().to_string()),
            ("Mode".to_string(), event.mode.label().to_string()),
            ("Volunteers".to_string(), event.volunteers_needed.to_string()),
        ];
        if !event.tags.is_empty() {
            facts.push(("Tags".to_string(), event.tags.join(", ")));
        }

        let Some(detail) = detail else {
            return DetailView {
                title: event.title.clone(),
                facts,
                summary: event.description.clone(),
                sections: vec![],
            };
        };

        if !detail.location_details.is_empty() {
            facts.push(("Venue".to_string(), detail.location_details.clone()));
        }
        if let Some(end) = detail.application_end {
            facts.push(("Apply by".to_string(), end.format("%Y-%m-%d").to_string()));
        }
        if let Some(contact) = &detail.contact {
            facts.push((
                "Contact".to_string(),
                format!("{} <{}> {}", contact.name, contact.email, contact.phone),
            ));
        }
        if let Some(map_url) = &detail.map_url {
            facts.push(("Map".to_string(), map_url.clone()));
        }

        let schedule = detail
            .schedule
            .iter()
            .map(|item| format!("{:<7} {}", item.time, item.activity))
            .collect();

        let sections = [
            ("Objectives", detail.objectives.clone()),
            ("Schedule", schedule),
            ("Requirements", detail.requirements.clone()),
            ("Benefits", detail.benefits.clone()),
        ]
        .into_iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(heading, lines)| DetailSection {
            heading: heading.to_string(),
            lines,
        })
        .collect();

        let summary = if detail.summary.is_empty() {
            event.description.clone()
        } else {
            detail.summary.clone()
        };

        DetailView {
            title: event.title.clone(),
            facts,
            summary,
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateRange, EventMode, FixedClock};
    use crate::storage::EventRecord;
    use chrono::{TimeZone, Utc};

    fn state_with(count: usize) -> DiscoveryState {
        let records = (1..=count)
            .map(|i| {
                let mut record = EventRecord::new(
                    format!("Etkinlik {i}"),
                    format!("2025-01-{i:02}"),
                    "Ankara",
                    Category::Education,
                    "FutureLab",
                    u32::try_from(i).unwrap() * 10,
                    EventMode::Online,
                );
                record.tags = vec!["STEM".to_string()];
                record
            })
            .collect();
        let catalog = Catalog::from_records(records).unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 12, 20, 0, 0, 0).unwrap());
        DiscoveryState::new(
            catalog,
            NonZeroUsize::new(4).unwrap(),
            Arc::new(clock),
            Theme::default(),
        )
    }

    #[test]
    fn starts_on_first_page_of_everything() {
        let state = state_with(10);
        let view = state.view();
        assert_eq!(view.filtered_count, 10);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.current_page_items.len(), 4);
    }

    #[test]
    fn every_mutator_returns_to_page_one() {
        let mut state = state_with(10);

        state.go_to_page(3);
        state.set_filter(FilterChange::MinVolunteers(0));
        assert_eq!(state.current_page(), 1);

        state.go_to_page(3);
        state.toggle_category(Category::Education);
        assert_eq!(state.current_page(), 1);

        state.go_to_page(3);
        state.toggle_tag("STEM");
        assert_eq!(state.current_page(), 1);

        state.go_to_page(3);
        state.reset_filters();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut state = state_with(10);
        state.prev_page();
        assert_eq!(state.current_page(), 1);

        state.go_to_page(99);
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.current_page_items().len(), 2);

        state.next_page();
        assert_eq!(state.current_page(), 3);

        state.go_to_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn filters_shrink_the_result_set() {
        let mut state = state_with(10);
        state.set_filter(FilterChange::MinVolunteers(75));
        assert_eq!(state.filtered_count(), 3);
        assert_eq!(state.total_pages(), 1);

        state.set_filter(FilterChange::DateRange(DateRange::Week));
        assert_eq!(state.filtered_count(), 0);
        let vm = state.compute_viewmodel(100, None);
        assert!(vm.empty_state.is_some());
        assert_eq!(vm.pagination, Some(PaginationInfo { current_page: 1, total_pages: 1 }));
    }

    #[test]
    fn chips_follow_active_filters() {
        let mut state = state_with(3);
        assert!(state.compute_viewmodel(100, None).chips.is_empty());

        state.set_filter(FilterChange::Search("etkin".to_string()));
        state.toggle_tag("STEM");
        state.set_filter(FilterChange::SortBy(SortOption::Volunteers));

        let chips: Vec<String> = state
            .compute_viewmodel(100, None)
            .chips
            .into_iter()
            .map(|chip| chip.remove_command)
            .collect();
        assert_eq!(chips, vec!["search", "tag STEM", "sort date"]);
    }

    #[test]
    fn search_text_is_highlighted_in_titles() {
        let mut state = state_with(1);
        state.set_filter(FilterChange::Search("ETKIN".to_string()));
        let vm = state.compute_viewmodel(100, Some("hello"));

        assert_eq!(vm.display_items[0].highlight_ranges, vec![(0, 5)]);
        assert_eq!(vm.notification.as_deref(), Some("hello"));
    }

    #[test]
    fn detail_view_falls_back_to_description() {
        let mut state = state_with(2);
        assert!(!state.open_detail(EventId(42)));
        assert!(state.open_detail(EventId(2)));

        let vm = state.compute_viewmodel(100, None);
        let detail = vm.detail.unwrap();
        assert_eq!(detail.title, "Etkinlik 2");
        assert!(detail.sections.is_empty());
        assert!(vm.pagination.is_none());

        state.close_detail();
        assert!(state.compute_viewmodel(100, None).detail.is_none());
    }

    #[test]
    fn replacing_catalog_keeps_filters_and_clamps_page() {
        let mut state = state_with(10);
        state.go_to_page(3);
        state.open_detail(EventId(9));

        let smaller = Catalog::from_records(vec![EventRecord::new(
            "Tek",
            "2025-01-01",
            "Ankara",
            Category::Education,
            "FutureLab",
            5,
            EventMode::Online,
        )])
        .unwrap();
        state.replace_catalog(smaller);

        assert_eq!(state.view_mode, ViewMode::List);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.filtered_count(), 1);
    }
}
