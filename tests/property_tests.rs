//! Property-based tests for the discovery pipeline
//!
//! These tests check the filter and pagination invariants over generated
//! events and filter states rather than hand-picked fixtures.

use chrono::{DateTime, Duration, TimeZone, Utc};
use eventscout::discovery::{matches, paginate, total_pages};
use eventscout::domain::{
    Category, DateRange, Event, EventId, EventMode, FilterChange, FilterState, FixedClock, SortOption,
};
use eventscout::storage::{Catalog, EventRecord};
use eventscout::{DiscoveryState, Theme};
use proptest::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Arc;

const TAGS: [&str; 6] = ["STEM", "Gençlik", "Mentorluk", "Sahil", "Kamp", "Aile Dostu"];
const CITIES: [&str; 4] = ["İstanbul", "Ankara", "İzmir", "Online"];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
}

pub mod generators {
    use super::*;
    use proptest::collection::vec;
    use proptest::sample::{select, subsequence};

    pub fn category() -> impl Strategy<Value = Category> {
        select(Category::ALL.to_vec())
    }

    pub fn mode() -> impl Strategy<Value = EventMode> {
        select(EventMode::ALL.to_vec())
    }

    pub fn tags() -> impl Strategy<Value = Vec<String>> {
        subsequence(TAGS.to_vec(), 0..=TAGS.len())
            .prop_map(|tags| tags.into_iter().map(ToString::to_string).collect())
    }

    /// Events dated up to 60 days either side of [`now`].
    pub fn event() -> impl Strategy<Value = Event> {
        (
            1u64..10_000,
            "[A-Za-zçğıöşüÇĞİÖŞÜ ]{1,24}",
            -60i64..60,
            select(CITIES.to_vec()),
            category(),
            tags(),
            0u32..200,
            mode(),
        )
            .prop_map(|(id, title, offset, city, category, tags, volunteers, mode)| Event {
                id: EventId(id),
                title,
                occurs_at: now() + Duration::days(offset),
                location: city.to_string(),
                category,
                image: None,
                organization: "Gönüllüler Ağı".to_string(),
                description: String::new(),
                tags,
                volunteers_needed: volunteers,
                mode,
            })
    }

    pub fn filter_change() -> impl Strategy<Value = FilterChange> {
        prop_oneof![
            "[a-z]{0,6}".prop_map(FilterChange::Search),
            proptest::option::of(select(CITIES.to_vec()).prop_map(String::from)).prop_map(FilterChange::Location),
            vec(category(), 0..3).prop_map(FilterChange::Categories),
            tags().prop_map(FilterChange::Tags),
            select(vec![DateRange::Any, DateRange::Week, DateRange::Month, DateRange::Quarter])
                .prop_map(FilterChange::DateRange),
            (0u32..150).prop_map(FilterChange::MinVolunteers),
            proptest::option::of(mode()).prop_map(FilterChange::Mode),
            select(vec![SortOption::Date, SortOption::Volunteers, SortOption::Recent]).prop_map(FilterChange::SortBy),
        ]
    }

    /// A catalog of `1..=len` events dated in the future.
    pub fn catalog(len: usize) -> impl Strategy<Value = Vec<EventRecord>> {
        vec((category(), tags(), 0u32..200, 1i64..120), 1..=len).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (category, tags, volunteers, offset))| {
                    let date = (now() + Duration::days(offset)).format("%Y-%m-%d").to_string();
                    let mut record = EventRecord::new(
                        format!("Etkinlik {i}"),
                        date,
                        "Ankara",
                        category,
                        "Gönüllüler Ağı",
                        volunteers,
                        EventMode::OnSite,
                    );
                    record.tags = tags;
                    record
                })
                .collect()
        })
    }
}

fn state_for(records: Vec<EventRecord>, page_size: usize) -> DiscoveryState {
    DiscoveryState::new(
        Catalog::from_records(records).unwrap(),
        NonZeroUsize::new(page_size).unwrap(),
        Arc::new(FixedClock(now())),
        Theme::plain(),
    )
}

proptest! {
    #[test]
    fn default_filters_match_every_event(event in generators::event()) {
        prop_assert!(matches(&event, &FilterState::default(), now()));
    }

    #[test]
    fn empty_category_set_never_excludes(event in generators::event(), search in "[a-z]{0,3}", min in 0u32..100) {
        let with_categories = FilterState {
            search: search.clone(),
            min_volunteers: min,
            categories: vec![event.category],
            ..FilterState::default()
        };
        let without_categories = FilterState {
            categories: Vec::new(),
            ..with_categories.clone()
        };

        prop_assert_eq!(
            matches(&event, &without_categories, now()),
            matches(&event, &with_categories, now())
        );
    }

    #[test]
    fn tag_filter_requires_a_superset(event in generators::event(), wanted in generators::tags()) {
        prop_assume!(!wanted.is_empty());
        let filters = FilterState {
            tags: wanted.clone(),
            ..FilterState::default()
        };

        let superset = wanted.iter().all(|tag| event.tags.contains(tag));
        prop_assert_eq!(matches(&event, &filters, now()), superset);
    }

    #[test]
    fn reset_is_idempotent(records in generators::catalog(12), changes in proptest::collection::vec(generators::filter_change(), 0..6)) {
        let mut state = state_for(records, 4);
        for change in changes {
            state.set_filter(change);
        }

        state.reset_filters();
        let once = (state.filters().clone(), state.current_page(), state.filtered_count());
        state.reset_filters();
        let twice = (state.filters().clone(), state.current_page(), state.filtered_count());

        prop_assert_eq!(once, twice);
        prop_assert_eq!(state.filters(), &FilterState::default());
    }

    #[test]
    fn mutators_return_to_the_first_page(
        records in generators::catalog(20),
        change in generators::filter_change(),
        category in generators::category(),
        page in 1usize..6,
    ) {
        let mut state = state_for(records, 2);

        state.go_to_page(page);
        state.set_filter(change);
        prop_assert_eq!(state.current_page(), 1);

        state.go_to_page(page);
        state.toggle_category(category);
        prop_assert_eq!(state.current_page(), 1);

        state.go_to_page(page);
        state.toggle_tag("STEM");
        prop_assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn pages_partition_the_result_set(len in 0usize..40, size in 1usize..8) {
        let items: Vec<usize> = (0..len).collect();
        let page_size = NonZeroUsize::new(size).unwrap();
        let pages = total_pages(len, page_size);

        let rejoined: Vec<usize> = (1..=pages)
            .flat_map(|page| paginate(&items, page_size, page).iter().copied())
            .collect();

        prop_assert_eq!(rejoined, items);
        prop_assert!(paginate(&(0..len).collect::<Vec<_>>(), page_size, pages + 1).is_empty());
    }
}
