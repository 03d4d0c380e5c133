//! Inclusion test for a single event under the current filters.
//!
//! Every criterion must hold (logical AND across criteria). Within the
//! category set an event needs to match only one entry; within the tag set it
//! must carry every entry.

use crate::domain::{DateRange, Event, FilterState};
use chrono::{DateTime, Duration, Utc};

/// Returns `true` if `event` satisfies every criterion in `filters`.
///
/// `now` anchors the date-range windows. The function is pure.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use eventscout::discovery::matches;
/// use eventscout::domain::{Category, Event, EventId, EventMode, FilterState};
///
/// let event = Event {
///     id: EventId(2),
///     title: "Gençler İçin Kodlama Mentörlüğü".to_string(),
///     occurs_at: Utc.with_ymd_and_hms(2024, 7, 5, 0, 0, 0).unwrap(),
///     location: "Ankara".to_string(),
///     category: Category::Education,
///     image: None,
///     organization: "FutureLab".to_string(),
///     description: "Web geliştirme mentörlüğü".to_string(),
///     tags: vec!["STEM".to_string(), "Gençlik".to_string(), "Mentorluk".to_string()],
///     volunteers_needed: 25,
///     mode: EventMode::Hybrid,
/// };
///
/// let mut filters = FilterState::default();
/// assert!(matches(&event, &filters, Utc::now()));
///
/// filters.tags = vec!["Gençlik".to_string(), "Mentorluk".to_string()];
/// assert!(matches(&event, &filters, Utc::now()));
/// ```
#[must_use]
pub fn matches(event: &Event, filters: &FilterState, now: DateTime<Utc>) -> bool {
    matches_search(event, &filters.search)
        && filters
            .location
            .as_ref()
            .map_or(true, |location| event.location == *location)
        && filters
            .organization
            .as_ref()
            .map_or(true, |organization| event.organization == *organization)
        && (filters.categories.is_empty() || filters.categories.contains(&event.category))
        && filters.tags.iter().all(|tag| event.has_tag(tag))
        && is_within_range(event.occurs_at, filters.date_range, now)
        && event.volunteers_needed >= filters.min_volunteers
        && filters.mode.map_or(true, |mode| event.mode == mode)
}

/// Case-insensitive substring search over title, organization, description
/// and tags joined with spaces. A blank query matches everything.
#[must_use]
pub fn matches_search(event: &Event, search: &str) -> bool {
    let needle = search.trim();
    if needle.is_empty() {
        return true;
    }

    let mut haystack = String::with_capacity(
        event.title.len() + event.organization.len() + event.description.len() + 32,
    );
    haystack.push_str(&event.title);
    haystack.push(' ');
    haystack.push_str(&event.organization);
    haystack.push(' ');
    haystack.push_str(&event.description);
    for tag in &event.tags {
        haystack.push(' ');
        haystack.push_str(tag);
    }

    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Tests `occurs_at` against a forward-looking window starting at `now`.
///
/// Past events never fall inside a bounded window; only [`DateRange::Any`]
/// accepts them.
#[must_use]
pub fn is_within_range(occurs_at: DateTime<Utc>, range: DateRange, now: DateTime<Utc>) -> bool {
    let Some(days) = range.days() else {
        return true;
    };
    occurs_at >= now && occurs_at - now <= Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, EventId, EventMode};
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn shore_cleanup() -> Event {
        Event {
            id: EventId(1),
            title: "Boğaz Çevresi Kıyı Temizliği".to_string(),
            occurs_at: Utc.with_ymd_and_hms(2024, 6, 22, 0, 0, 0).unwrap(),
            location: "İstanbul".to_string(),
            category: Category::Environment,
            image: None,
            organization: "Mavi Dünya Derneği".to_string(),
            description: "Kıyı şeridinde detaylı temizlik ve atık ayrıştırma.".to_string(),
            tags: vec![
                "Plastik Aksiyonu".to_string(),
                "Aile Dostu".to_string(),
                "Sahil".to_string(),
            ],
            volunteers_needed: 80,
            mode: EventMode::OnSite,
        }
    }

    #[test]
    fn default_filters_match() {
        assert!(matches(&shore_cleanup(), &FilterState::default(), now()));
    }

    #[rstest]
    #[case("temizliği", true)]
    #[case("MAVI DÜNYA", true)]
    #[case("sahil", true)]
    #[case("  atık  ", true)]
    #[case("   ", true)]
    #[case("ağaçlandırma", false)]
    fn search_is_case_insensitive_across_fields(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(matches_search(&shore_cleanup(), query), expected);
    }

    #[test]
    fn search_spans_joined_tags() {
        assert!(matches_search(&shore_cleanup(), "aile dostu sahil"));
    }

    #[test]
    fn location_and_organization_are_exact() {
        let event = shore_cleanup();
        let mut filters = FilterState {
            location: Some("istanbul".to_string()),
            ..FilterState::default()
        };
        assert!(!matches(&event, &filters, now()));

        filters.location = Some("İstanbul".to_string());
        assert!(matches(&event, &filters, now()));

        filters.organization = Some("Mavi Dünya".to_string());
        assert!(!matches(&event, &filters, now()));
    }

    #[test]
    fn categories_are_or_within_the_set() {
        let filters = FilterState {
            categories: vec![Category::Health, Category::Environment],
            ..FilterState::default()
        };
        assert!(matches(&shore_cleanup(), &filters, now()));

        let filters = FilterState {
            categories: vec![Category::Health],
            ..FilterState::default()
        };
        assert!(!matches(&shore_cleanup(), &filters, now()));
    }

    #[test]
    fn tags_require_every_selected_tag() {
        let mut filters = FilterState {
            tags: vec!["Sahil".to_string(), "Aile Dostu".to_string()],
            ..FilterState::default()
        };
        assert!(matches(&shore_cleanup(), &filters, now()));

        filters.tags.push("Outdoor".to_string());
        assert!(!matches(&shore_cleanup(), &filters, now()));
    }

    #[rstest]
    #[case(DateRange::Any, 400, true)]
    #[case(DateRange::Any, -30, true)]
    #[case(DateRange::Week, 0, true)]
    #[case(DateRange::Week, 7, true)]
    #[case(DateRange::Week, 8, false)]
    #[case(DateRange::Week, -1, false)]
    #[case(DateRange::Month, 30, true)]
    #[case(DateRange::Month, 31, false)]
    #[case(DateRange::Quarter, 90, true)]
    #[case(DateRange::Quarter, 91, false)]
    #[case(DateRange::Quarter, -5, false)]
    fn date_windows_look_forward_only(
        #[case] range: DateRange,
        #[case] offset_days: i64,
        #[case] expected: bool,
    ) {
        let occurs_at = now() + Duration::days(offset_days);
        assert_eq!(is_within_range(occurs_at, range, now()), expected);
    }

    #[test]
    fn min_volunteers_is_inclusive() {
        let mut filters = FilterState {
            min_volunteers: 80,
            ..FilterState::default()
        };
        assert!(matches(&shore_cleanup(), &filters, now()));

        filters.min_volunteers = 81;
        assert!(!matches(&shore_cleanup(), &filters, now()));
    }

    #[test]
    fn mode_filter_is_exact() {
        let mut filters = FilterState {
            mode: Some(EventMode::Hybrid),
            ..FilterState::default()
        };
        assert!(!matches(&shore_cleanup(), &filters, now()));

        filters.mode = Some(EventMode::OnSite);
        assert!(matches(&shore_cleanup(), &filters, now()));
    }
}
