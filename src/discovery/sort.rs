//! Ordering of the filtered result set.

use crate::domain::{Event, SortOption};
use std::cmp::Ordering;

/// Compares two events under `strategy`.
///
/// - [`SortOption::Date`]: ascending by date
/// - [`SortOption::Volunteers`]: descending by volunteers needed
/// - [`SortOption::Recent`]: descending by date, standing in for recency of
///   addition since events carry no creation timestamp
#[must_use]
pub fn compare(a: &Event, b: &Event, strategy: SortOption) -> Ordering {
    match strategy {
        SortOption::Date => a.occurs_at.cmp(&b.occurs_at),
        SortOption::Volunteers => b.volunteers_needed.cmp(&a.volunteers_needed),
        SortOption::Recent => b.occurs_at.cmp(&a.occurs_at),
    }
}

/// Sorts `events` in place. The sort is stable: ties keep their input order.
pub fn sort_events(events: &mut [Event], strategy: SortOption) {
    events.sort_by(|a, b| compare(a, b, strategy));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, EventId, EventMode};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn event(id: u64, date: &str, volunteers: u32) -> Event {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Event {
            id: EventId(id),
            title: format!("event {id}"),
            occurs_at: Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap()),
            location: "Online".to_string(),
            category: Category::Culture,
            image: None,
            organization: "Dil Köprüsü".to_string(),
            description: String::new(),
            tags: vec![],
            volunteers_needed: volunteers,
            mode: EventMode::Online,
        }
    }

    fn ids(events: &[Event]) -> Vec<u64> {
        events.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn soonest_date_puts_earliest_first() {
        let mut events = vec![event(1, "2025-03-01", 5), event(2, "2025-01-01", 5)];
        sort_events(&mut events, SortOption::Date);
        assert_eq!(ids(&events), vec![2, 1]);
    }

    #[test]
    fn recent_is_reverse_date() {
        let mut events = vec![
            event(1, "2025-01-01", 5),
            event(2, "2025-03-01", 5),
            event(3, "2025-02-01", 5),
        ];
        sort_events(&mut events, SortOption::Recent);
        assert_eq!(ids(&events), vec![2, 3, 1]);
    }

    #[test]
    fn volunteers_descending_keeps_ties_in_input_order() {
        let mut events = vec![
            event(1, "2025-01-01", 20),
            event(2, "2025-01-02", 60),
            event(3, "2025-01-03", 20),
            event(4, "2025-01-04", 60),
        ];
        sort_events(&mut events, SortOption::Volunteers);
        assert_eq!(ids(&events), vec![2, 4, 1, 3]);
    }
}
