//! Filter criteria narrowing the catalog to a result set.
//!
//! [`FilterState`] holds the user's current query. Every field has a default
//! such that `FilterState::default()` matches every event; the discovery
//! pipeline relies on that. Scalar fields are changed through a single keyed
//! setter, [`FilterState::apply`], taking a [`FilterChange`]; the two
//! multi-select sets have their own toggles.

use super::event::{Category, EventMode};
use std::fmt;
use std::str::FromStr;

/// Label shown for the "every location" choice.
pub const DEFAULT_LOCATION: &str = "Tüm Şehirler";

/// Label shown for the "every organization" choice.
pub const DEFAULT_ORGANIZATION: &str = "Tüm Kuruluşlar";

/// Forward-looking date window relative to the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateRange {
    #[default]
    Any,
    Week,
    Month,
    Quarter,
}

impl DateRange {
    /// Length of the window in days, `None` for [`DateRange::Any`].
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Any => None,
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Quarter => Some(90),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "all" => Ok(Self::Any),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            other => Err(format!("unknown date range: {other}")),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering strategy for the filtered result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Earliest event first.
    #[default]
    Date,
    /// Largest volunteer demand first.
    Volunteers,
    /// Latest event date first. The date stands in for a creation timestamp,
    /// which the catalog does not have.
    Recent,
}

impl SortOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Volunteers => "volunteers",
            Self::Recent => "recent",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" | "soonest" => Ok(Self::Date),
            "volunteers" => Ok(Self::Volunteers),
            "recent" => Ok(Self::Recent),
            other => Err(format!("unknown sort option: {other}")),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current query.
///
/// `None` in `location`, `organization` and `mode` means "all". Empty
/// `categories` and `tags` mean "no restriction", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub location: Option<String>,
    pub organization: Option<String>,
    /// Selected categories in insertion order; an event matches any of them.
    pub categories: Vec<Category>,
    /// Selected tags in insertion order; an event must carry all of them.
    pub tags: Vec<String>,
    pub date_range: DateRange,
    pub min_volunteers: u32,
    pub mode: Option<EventMode>,
    pub sort_by: SortOption,
}

/// A keyed update of one [`FilterState`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    Location(Option<String>),
    Organization(Option<String>),
    Categories(Vec<Category>),
    Tags(Vec<String>),
    DateRange(DateRange),
    MinVolunteers(u32),
    Mode(Option<EventMode>),
    SortBy(SortOption),
}

impl FilterState {
    /// Applies a single keyed change, replacing the targeted field.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Search(search) => self.search = search,
            FilterChange::Location(location) => self.location = location,
            FilterChange::Organization(organization) => self.organization = organization,
            FilterChange::Categories(categories) => self.categories = categories,
            FilterChange::Tags(tags) => self.tags = tags,
            FilterChange::DateRange(range) => self.date_range = range,
            FilterChange::MinVolunteers(min) => self.min_volunteers = min,
            FilterChange::Mode(mode) => self.mode = mode,
            FilterChange::SortBy(sort) => self.sort_by = sort,
        }
    }

    /// Removes `category` if selected, otherwise appends it.
    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    /// Removes `tag` if selected, otherwise appends it.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when no criterion restricts the result set.
    ///
    /// The sort strategy is not a criterion and is ignored.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        let defaults = Self {
            sort_by: self.sort_by,
            ..Self::default()
        };
        *self == defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_preserve_insertion_order() {
        let mut filters = FilterState::default();
        filters.toggle_category(Category::Health);
        filters.toggle_category(Category::Environment);
        filters.toggle_category(Category::Culture);
        filters.toggle_category(Category::Environment);

        assert_eq!(filters.categories, vec![Category::Health, Category::Culture]);
    }

    #[test]
    fn tag_toggle_is_independent_of_categories() {
        let mut filters = FilterState::default();
        filters.toggle_tag("STEM");
        filters.toggle_category(Category::Education);
        filters.toggle_tag("Gençlik");
        filters.toggle_tag("STEM");

        assert_eq!(filters.tags, vec!["Gençlik".to_string()]);
        assert_eq!(filters.categories, vec![Category::Education]);
    }

    #[test]
    fn apply_replaces_only_the_targeted_field() {
        let mut filters = FilterState::default();
        filters.apply(FilterChange::MinVolunteers(25));
        filters.apply(FilterChange::Location(Some("Ankara".to_string())));

        assert_eq!(filters.min_volunteers, 25);
        assert_eq!(filters.location.as_deref(), Some("Ankara"));
        assert_eq!(filters.search, "");
        assert_eq!(filters.sort_by, SortOption::Date);
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let mut filters = FilterState::default();
        filters.apply(FilterChange::Search("kıyı".to_string()));
        filters.toggle_tag("Sahil");

        filters.reset();
        let once = filters.clone();
        filters.reset();

        assert_eq!(filters, once);
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn sort_does_not_count_as_restriction() {
        let mut filters = FilterState::default();
        filters.apply(FilterChange::SortBy(SortOption::Recent));
        assert!(filters.is_unrestricted());

        filters.apply(FilterChange::DateRange(DateRange::Week));
        assert!(!filters.is_unrestricted());
    }

    #[test]
    fn parses_range_and_sort_names() {
        assert_eq!("Quarter".parse::<DateRange>(), Ok(DateRange::Quarter));
        assert_eq!("volunteers".parse::<SortOption>(), Ok(SortOption::Volunteers));
        assert!("yesterday".parse::<DateRange>().is_err());
    }
}
