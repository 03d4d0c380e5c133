//! Volunteer event domain model.
//!
//! This module defines the core [`Event`] type representing one volunteer
//! opportunity, the closed [`Category`] and [`EventMode`] sets, and the optional
//! [`EventDetail`] record shown on the detail screen. Events are created by a
//! catalog source before the discovery pipeline runs and are never mutated by it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Unique, immutable event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event category. The set is closed; labels are the catalog's wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Çevre")]
    Environment,
    #[serde(rename = "Eğitim")]
    Education,
    #[serde(rename = "Sağlık")]
    Health,
    #[serde(rename = "Sosyal Sorumluluk")]
    SocialResponsibility,
    #[serde(rename = "Acil Durum")]
    Emergency,
    #[serde(rename = "Kültür")]
    Culture,
}

impl Category {
    /// All categories in the order they are offered as filter chips.
    pub const ALL: [Self; 6] = [
        Self::Environment,
        Self::Education,
        Self::Health,
        Self::SocialResponsibility,
        Self::Emergency,
        Self::Culture,
    ];

    /// Returns the display label, which is also the serialized value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Environment => "Çevre",
            Self::Education => "Eğitim",
            Self::Health => "Sağlık",
            Self::SocialResponsibility => "Sosyal Sorumluluk",
            Self::Emergency => "Acil Durum",
            Self::Culture => "Kültür",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// How volunteers take part in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventMode {
    #[serde(rename = "Yerinde")]
    OnSite,
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "Hibrit")]
    Hybrid,
}

impl EventMode {
    pub const ALL: [Self; 3] = [Self::OnSite, Self::Online, Self::Hybrid];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnSite => "Yerinde",
            Self::Online => "Online",
            Self::Hybrid => "Hibrit",
        }
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yerinde" | "on-site" | "onsite" => Ok(Self::OnSite),
            "online" => Ok(Self::Online),
            "hibrit" | "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("unknown participation mode: {other}")),
        }
    }
}

/// One volunteer opportunity as seen by the discovery pipeline.
///
/// # Fields
///
/// - `id`: Catalog identifier, unique within a session
/// - `title`: Non-empty display title
/// - `occurs_at`: When the event takes place (dates without a time are midnight UTC)
/// - `location`: City name or `"Online"`
/// - `tags`: Free-form tags; order is irrelevant to matching
/// - `volunteers_needed`: How many volunteers the organizer is looking for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub occurs_at: DateTime<Utc>,
    pub location: String,
    pub category: Category,
    pub image: Option<String>,
    pub organization: String,
    pub description: String,
    pub tags: Vec<String>,
    pub volunteers_needed: u32,
    pub mode: EventMode,
}

impl Event {
    /// Returns `true` if the event carries `tag` (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns a short label describing when the event happens relative to `now`.
    ///
    /// - Within the next hour: "starting now"
    /// - Less than a day ahead: "in Xh"
    /// - Later: "in Xd"
    /// - Already past: "Xd ago" (or "today" for less than a day)
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use eventscout::domain::{Category, Event, EventId, EventMode};
    ///
    /// let now = Utc::now();
    /// let event = Event {
    ///     id: EventId(1),
    ///     title: "Kıyı Temizliği".to_string(),
    ///     occurs_at: now + Duration::days(3) + Duration::minutes(5),
    ///     location: "İstanbul".to_string(),
    ///     category: Category::Environment,
    ///     image: None,
    ///     organization: "Mavi Dünya".to_string(),
    ///     description: String::new(),
    ///     tags: vec![],
    ///     volunteers_needed: 10,
    ///     mode: EventMode::OnSite,
    /// };
    /// assert_eq!(event.relative_label(now), "in 3d");
    /// ```
    #[must_use]
    pub fn relative_label(&self, now: DateTime<Utc>) -> String {
        let diff = (self.occurs_at - now).num_seconds();

        if diff >= 0 {
            if diff < SECONDS_PER_HOUR {
                "starting now".to_string()
            } else if diff < SECONDS_PER_DAY {
                format!("in {}h", diff / SECONDS_PER_HOUR)
            } else {
                format!("in {}d", diff / SECONDS_PER_DAY)
            }
        } else {
            let days = -diff / SECONDS_PER_DAY;
            if days == 0 {
                "today".to_string()
            } else {
                format!("{days}d ago")
            }
        }
    }
}

/// A single line in an event's day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time: String,
    pub activity: String,
}

/// Organizer contact person for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Long-form information shown on an event's detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    pub summary: String,
    pub objectives: Vec<String>,
    pub schedule: Vec<ScheduleItem>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub application_end: Option<NaiveDate>,
    pub contact: Option<Contact>,
    pub location_details: String,
    pub map_url: Option<String>,
    pub hero_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn event_at(occurs_at: DateTime<Utc>) -> Event {
        Event {
            id: EventId(7),
            title: "Afet Dayanıklılık Simülasyonu".to_string(),
            occurs_at,
            location: "İstanbul".to_string(),
            category: Category::Emergency,
            image: None,
            organization: "Kriz360".to_string(),
            description: String::new(),
            tags: vec!["Afet".to_string(), "Teknik".to_string()],
            volunteers_needed: 60,
            mode: EventMode::Hybrid,
        }
    }

    #[test]
    fn category_labels_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>(), Ok(category));
        }
        assert!("Spor".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&Category::SocialResponsibility).unwrap();
        assert_eq!(json, "\"Sosyal Sorumluluk\"");
    }

    #[test]
    fn mode_accepts_english_aliases() {
        assert_eq!("on-site".parse::<EventMode>(), Ok(EventMode::OnSite));
        assert_eq!("Hibrit".parse::<EventMode>(), Ok(EventMode::Hybrid));
        assert!("remote".parse::<EventMode>().is_err());
    }

    #[test]
    fn has_tag_is_exact() {
        let event = event_at(Utc::now());
        assert!(event.has_tag("Afet"));
        assert!(!event.has_tag("afet"));
    }

    #[test]
    fn relative_label_covers_past_and_future() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(event_at(now + Duration::minutes(10)).relative_label(now), "starting now");
        assert_eq!(event_at(now + Duration::hours(5)).relative_label(now), "in 5h");
        assert_eq!(event_at(now - Duration::hours(2)).relative_label(now), "today");
        assert_eq!(event_at(now - Duration::days(4)).relative_label(now), "4d ago");
    }
}
