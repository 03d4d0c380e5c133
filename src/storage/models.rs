//! Catalog record models for the storage layer.
//!
//! [`EventRecord`] is the wire shape of one event as found in catalog JSON
//! files and API responses (camelCase keys, dates as strings, detail fields
//! inline). It stays separate from the domain [`Event`] so that validation
//! happens once, at the boundary.

use crate::domain::error::{EventScoutError, Result};
use crate::domain::{Category, Contact, Event, EventDetail, EventId, EventMode, ScheduleItem};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Represents one event record in a catalog file or API payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Identifier; records without one are numbered by the catalog.
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    /// `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
    pub date: String,
    pub location: String,
    pub category: Category,
    #[serde(default)]
    pub image: Option<String>,
    pub volunteers_needed: u32,
    pub organization: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub mode: EventMode,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

impl EventRecord {
    /// Creates a minimal record with no detail fields.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        category: Category,
        organization: impl Into<String>,
        volunteers_needed: u32,
        mode: EventMode,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            date: date.into(),
            location: location.into(),
            category,
            image: None,
            volunteers_needed,
            organization: organization.into(),
            description: String::new(),
            tags: Vec::new(),
            mode,
            summary: String::new(),
            objectives: Vec::new(),
            schedule: Vec::new(),
            requirements: Vec::new(),
            benefits: Vec::new(),
            application_end_date: None,
            contact: None,
            location_details: String::new(),
            map_url: None,
            hero_image: None,
        }
    }

    /// Validates the record and splits it into the card-level [`Event`] and its
    /// optional [`EventDetail`], using `id` as the event's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Catalog`] if the title is blank, or if the
    /// event date or application end date cannot be parsed.
    pub fn into_parts(self, id: EventId) -> Result<(Event, Option<EventDetail>)> {
        if self.title.trim().is_empty() {
            return Err(EventScoutError::Catalog(format!("event {id} has an empty title")));
        }

        let occurs_at = parse_occurs_at(&self.date).ok_or_else(|| {
            EventScoutError::Catalog(format!("event {id} has an invalid date: {}", self.date))
        })?;

        let application_end = self
            .application_end_date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    EventScoutError::Catalog(format!(
                        "event {id} has an invalid application end date {raw}: {e}"
                    ))
                })
            })
            .transpose()?;

        let has_detail = !self.summary.is_empty()
            || !self.objectives.is_empty()
            || !self.schedule.is_empty()
            || !self.requirements.is_empty()
            || !self.benefits.is_empty()
            || application_end.is_some()
            || self.contact.is_some()
            || !self.location_details.is_empty()
            || self.map_url.is_some()
            || self.hero_image.is_some();

        let detail = has_detail.then(|| EventDetail {
            summary: self.summary,
            objectives: self.objectives,
            schedule: self.schedule,
            requirements: self.requirements,
            benefits: self.benefits,
            application_end,
            contact: self.contact,
            location_details: self.location_details,
            map_url: self.map_url,
            hero_image: self.hero_image,
        });

        let event = Event {
            id,
            title: self.title,
            occurs_at,
            location: self.location,
            category: self.category,
            image: self.image,
            organization: self.organization,
            description: self.description,
            tags: self.tags,
            volunteers_needed: self.volunteers_needed,
            mode: self.mode,
        };

        Ok((event, detail))
    }
}

/// Parses a catalog date: a bare `YYYY-MM-DD` is midnight UTC, anything else
/// must be RFC 3339.
#[must_use]
pub fn parse_occurs_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EventRecord {
        EventRecord::new(
            "Sanatla Terapi Atölyeleri",
            "2024-07-18",
            "Antalya",
            Category::Health,
            "Renkli Adımlar",
            20,
            EventMode::OnSite,
        )
    }

    #[test]
    fn bare_dates_are_midnight_utc() {
        let parsed = parse_occurs_at("2024-07-18").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 7, 18, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_dates_are_normalized_to_utc() {
        let parsed = parse_occurs_at("2024-07-18T10:00:00+03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 7, 18, 7, 0, 0).unwrap());
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(parse_occurs_at("18/07/2024").is_none());

        let mut bad = record();
        bad.date = "soon".to_string();
        assert!(matches!(bad.into_parts(EventId(1)), Err(EventScoutError::Catalog(_))));
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut bad = record();
        bad.title = "   ".to_string();
        assert!(bad.into_parts(EventId(1)).is_err());
    }

    #[test]
    fn card_only_records_have_no_detail() {
        let (event, detail) = record().into_parts(EventId(8)).unwrap();
        assert_eq!(event.id, EventId(8));
        assert_eq!(event.volunteers_needed, 20);
        assert!(detail.is_none());
    }

    #[test]
    fn detail_fields_are_split_out() {
        let mut rec = record();
        rec.summary = "Çocuk servislerinde sanat atölyeleri.".to_string();
        rec.application_end_date = Some("2024-07-10".to_string());

        let (_, detail) = rec.into_parts(EventId(8)).unwrap();
        let detail = detail.unwrap();
        assert_eq!(detail.application_end, NaiveDate::from_ymd_opt(2024, 7, 10));
        assert!(detail.schedule.is_empty());
    }

    #[test]
    fn deserializes_camel_case_payloads() {
        let json = r#"{
            "title": "Online Türkçe Konuşma Kulübü",
            "date": "2024-06-28",
            "location": "Online",
            "category": "Kültür",
            "volunteersNeeded": 40,
            "organization": "Dil Köprüsü",
            "tags": ["Dil", "Uzaktan"],
            "mode": "Online"
        }"#;
        let rec: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, None);
        assert_eq!(rec.category, Category::Culture);
        assert_eq!(rec.mode, EventMode::Online);
        assert_eq!(rec.volunteers_needed, 40);
    }
}
