//! In-memory, append-only event catalog.
//!
//! The [`Catalog`] is built once per session from the records a
//! [`CatalogSource`](super::CatalogSource) supplies. Events are never mutated or
//! removed afterwards; new records can only be appended, and each receives a
//! fresh identifier from the catalog's own [`IdGenerator`].

use crate::domain::error::{EventScoutError, Result};
use crate::domain::{Category, Event, EventDetail, EventId, DEFAULT_LOCATION, DEFAULT_ORGANIZATION};
use crate::infrastructure::text::turkish_cmp;
use crate::storage::ids::{IdGenerator, MonotonicIds};
use crate::storage::models::EventRecord;
use std::collections::{HashMap, HashSet};

/// Cities always offered by the location filter, in display order.
pub const LOCATION_OPTIONS: [&str; 7] = [
    "İstanbul",
    "Ankara",
    "İzmir",
    "Bursa",
    "Eskişehir",
    "Antalya",
    "Online",
];

/// The session's event catalog.
///
/// Events keep the order in which the source supplied them; the discovery
/// pipeline's stable sort relies on that order for ties.
#[derive(Debug)]
pub struct Catalog {
    events: Vec<Event>,
    details: HashMap<EventId, EventDetail>,
    ids: Box<dyn IdGenerator>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_id_generator(Box::new(MonotonicIds::default()))
    }
}

impl Catalog {
    /// Creates an empty catalog drawing identifiers from `ids`.
    #[must_use]
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            events: Vec::new(),
            details: HashMap::new(),
            ids,
        }
    }

    /// Builds a catalog from source records.
    ///
    /// Records carrying an explicit id keep it; the remaining records are
    /// numbered after the highest explicit id, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Catalog`] if any record fails validation or
    /// two records share an id.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventscout::domain::{Category, EventMode};
    /// use eventscout::storage::{Catalog, EventRecord};
    ///
    /// let records = vec![
    ///     EventRecord::new("Kıyı Temizliği", "2024-06-22", "İstanbul", Category::Environment, "Mavi Dünya Derneği", 80, EventMode::OnSite),
    ///     EventRecord::new("Kodlama Mentörlüğü", "2024-07-05", "Ankara", Category::Education, "FutureLab", 25, EventMode::Hybrid),
    /// ];
    /// let catalog = Catalog::from_records(records)?;
    /// assert_eq!(catalog.len(), 2);
    /// # Ok::<(), eventscout::EventScoutError>(())
    /// ```
    pub fn from_records(records: Vec<EventRecord>) -> Result<Self> {
        Self::from_records_with(records, Box::new(MonotonicIds::default()))
    }

    /// Like [`Catalog::from_records`], drawing new identifiers from `ids`.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_records`].
    pub fn from_records_with(records: Vec<EventRecord>, ids: Box<dyn IdGenerator>) -> Result<Self> {
        let _span = tracing::debug_span!("catalog_from_records", count = records.len()).entered();

        let mut catalog = Self::with_id_generator(ids);

        let mut seen = HashSet::new();
        for id in records.iter().filter_map(|record| record.id) {
            if !seen.insert(id) {
                return Err(EventScoutError::Catalog(format!("duplicate event id {id}")));
            }
            catalog.ids.reserve(EventId(id));
        }

        for record in records {
            let id = match record.id {
                Some(id) => EventId(id),
                None => catalog.ids.next_id(),
            };
            catalog.insert(record, id)?;
        }

        tracing::debug!(
            events = catalog.events.len(),
            with_details = catalog.details.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    /// Appends a record, assigning it a fresh identifier.
    ///
    /// Any id already present on the record is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Catalog`] if the record fails validation; the
    /// catalog is left unchanged.
    pub fn append(&mut self, record: EventRecord) -> Result<EventId> {
        let id = self.ids.next_id();
        self.insert(record, id)?;
        tracing::debug!(event_id = %id, "event appended");
        Ok(id)
    }

    fn insert(&mut self, record: EventRecord, id: EventId) -> Result<()> {
        let (event, detail) = record.into_parts(id)?;
        if let Some(detail) = detail {
            self.details.insert(id, detail);
        }
        self.events.push(event);
        Ok(())
    }

    /// All events in source order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// The detail record for `id`, if the source supplied one.
    #[must_use]
    pub fn detail(&self, id: EventId) -> Option<&EventDetail> {
        self.details.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Category chips, in the closed set's order.
    #[must_use]
    pub fn category_options(&self) -> Vec<Category> {
        Category::ALL.to_vec()
    }

    /// Location choices: the "all" label, the fixed city list, then any other
    /// location found in the catalog in Turkish alphabetical order.
    #[must_use]
    pub fn location_options(&self) -> Vec<String> {
        let mut extra: Vec<String> = self
            .distinct(|event| std::slice::from_ref(&event.location))
            .into_iter()
            .filter(|location| !LOCATION_OPTIONS.contains(&location.as_str()))
            .collect();
        extra.sort_by(|a, b| turkish_cmp(a, b));

        std::iter::once(DEFAULT_LOCATION.to_string())
            .chain(LOCATION_OPTIONS.iter().map(ToString::to_string))
            .chain(extra)
            .collect()
    }

    /// Organization choices: the "all" label followed by every organization in
    /// the catalog in Turkish alphabetical order.
    #[must_use]
    pub fn organization_options(&self) -> Vec<String> {
        let mut organizations = self.distinct(|event| std::slice::from_ref(&event.organization));
        organizations.sort_by(|a, b| turkish_cmp(a, b));

        std::iter::once(DEFAULT_ORGANIZATION.to_string())
            .chain(organizations)
            .collect()
    }

    /// Every tag used in the catalog, in Turkish alphabetical order.
    #[must_use]
    pub fn tag_options(&self) -> Vec<String> {
        let mut tags = self.distinct(|event| event.tags.as_slice());
        tags.sort_by(|a, b| turkish_cmp(a, b));
        tags
    }

    fn distinct<'a, F>(&'a self, values: F) -> Vec<String>
    where
        F: Fn(&'a Event) -> &'a [String],
    {
        let mut seen = HashSet::new();
        self.events
            .iter()
            .flat_map(values)
            .filter(|value| seen.insert(value.as_str()))
            .cloned()
            .collect()
    }
}
