//! Domain layer for eventscout.
//!
//! This module contains the core domain types, independent of storage, the HTTP
//! API or terminal rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`event`]: Volunteer event model, categories and participation modes
//! - [`filters`]: Filter criteria and keyed filter changes
//! - [`clock`]: Source of the current instant for date-window filtering

pub mod clock;
pub mod error;
pub mod event;
pub mod filters;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EventScoutError, Result};
pub use event::{Category, Contact, Event, EventDetail, EventId, EventMode, ScheduleItem};
pub use filters::{
    DateRange, FilterChange, FilterState, SortOption, DEFAULT_LOCATION, DEFAULT_ORGANIZATION,
};
