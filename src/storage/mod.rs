//! Storage layer for the session's event catalog.
//!
//! This module provides the catalog store and the sources it is filled from.
//! Records are read through the [`CatalogSource`] trait, validated at the
//! boundary by [`EventRecord::into_parts`], and kept in an append-only
//! [`Catalog`] that owns its identifier generator.
//!
//! # Modules
//!
//! - `backend`: Catalog source trait and catalog loading
//! - `json`: JSON file and built-in seed catalog source
//! - `catalog`: Append-only in-memory catalog and filter option lists
//! - `ids`: Identifier generation for appended records
//! - `models`: Wire records separate from domain models

pub mod backend;
pub mod catalog;
pub mod ids;
pub mod json;
pub mod models;

pub use backend::{load_catalog, CatalogSource};
pub use catalog::{Catalog, LOCATION_OPTIONS};
pub use ids::{IdGenerator, MonotonicIds};
pub use json::JsonCatalog;
pub use models::EventRecord;
