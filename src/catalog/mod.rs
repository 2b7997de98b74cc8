//! Catalog module - priced component store and best-match lookup

pub mod entry;
pub mod store;

pub use entry::{CatalogCategory, CatalogEntry, CategorySpec, DriveKind, PriceRecord};
pub use store::{CatalogStore, LookupMiss, LookupRequest, PricedMatch};
