//! Catalog store and best-match lookup
//!
//! The store holds every catalog entry in memory and answers
//! `find(category, request)` queries. Selection is a two-step policy:
//! filter to entries satisfying the request, then pick one winner with a
//! category-specific tie-break. Current-sized protective devices take the
//! tightest adequate rating (don't over-provision); everything else takes
//! the entry with the most recently confirmed price.
//!
//! A miss is data, not an error: callers emit a placeholder BOM row and
//! keep building.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::entry::{CatalogCategory, CatalogEntry, CategorySpec, DriveKind};
use crate::core::loader;
use crate::core::project::Project;
use crate::engine::instrument::InstrumentKind;

/// Filter criteria for one catalog lookup
#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    /// Approved brand allowlist; empty means any brand
    pub brands: Vec<String>,

    /// Minimum adequate current (A), already including the safety margin
    pub required_current: Option<f64>,

    /// Minimum adequate drive power (kW)
    pub required_power_kw: Option<f64>,

    pub drive_kind: Option<DriveKind>,

    pub instrument_kind: Option<InstrumentKind>,

    /// Exact free-text specification (General category)
    pub specification: Option<String>,

    /// Exact conductor cross-section (WireCable category)
    pub cable_size_mm2: Option<f64>,

    /// Exact enclosure dimensions (ElectricalPanel category)
    pub dimensions_mm: Option<(u32, u32, u32)>,
}

impl LookupRequest {
    pub fn for_current(required_current: f64, brands: &[String]) -> Self {
        Self {
            brands: brands.to_vec(),
            required_current: Some(required_current),
            ..Self::default()
        }
    }

    pub fn for_drive(kind: DriveKind, power_kw: f64, brands: &[String]) -> Self {
        Self {
            brands: brands.to_vec(),
            drive_kind: Some(kind),
            required_power_kw: Some(power_kw),
            ..Self::default()
        }
    }

    pub fn for_instrument(kind: InstrumentKind, brands: &[String]) -> Self {
        Self {
            brands: brands.to_vec(),
            instrument_kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn for_specification(text: impl Into<String>) -> Self {
        Self {
            specification: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn for_cable(size_mm2: f64) -> Self {
        Self {
            cable_size_mm2: Some(size_mm2),
            ..Self::default()
        }
    }

    pub fn for_enclosure(width_mm: u32, height_mm: u32, depth_mm: u32) -> Self {
        Self {
            dimensions_mm: Some((width_mm, height_mm, depth_mm)),
            ..Self::default()
        }
    }

    fn brand_allowed(&self, brand: &str) -> bool {
        self.brands.is_empty() || self.brands.iter().any(|b| b.eq_ignore_ascii_case(brand))
    }

    fn matches(&self, entry: &CatalogEntry) -> bool {
        if !self.brand_allowed(&entry.brand) {
            return false;
        }

        match &entry.specs {
            CategorySpec::Contactor { rated_current } => match self.required_current {
                Some(required) => *rated_current >= required,
                None => true,
            },
            CategorySpec::Mccb { rated_current, .. } => match self.required_current {
                Some(required) => *rated_current >= required,
                None => true,
            },
            CategorySpec::Mpcb {
                min_current,
                max_current,
                ..
            }
            | CategorySpec::Bimetal {
                min_current,
                max_current,
            } => match self.required_current {
                Some(required) => *min_current <= required && required <= *max_current,
                None => true,
            },
            CategorySpec::Drive { kind, power_kw } => {
                self.drive_kind.map_or(true, |k| k == *kind)
                    && self.required_power_kw.map_or(true, |p| *power_kw >= p)
            }
            CategorySpec::Instrument { kind } => {
                self.instrument_kind.map_or(true, |k| k == *kind)
            }
            CategorySpec::WireCable { size_mm2, .. } => self
                .cable_size_mm2
                .map_or(true, |s| (*size_mm2 - s).abs() < f64::EPSILON),
            CategorySpec::ElectricalPanel {
                width_mm,
                height_mm,
                depth_mm,
            } => self
                .dimensions_mm
                .map_or(true, |(w, h, d)| *width_mm == w && *height_mm == h && *depth_mm == d),
            CategorySpec::General { specification } => self
                .specification
                .as_deref()
                .map_or(true, |s| specification.eq_ignore_ascii_case(s)),
        }
    }

    fn describe(&self, category: CatalogCategory) -> String {
        let mut parts = Vec::new();
        if let Some(i) = self.required_current {
            parts.push(format!("required {:.2}A", i));
        }
        if let Some(p) = self.required_power_kw {
            parts.push(format!("required {:.1}kW", p));
        }
        if let Some(k) = self.drive_kind {
            parts.push(k.to_string());
        }
        if let Some(k) = self.instrument_kind {
            parts.push(k.label().to_string());
        }
        if let Some(s) = &self.specification {
            parts.push(format!("'{}'", s));
        }
        if let Some(s) = self.cable_size_mm2 {
            parts.push(format!("{}mm²", s));
        }
        if let Some((w, h, d)) = self.dimensions_mm {
            parts.push(format!("{}x{}x{}mm", w, h, d));
        }
        if !self.brands.is_empty() {
            parts.push(format!("brands [{}]", self.brands.join(", ")));
        }
        if parts.is_empty() {
            format!("any {}", category)
        } else {
            parts.join(", ")
        }
    }
}

/// A successful lookup: component attributes flattened with its best price
#[derive(Debug, Clone, PartialEq)]
pub struct PricedMatch {
    pub brand: String,
    pub order_number: String,
    pub specification: String,
    pub price: f64,
    pub currency: String,
    pub supplier: String,
    pub effective_date: String,
}

/// A lookup that found nothing; never fatal to panel generation
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{category} not found ({detail})")]
pub struct LookupMiss {
    pub category: CatalogCategory,
    pub detail: String,
}

/// In-memory, read-only catalog
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    skipped: Vec<(PathBuf, String)>,
}

impl CatalogStore {
    /// Load every catalog entry file under the project's catalog/ tree.
    ///
    /// Unparsable files are skipped and reported via [`CatalogStore::skipped`],
    /// never failing the load.
    pub fn load(project: &Project) -> Self {
        let files = project.iter_catalog_files();
        let (entries, skipped) = loader::load_files::<CatalogEntry>(&files);
        Self { entries, skipped }
    }

    /// Build a store from in-memory entries (tests, embedded catalogs)
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            skipped: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Files that could not be parsed during load
    pub fn skipped(&self) -> &[(PathBuf, String)] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the best-matching priced entry for a category and request.
    ///
    /// Entries without any price record cannot produce a priced row and are
    /// ignored. Protective devices pick the tightest adequate rating (ties
    /// fall to the freshest price); all other categories pick the entry with
    /// the most recent price effective date.
    pub fn find(
        &self,
        category: CatalogCategory,
        request: &LookupRequest,
    ) -> Result<PricedMatch, LookupMiss> {
        let candidates: Vec<&CatalogEntry> = self
            .entries
            .iter()
            .filter(|e| e.category() == category)
            .filter(|e| request.matches(e))
            .filter(|e| e.best_price().is_some())
            .collect();

        let winner = if category.is_protective() || category == CatalogCategory::Drive {
            candidates.into_iter().min_by(|a, b| {
                let ka = sizing_key(a);
                let kb = sizing_key(b);
                ka.partial_cmp(&kb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    // tightest rating first; on equal ratings prefer the freshest price
                    .then_with(|| {
                        let da = a.best_price().map(|p| p.effective_date);
                        let db = b.best_price().map(|p| p.effective_date);
                        db.cmp(&da)
                    })
            })
        } else {
            candidates
                .into_iter()
                .max_by_key(|e| e.best_price().map(|p| p.effective_date))
        };

        match winner {
            Some(entry) => {
                // candidates were pre-filtered to priced entries
                let price = entry.best_price().ok_or_else(|| LookupMiss {
                    category,
                    detail: "no price record".to_string(),
                })?;
                Ok(PricedMatch {
                    brand: entry.brand.clone(),
                    order_number: entry.order_number.clone(),
                    specification: entry.specs.summary(),
                    price: price.price,
                    currency: price.currency.clone(),
                    supplier: price.supplier.clone(),
                    effective_date: price.effective_date.format("%Y-%m-%d").to_string(),
                })
            }
            None => Err(LookupMiss {
                category,
                detail: request.describe(category),
            }),
        }
    }
}

/// Sort key for the don't-over-provision tie-break: smallest adequate
/// rating for fixed-rating devices, tightest covering range for
/// adjustable-range devices, smallest adequate power for drives.
fn sizing_key(entry: &CatalogEntry) -> (f64, f64) {
    match &entry.specs {
        CategorySpec::Contactor { rated_current } => (*rated_current, *rated_current),
        CategorySpec::Mccb { rated_current, .. } => (*rated_current, *rated_current),
        CategorySpec::Mpcb {
            min_current,
            max_current,
            ..
        }
        | CategorySpec::Bimetal {
            min_current,
            max_current,
        } => (*max_current - *min_current, *max_current),
        CategorySpec::Drive { power_kw, .. } => (*power_kw, *power_kw),
        _ => (f64::MAX, f64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mccb(brand: &str, rated: f64, price: f64, d: NaiveDate) -> CatalogEntry {
        CatalogEntry::new(
            brand,
            format!("MCCB-{}", rated),
            CategorySpec::Mccb {
                rated_current: rated,
                breaking_capacity_ka: 36.0,
            },
        )
        .with_price(price, "EUR", "Alpha", d)
    }

    #[test]
    fn test_protective_takes_tightest_rating_not_cheapest() {
        let store = CatalogStore::from_entries(vec![
            mccb("Siemens", 160.0, 10.0, date(2026, 1, 1)),
            mccb("Siemens", 63.0, 90.0, date(2025, 1, 1)),
            mccb("Siemens", 100.0, 50.0, date(2026, 2, 1)),
        ]);

        let found = store
            .find(
                CatalogCategory::Mccb,
                &LookupRequest::for_current(50.25, &[]),
            )
            .unwrap();
        // 63A covers 50.25A and is the smallest adequate rating,
        // even though the 160A unit is cheaper and priced more recently
        assert_eq!(found.order_number, "MCCB-63");
    }

    #[test]
    fn test_protective_skips_inadequate_ratings() {
        let store = CatalogStore::from_entries(vec![
            mccb("Siemens", 25.0, 30.0, date(2026, 1, 1)),
            mccb("Siemens", 40.0, 40.0, date(2026, 1, 1)),
        ]);

        let miss = store
            .find(
                CatalogCategory::Mccb,
                &LookupRequest::for_current(50.25, &[]),
            )
            .unwrap_err();
        assert_eq!(miss.category, CatalogCategory::Mccb);
        assert!(miss.to_string().contains("MCCB not found"));
        assert!(miss.to_string().contains("50.25"));
    }

    #[test]
    fn test_range_device_covering_search() {
        let wide = CatalogEntry::new(
            "Siemens",
            "3RV-wide",
            CategorySpec::Mpcb {
                min_current: 5.0,
                max_current: 25.0,
                breaking_capacity_ka: 55.0,
                trip_class: "10".to_string(),
            },
        )
        .with_price(80.0, "EUR", "Alpha", date(2026, 1, 1));
        let tight = CatalogEntry::new(
            "Siemens",
            "3RV-tight",
            CategorySpec::Mpcb {
                min_current: 10.0,
                max_current: 16.0,
                breaking_capacity_ka: 55.0,
                trip_class: "10".to_string(),
            },
        )
        .with_price(95.0, "EUR", "Alpha", date(2025, 6, 1));

        let store = CatalogStore::from_entries(vec![wide, tight]);
        let found = store
            .find(
                CatalogCategory::Mpcb,
                &LookupRequest::for_current(12.5, &[]),
            )
            .unwrap();
        assert_eq!(found.order_number, "3RV-tight");
    }

    #[test]
    fn test_general_takes_most_recent_price() {
        let older = CatalogEntry::new("Phoenix", "UK4", CategorySpec::General {
            specification: "Terminal 4mm²".to_string(),
        })
        .with_price(0.4, "EUR", "Alpha", date(2025, 2, 1));
        let newer = CatalogEntry::new("Weidmüller", "WDU4", CategorySpec::General {
            specification: "Terminal 4mm²".to_string(),
        })
        .with_price(0.5, "EUR", "Beta", date(2026, 3, 1));

        let store = CatalogStore::from_entries(vec![older, newer]);
        let found = store
            .find(
                CatalogCategory::General,
                &LookupRequest::for_specification("Terminal 4mm²"),
            )
            .unwrap();
        assert_eq!(found.brand, "Weidmüller");
        assert_eq!(found.effective_date, "2026-03-01");
    }

    #[test]
    fn test_brand_allowlist_restricts() {
        let store = CatalogStore::from_entries(vec![
            mccb("Siemens", 63.0, 90.0, date(2026, 1, 1)),
            mccb("LS", 63.0, 60.0, date(2026, 1, 1)),
        ]);

        let found = store
            .find(
                CatalogCategory::Mccb,
                &LookupRequest::for_current(50.0, &["LS".to_string()]),
            )
            .unwrap();
        assert_eq!(found.brand, "LS");

        let miss = store
            .find(
                CatalogCategory::Mccb,
                &LookupRequest::for_current(50.0, &["ABB".to_string()]),
            )
            .unwrap_err();
        assert!(miss.detail.contains("ABB"));
    }

    #[test]
    fn test_unpriced_entries_are_ignored() {
        let unpriced = CatalogEntry::new("Siemens", "MCCB-63", CategorySpec::Mccb {
            rated_current: 63.0,
            breaking_capacity_ka: 36.0,
        });
        let store = CatalogStore::from_entries(vec![unpriced]);
        assert!(store
            .find(
                CatalogCategory::Mccb,
                &LookupRequest::for_current(50.0, &[])
            )
            .is_err());
    }

    #[test]
    fn test_enclosure_exact_dimensions() {
        let enclosure = CatalogEntry::new("Rittal", "AE-800", CategorySpec::ElectricalPanel {
            width_mm: 800,
            height_mm: 2000,
            depth_mm: 600,
        })
        .with_price(900.0, "EUR", "Alpha", date(2026, 1, 1));

        let store = CatalogStore::from_entries(vec![enclosure]);
        assert!(store
            .find(
                CatalogCategory::ElectricalPanel,
                &LookupRequest::for_enclosure(800, 2000, 600)
            )
            .is_ok());
        assert!(store
            .find(
                CatalogCategory::ElectricalPanel,
                &LookupRequest::for_enclosure(600, 800, 250)
            )
            .is_err());
    }
}
