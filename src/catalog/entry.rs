//! Catalog entry types - priced components available for panel BOMs
//!
//! Each entry pairs one component (typed per-category attributes, brand,
//! order number) with one or more supplier price records. Entries are
//! authored as plain YAML files and are read-only from the engine's
//! perspective.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::CatalogId;
use crate::engine::instrument::InstrumentKind;

/// Component category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogCategory {
    Contactor,
    Mpcb,
    Mccb,
    Bimetal,
    Drive,
    Instrument,
    WireCable,
    ElectricalPanel,
    General,
}

impl CatalogCategory {
    /// Human-readable label, also used in not-found notes
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogCategory::Contactor => "Contactor",
            CatalogCategory::Mpcb => "MPCB",
            CatalogCategory::Mccb => "MCCB",
            CatalogCategory::Bimetal => "Bimetal relay",
            CatalogCategory::Drive => "Drive",
            CatalogCategory::Instrument => "Instrument",
            CatalogCategory::WireCable => "Wire/cable",
            CatalogCategory::ElectricalPanel => "Electrical panel",
            CatalogCategory::General => "General",
        }
    }

    /// Whether this category is a current-sized protective device,
    /// selected by tightest adequate rating rather than price recency
    pub fn is_protective(&self) -> bool {
        matches!(
            self,
            CatalogCategory::Contactor
                | CatalogCategory::Mpcb
                | CatalogCategory::Mccb
                | CatalogCategory::Bimetal
        )
    }
}

impl std::fmt::Display for CatalogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Drive families sized by motor power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveKind {
    Vfd,
    SoftStarter,
}

impl std::fmt::Display for DriveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveKind::Vfd => write!(f, "VFD"),
            DriveKind::SoftStarter => write!(f, "Soft starter"),
        }
    }
}

/// Category-specific component attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CategorySpec {
    /// Contactor rated for a maximum operating current (A)
    Contactor { rated_current: f64 },

    /// Motor protection circuit breaker with an adjustable current range
    Mpcb {
        min_current: f64,
        max_current: f64,
        breaking_capacity_ka: f64,
        trip_class: String,
    },

    /// Molded-case circuit breaker
    Mccb {
        rated_current: f64,
        breaking_capacity_ka: f64,
    },

    /// Thermal overload relay with an adjustable current range
    Bimetal { min_current: f64, max_current: f64 },

    /// VFD or soft starter sized by power
    Drive { kind: DriveKind, power_kw: f64 },

    /// Field instrument
    Instrument { kind: InstrumentKind },

    /// Power or signal cable, identified by conductor cross-section
    WireCable { size_mm2: f64, construction: String },

    /// Panel enclosure with exact dimensions (mm)
    ElectricalPanel {
        width_mm: u32,
        height_mm: u32,
        depth_mm: u32,
    },

    /// Anything else, identified by its free-text specification
    General { specification: String },
}

impl CategorySpec {
    pub fn category(&self) -> CatalogCategory {
        match self {
            CategorySpec::Contactor { .. } => CatalogCategory::Contactor,
            CategorySpec::Mpcb { .. } => CatalogCategory::Mpcb,
            CategorySpec::Mccb { .. } => CatalogCategory::Mccb,
            CategorySpec::Bimetal { .. } => CatalogCategory::Bimetal,
            CategorySpec::Drive { .. } => CatalogCategory::Drive,
            CategorySpec::Instrument { .. } => CatalogCategory::Instrument,
            CategorySpec::WireCable { .. } => CatalogCategory::WireCable,
            CategorySpec::ElectricalPanel { .. } => CatalogCategory::ElectricalPanel,
            CategorySpec::General { .. } => CatalogCategory::General,
        }
    }

    /// One-line specification string for BOM rows and list output
    pub fn summary(&self) -> String {
        match self {
            CategorySpec::Contactor { rated_current } => format!("{}A", rated_current),
            CategorySpec::Mpcb {
                min_current,
                max_current,
                breaking_capacity_ka,
                trip_class,
            } => format!(
                "{}-{}A, {}kA, class {}",
                min_current, max_current, breaking_capacity_ka, trip_class
            ),
            CategorySpec::Mccb {
                rated_current,
                breaking_capacity_ka,
            } => format!("{}A, {}kA", rated_current, breaking_capacity_ka),
            CategorySpec::Bimetal {
                min_current,
                max_current,
            } => format!("{}-{}A", min_current, max_current),
            CategorySpec::Drive { kind, power_kw } => format!("{} {}kW", kind, power_kw),
            CategorySpec::Instrument { kind } => kind.label().to_string(),
            CategorySpec::WireCable {
                size_mm2,
                construction,
            } => format!("{} {}mm²", construction, size_mm2),
            CategorySpec::ElectricalPanel {
                width_mm,
                height_mm,
                depth_mm,
            } => format!("{}x{}x{}mm", width_mm, height_mm, depth_mm),
            CategorySpec::General { specification } => specification.clone(),
        }
    }
}

/// One supplier price for a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub price: f64,

    pub currency: String,

    pub supplier: String,

    /// Date this price was quoted or confirmed
    pub effective_date: NaiveDate,
}

/// A catalog entry - one component with its price history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identifier (CAT-...)
    pub id: CatalogId,

    /// Manufacturer brand
    pub brand: String,

    /// Manufacturer order number
    pub order_number: String,

    /// Category-specific attributes
    pub specs: CategorySpec,

    /// Supplier prices, any order; the freshest effective date wins
    #[serde(default)]
    pub prices: Vec<PriceRecord>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Who entered this component
    pub author: String,
}

impl CatalogEntry {
    pub fn new(brand: impl Into<String>, order_number: impl Into<String>, specs: CategorySpec) -> Self {
        Self {
            id: CatalogId::new(),
            brand: brand.into(),
            order_number: order_number.into(),
            specs,
            prices: Vec::new(),
            created: Utc::now(),
            author: String::new(),
        }
    }

    pub fn with_price(mut self, price: f64, currency: &str, supplier: &str, date: NaiveDate) -> Self {
        self.prices.push(PriceRecord {
            price,
            currency: currency.to_string(),
            supplier: supplier.to_string(),
            effective_date: date,
        });
        self
    }

    pub fn category(&self) -> CatalogCategory {
        self.specs.category()
    }

    /// The price record with the most recent effective date, if any
    pub fn best_price(&self) -> Option<&PriceRecord> {
        self.prices.iter().max_by_key(|p| p.effective_date)
    }
}
