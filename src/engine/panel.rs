//! Panel - the columnar BOM produced by a builder run
//!
//! Parallel column vectors, one tuple per BOM line, insertion order is row
//! order. Every push recomputes `total_price = quantity * price`, so the
//! row invariant can never drift. Panels are append-only: created empty,
//! filled by the selectors, handed to presentation complete.

use serde::Serialize;

/// One BOM line, as pushed by a selector
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub kind: String,
    pub brand: String,
    pub order_number: String,
    pub specification: String,
    pub quantity: f64,
    pub price: f64,
    pub last_price_update: String,
    pub note: String,
}

/// Column-oriented BOM table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Panel {
    pub types: Vec<String>,
    pub brands: Vec<String>,
    pub order_numbers: Vec<String>,
    pub specifications: Vec<String>,
    pub quantities: Vec<f64>,
    pub prices: Vec<f64>,
    pub total_prices: Vec<f64>,
    pub last_price_updates: Vec<String>,
    pub notes: Vec<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row; the total price column is derived, never supplied
    pub fn push(&mut self, row: PanelRow) {
        self.types.push(row.kind);
        self.brands.push(row.brand);
        self.order_numbers.push(row.order_number);
        self.specifications.push(row.specification);
        self.quantities.push(row.quantity);
        self.prices.push(row.price);
        self.total_prices.push(row.quantity * row.price);
        self.last_price_updates.push(row.last_price_update);
        self.notes.push(row.note);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Sum of the total-price column (the presentation Total row)
    pub fn total(&self) -> f64 {
        self.total_prices.iter().sum()
    }

    /// Borrow one row for rendering
    pub fn row(&self, i: usize) -> PanelRowRef<'_> {
        PanelRowRef {
            kind: &self.types[i],
            brand: &self.brands[i],
            order_number: &self.order_numbers[i],
            specification: &self.specifications[i],
            quantity: self.quantities[i],
            price: self.prices[i],
            total_price: self.total_prices[i],
            last_price_update: &self.last_price_updates[i],
            note: &self.notes[i],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = PanelRowRef<'_>> {
        (0..self.len()).map(|i| self.row(i))
    }
}

/// Borrowed view of one panel row
#[derive(Debug, Clone, Copy)]
pub struct PanelRowRef<'a> {
    pub kind: &'a str,
    pub brand: &'a str,
    pub order_number: &'a str,
    pub specification: &'a str,
    pub quantity: f64,
    pub price: f64,
    pub total_price: f64,
    pub last_price_update: &'a str,
    pub note: &'a str,
}
