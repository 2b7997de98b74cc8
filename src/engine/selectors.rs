//! Component selectors and the shared panel accumulation logic
//!
//! `PanelBuilder` holds the motor/instrument inventory for one subsystem
//! and turns it into priced BOM rows. Every selector follows the same
//! caller pattern: look the request up in the catalog, push the priced row
//! on a hit, push a zero-price placeholder row on a miss. A miss never
//! aborts the build; an incomplete catalog produces visibly flagged rows
//! for manual follow-up instead.

use crate::catalog::{
    CatalogCategory, CatalogStore, DriveKind, LookupMiss, LookupRequest, PricedMatch,
};
use crate::engine::calc;
use crate::engine::instrument::InstrumentRequirement;
use crate::engine::motor::{Motor, StartType};
use crate::engine::panel::{Panel, PanelRow};

/// Per-call-site selector parameters
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    /// Multiplier applied to motor current before catalog sizing
    pub safety_margin: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            safety_margin: 1.25,
        }
    }
}

/// Accumulates one subsystem's inventory and BOM rows
pub struct PanelBuilder<'a> {
    catalog: &'a CatalogStore,
    cfg: SelectorConfig,
    approved_brands: Vec<String>,
    plc_front_connectors: bool,
    motors: Vec<Motor>,
    instruments: Vec<InstrumentRequirement>,
    /// DO demand beyond the motors' own (bagfilter valve-driver cards)
    extra_do: u32,
    panel: Panel,
    warnings: Vec<String>,
}

impl<'a> PanelBuilder<'a> {
    pub fn new(
        catalog: &'a CatalogStore,
        cfg: SelectorConfig,
        approved_brands: Vec<String>,
        plc_front_connectors: bool,
    ) -> Self {
        Self {
            catalog,
            cfg,
            approved_brands,
            plc_front_connectors,
            motors: Vec::new(),
            instruments: Vec::new(),
            extra_do: 0,
            panel: Panel::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_motor(&mut self, motor: Motor) {
        self.motors.push(motor);
    }

    pub fn add_instruments(&mut self, instruments: Vec<InstrumentRequirement>) {
        self.instruments.extend(instruments);
    }

    pub fn add_extra_do(&mut self, channels: u32) {
        self.extra_do += channels;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn motors(&self) -> &[Motor] {
        &self.motors
    }

    /// Hand back the finished panel and any warnings collected on the way
    pub fn finish(self) -> (Panel, Vec<String>) {
        (self.panel, self.warnings)
    }

    /// Push a priced row for a successful lookup
    pub fn push_found(&mut self, kind: &str, qty: f64, found: &PricedMatch, note: String) {
        self.panel.push(PanelRow {
            kind: kind.to_string(),
            brand: found.brand.clone(),
            order_number: found.order_number.clone(),
            specification: found.specification.clone(),
            quantity: qty,
            price: found.price,
            last_price_update: found.effective_date.clone(),
            note,
        });
    }

    /// Push a zero-price placeholder row for a miss. The requested quantity
    /// is preserved so the gap stays visible in roll-ups.
    pub fn push_missing(&mut self, kind: &str, qty: f64, miss: &LookupMiss, note: &str) {
        let note = if note.is_empty() {
            format!("❌ {miss}")
        } else {
            format!("❌ {miss}; {note}")
        };
        self.panel.push(PanelRow {
            kind: kind.to_string(),
            brand: String::new(),
            order_number: String::new(),
            specification: String::new(),
            quantity: qty,
            price: 0.0,
            last_price_update: String::new(),
            note,
        });
    }

    fn lookup_and_push(
        &mut self,
        category: CatalogCategory,
        request: &LookupRequest,
        kind: &str,
        qty: f64,
        note: String,
    ) {
        match self.catalog.find(category, request) {
            Ok(found) => self.push_found(kind, qty, &found, note),
            Err(miss) => self.push_missing(kind, qty, &miss, &note),
        }
    }

    /// Run the protective-device selectors for every motor, in motor order:
    /// contactor, MPCB, MCCB, bimetal, then drive. Motors with zero
    /// quantity or zero current emit nothing.
    pub fn select_protective_devices(&mut self) {
        for i in 0..self.motors.len() {
            let motor = self.motors[i].clone();
            if motor.qty == 0 || motor.current == 0.0 {
                continue;
            }

            let required = motor.current * self.cfg.safety_margin;
            let request = LookupRequest::for_current(required, &self.approved_brands);
            let note = format!("{} ×{}", motor.usage, motor.qty);

            let devices: [(CatalogCategory, &str, u32); 4] = [
                (CatalogCategory::Contactor, "Contactor", motor.bundle.contactor),
                (CatalogCategory::Mpcb, "MPCB", motor.bundle.mpcb),
                (CatalogCategory::Mccb, "MCCB", motor.bundle.mccb),
                (CatalogCategory::Bimetal, "Bimetal relay", motor.bundle.bimetal),
            ];
            for (category, kind, per_unit) in devices {
                if per_unit == 0 {
                    continue;
                }
                let qty = (motor.qty * per_unit) as f64;
                self.lookup_and_push(category, &request, kind, qty, note.clone());
            }

            self.select_drive(&motor);
        }
    }

    /// Drives are sized by power, not current, and honor the motor's own
    /// brand preference over the project allowlist.
    fn select_drive(&mut self, motor: &Motor) {
        if motor.bundle.drive == 0 {
            return;
        }
        let kind = match motor.start_type {
            StartType::Vfd => DriveKind::Vfd,
            StartType::SoftStarter => DriveKind::SoftStarter,
            _ => return,
        };
        let brands = match &motor.brand {
            Some(brand) => vec![brand.clone()],
            None => self.approved_brands.clone(),
        };
        let request = LookupRequest::for_drive(kind, motor.power_kw(), &brands);
        let qty = (motor.qty * motor.bundle.drive) as f64;
        let label = kind.to_string();
        let note = format!("{} ×{}", motor.usage, motor.qty);
        self.lookup_and_push(CatalogCategory::Drive, &request, &label, qty, note);
    }

    /// Aggregate PLC channel demand (motors plus instruments), emit one
    /// module row per non-zero channel type, then the front-connector row.
    pub fn select_plc_io(&mut self) {
        let mut di: u32 = self.channel_demand(|b| b.di_channels);
        let mut ai: u32 = self.channel_demand(|b| b.ai_channels);
        let do_: u32 = self.channel_demand(|b| b.do_channels) + self.extra_do;
        let ao: u32 = self.channel_demand(|b| b.ao_channels);

        for instrument in &self.instruments {
            let profile = instrument.kind.profile();
            di += profile.di_pins * instrument.qty;
            ai += profile.ai_pins * instrument.qty;
        }

        let mut total_cards = 0;
        let channel_types: [(&str, &str, u32); 4] = [
            ("PLC DI module", "16-channel DI module", di),
            ("PLC DO module", "16-channel DO module", do_),
            ("PLC AI module", "16-channel AI module", ai),
            ("PLC AO module", "16-channel AO module", ao),
        ];
        for (kind, spec_text, channels) in channel_types {
            if channels == 0 {
                continue;
            }
            let cards = calc::io_card_count(channels);
            total_cards += cards;
            let request = LookupRequest::for_specification(spec_text);
            let note = format!("{channels} channels");
            self.lookup_and_push(CatalogCategory::General, &request, kind, cards as f64, note);
        }

        if self.plc_front_connectors && total_cards > 0 {
            let request = LookupRequest::for_specification("Front connector 20-pin");
            self.lookup_and_push(
                CatalogCategory::General,
                &request,
                "Front connector",
                total_cards as f64,
                format!("{total_cards} I/O cards"),
            );
        }
    }

    /// Channel demand contributed by the motors alone
    fn channel_demand(&self, per_unit: impl Fn(&crate::engine::motor::AccessoryBundle) -> u32) -> u32 {
        self.motors.iter().map(|m| per_unit(&m.bundle) * m.qty).sum()
    }

    /// Aggregate one accessory kind across all motors in the panel:
    /// one lookup, one row, per-motor contributions in the note.
    pub fn process_item(
        &mut self,
        kind: &str,
        spec_text: &str,
        per_unit: impl Fn(&crate::engine::motor::AccessoryBundle) -> f64,
    ) {
        let mut total = 0.0;
        let mut notes = Vec::new();
        for motor in &self.motors {
            let contribution = per_unit(&motor.bundle) * motor.qty as f64;
            if contribution > 0.0 {
                total += contribution;
                notes.push(format!("{} ×{}", motor.usage, calc::round2(contribution)));
            }
        }
        if total == 0.0 {
            return;
        }
        let request = LookupRequest::for_specification(spec_text);
        let note = notes.join("; ");
        self.lookup_and_push(
            CatalogCategory::General,
            &request,
            kind,
            calc::round2(total),
            note,
        );
    }

    /// Run the general accessory aggregator over every accessory kind
    pub fn select_accessories(&mut self) {
        self.process_item("Terminal 4mm²", "Terminal 4mm²", |b| b.terminal_4mm as f64);
        self.process_item("Terminal 6mm²", "Terminal 6mm²", |b| b.terminal_6mm as f64);
        self.process_item("Relay 1NO+1NC", "Relay 1NO+1NC 24VDC", |b| {
            b.relay_1no1nc as f64
        });
        self.process_item("Relay 2NO+2NC", "Relay 2NO+2NC 24VDC", |b| {
            b.relay_2no2nc as f64
        });
        self.process_item("Push button", "Push button 22mm", |b| b.button as f64);
        self.process_item("Selector switch", "Selector switch 22mm", |b| {
            b.selector_switch as f64
        });
        self.process_item("Auxiliary contact", "Auxiliary contact block", |b| {
            b.aux_contact as f64
        });
        self.process_item("Signal lamp", "Signal lamp 22mm", |b| b.signal_lamp as f64);
        self.process_item("Duct cover", "Slotted duct 40x60mm", |b| b.duct_cover_m);
        self.process_item("Mounting rail", "DIN rail 35mm", |b| b.rail_m);
    }

    /// Instrument rows plus their companion manifold and calibration rows
    pub fn select_instruments(&mut self) {
        for i in 0..self.instruments.len() {
            let instrument = self.instruments[i].clone();
            if instrument.qty == 0 {
                continue;
            }
            let profile = instrument.kind.profile();
            let label = instrument.kind.label();
            let qty = instrument.qty as f64;

            let brands = match &instrument.brand {
                Some(brand) => vec![brand.clone()],
                None => Vec::new(),
            };
            let request = LookupRequest::for_instrument(instrument.kind, &brands);
            self.lookup_and_push(
                CatalogCategory::Instrument,
                &request,
                label,
                qty,
                String::new(),
            );

            if let Some(ways) = profile.manifold {
                let request = LookupRequest::for_specification(ways.label());
                self.lookup_and_push(
                    CatalogCategory::General,
                    &request,
                    ways.label(),
                    qty,
                    format!("for {label}"),
                );
            }

            if profile.needs_calibration {
                let request = LookupRequest::for_specification("Transmitter calibration");
                self.lookup_and_push(
                    CatalogCategory::General,
                    &request,
                    "Calibration",
                    qty,
                    format!("for {label}"),
                );
            }
        }
    }

    /// Choose the enclosure tier from the total motor count and query for
    /// a panel with exactly those dimensions.
    pub fn select_enclosure(&mut self) {
        let motor_count: u32 = self.motors.iter().map(|m| m.qty).sum();
        if motor_count == 0 {
            return;
        }
        let (width, height, depth, qty) = enclosure_tier(motor_count);
        let request = LookupRequest::for_enclosure(width, height, depth);
        let note = format!("{motor_count} motors");
        self.lookup_and_push(
            CatalogCategory::ElectricalPanel,
            &request,
            "Enclosure",
            qty as f64,
            note,
        );
    }
}

/// Enclosure size steps keyed by total motor count
fn enclosure_tier(motor_count: u32) -> (u32, u32, u32, u32) {
    if motor_count < 3 {
        (600, 800, 250, 1)
    } else if motor_count < 4 {
        (800, 1000, 300, 1)
    } else if motor_count < 8 {
        (800, 2000, 600, 1)
    } else {
        (1000, 2200, 600, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, CategorySpec};
    use crate::engine::instrument::InstrumentKind;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn priced(entry: CatalogEntry, price: f64) -> CatalogEntry {
        entry.with_price(price, "EUR", "Alpha", date(2026, 1, 1))
    }

    fn full_catalog() -> CatalogStore {
        let mut entries = Vec::new();
        for rated in [16.0, 25.0, 40.0, 63.0, 100.0] {
            entries.push(priced(
                CatalogEntry::new(
                    "Siemens",
                    format!("CNT-{rated}"),
                    CategorySpec::Contactor {
                        rated_current: rated,
                    },
                ),
                rated,
            ));
            entries.push(priced(
                CatalogEntry::new(
                    "Siemens",
                    format!("MCCB-{rated}"),
                    CategorySpec::Mccb {
                        rated_current: rated,
                        breaking_capacity_ka: 36.0,
                    },
                ),
                rated * 2.0,
            ));
        }
        for (min, max) in [(4.0, 6.3), (10.0, 16.0), (17.0, 22.0), (30.0, 40.0)] {
            entries.push(priced(
                CatalogEntry::new(
                    "Siemens",
                    format!("MPCB-{max}"),
                    CategorySpec::Mpcb {
                        min_current: min,
                        max_current: max,
                        breaking_capacity_ka: 55.0,
                        trip_class: "10".to_string(),
                    },
                ),
                60.0,
            ));
            entries.push(priced(
                CatalogEntry::new(
                    "Siemens",
                    format!("BIM-{max}"),
                    CategorySpec::Bimetal {
                        min_current: min,
                        max_current: max,
                    },
                ),
                25.0,
            ));
        }
        for kw in [7.5, 15.0, 22.0, 30.0] {
            entries.push(priced(
                CatalogEntry::new(
                    "Siemens",
                    format!("VFD-{kw}"),
                    CategorySpec::Drive {
                        kind: DriveKind::Vfd,
                        power_kw: kw,
                    },
                ),
                kw * 100.0,
            ));
        }
        for text in [
            "16-channel DI module",
            "16-channel DO module",
            "16-channel AI module",
            "16-channel AO module",
            "Front connector 20-pin",
            "Terminal 4mm²",
            "Terminal 6mm²",
            "Relay 1NO+1NC 24VDC",
            "Push button 22mm",
            "Selector switch 22mm",
            "Auxiliary contact block",
            "Signal lamp 22mm",
            "Slotted duct 40x60mm",
            "DIN rail 35mm",
            "2-way manifold",
            "3-way manifold",
            "Transmitter calibration",
        ] {
            entries.push(priced(
                CatalogEntry::new("Generic", text, CategorySpec::General {
                    specification: text.to_string(),
                }),
                10.0,
            ));
        }
        entries.push(priced(
            CatalogEntry::new("Endress", "PMD75", CategorySpec::Instrument {
                kind: InstrumentKind::DeltaPressureTransmitter,
            }),
            700.0,
        ));
        entries.push(priced(
            CatalogEntry::new("Rittal", "AE-600", CategorySpec::ElectricalPanel {
                width_mm: 600,
                height_mm: 800,
                depth_mm: 250,
            }),
            400.0,
        ));
        CatalogStore::from_entries(entries)
    }

    fn builder(catalog: &CatalogStore) -> PanelBuilder<'_> {
        PanelBuilder::new(catalog, SelectorConfig::default(), Vec::new(), true)
    }

    #[test]
    fn test_zero_qty_motor_emits_nothing() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("spare", 4000.0, 0, StartType::Direct, None, 400.0));
        b.select_protective_devices();
        let (panel, _) = b.finish();
        assert!(panel.is_empty());
    }

    #[test]
    fn test_zero_current_motor_emits_nothing() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("ghost", 0.0, 2, StartType::Direct, None, 400.0));
        b.select_protective_devices();
        let (panel, _) = b.finish();
        assert!(panel.is_empty());
    }

    #[test]
    fn test_safety_margin_applied_to_protective_queries() {
        // 7.5 kW motor at 400 V → 13.70 A; ×1.25 → 17.12 A.
        // The 16 A contactor is below the margin even though it covers the
        // raw current, so the 25 A unit must win.
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("screw", 7_500.0, 1, StartType::Direct, None, 400.0));
        b.select_protective_devices();
        let (panel, _) = b.finish();

        let idx = panel.types.iter().position(|t| t == "Contactor").unwrap();
        assert_eq!(panel.order_numbers[idx], "CNT-25");
    }

    #[test]
    fn test_direct_motor_emits_contactor_and_mpcb() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("screw", 7_500.0, 2, StartType::Direct, None, 400.0));
        b.select_protective_devices();
        let (panel, _) = b.finish();

        assert_eq!(panel.types, vec!["Contactor", "MPCB"]);
        // per-unit 1 × instance qty 2
        assert_eq!(panel.quantities, vec![2.0, 2.0]);
        for row in panel.rows() {
            assert_eq!(row.total_price, row.quantity * row.price);
        }
    }

    #[test]
    fn test_missing_mccb_yields_flagged_placeholder_row() {
        // Catalog without any MCCB covering 40.17 × 1.25 = 50.21 A
        let catalog = CatalogStore::from_entries(vec![CatalogEntry::new(
            "Siemens",
            "MCCB-40",
            CategorySpec::Mccb {
                rated_current: 40.0,
                breaking_capacity_ka: 36.0,
            },
        )
        .with_price(80.0, "EUR", "Alpha", date(2026, 1, 1))]);

        let mut b = PanelBuilder::new(
            &catalog,
            SelectorConfig::default(),
            vec!["Siemens".to_string()],
            false,
        );
        b.add_motor(Motor::new("main fan", 22_000.0, 2, StartType::Vfd, None, 400.0));
        b.select_protective_devices();
        let (panel, _) = b.finish();

        let idx = panel.types.iter().position(|t| t == "MCCB").unwrap();
        assert_eq!(panel.brands[idx], "");
        assert_eq!(panel.prices[idx], 0.0);
        assert_eq!(panel.quantities[idx], 2.0); // requested count, not zero
        assert!(panel.notes[idx].contains("❌"));
        assert!(panel.notes[idx].contains("MCCB not found"));
    }

    #[test]
    fn test_plc_io_card_counting() {
        // 20 DO channels → 2 DO cards; no other demand → connector row = 2
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_extra_do(20);
        b.select_plc_io();
        let (panel, _) = b.finish();

        assert_eq!(panel.types, vec!["PLC DO module", "Front connector"]);
        assert_eq!(panel.quantities, vec![2.0, 2.0]);
    }

    #[test]
    fn test_plc_connector_suppressed_for_compact_plc() {
        let catalog = full_catalog();
        let mut b = PanelBuilder::new(&catalog, SelectorConfig::default(), Vec::new(), false);
        b.add_extra_do(20);
        b.select_plc_io();
        let (panel, _) = b.finish();
        assert_eq!(panel.types, vec!["PLC DO module"]);
    }

    #[test]
    fn test_accessory_aggregation_single_row() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("screw 1", 4_000.0, 2, StartType::Direct, None, 400.0));
        b.add_motor(Motor::new("screw 2", 4_000.0, 1, StartType::Direct, None, 400.0));
        b.process_item("Terminal 4mm²", "Terminal 4mm²", |b| b.terminal_4mm as f64);
        let (panel, _) = b.finish();

        // 6 per unit × (2 + 1) instances = 18, one row
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.quantities[0], 18.0);
        assert!(panel.notes[0].contains("screw 1 ×12"));
        assert!(panel.notes[0].contains("screw 2 ×6"));
    }

    #[test]
    fn test_instrument_brings_manifold_and_calibration() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_instruments(vec![InstrumentRequirement {
            kind: InstrumentKind::DeltaPressureTransmitter,
            qty: 2,
            brand: None,
        }]);
        b.select_instruments();
        let (panel, _) = b.finish();

        assert_eq!(
            panel.types,
            vec!["Delta pressure transmitter", "3-way manifold", "Calibration"]
        );
        assert_eq!(panel.quantities, vec![2.0, 2.0, 2.0]);
        assert!(panel.notes[1].contains("Delta pressure transmitter"));
    }

    #[test]
    fn test_enclosure_tiers() {
        assert_eq!(enclosure_tier(1), (600, 800, 250, 1));
        assert_eq!(enclosure_tier(2), (600, 800, 250, 1));
        assert_eq!(enclosure_tier(3), (800, 1000, 300, 1));
        assert_eq!(enclosure_tier(4), (800, 2000, 600, 1));
        assert_eq!(enclosure_tier(7), (800, 2000, 600, 1));
        assert_eq!(enclosure_tier(8), (1000, 2200, 600, 2));
        assert_eq!(enclosure_tier(12), (1000, 2200, 600, 2));
    }

    #[test]
    fn test_enclosure_last_tier_doubles_quantity() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("bank", 4_000.0, 8, StartType::Direct, None, 400.0));
        b.select_enclosure();
        let (panel, _) = b.finish();
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.quantities[0], 2.0);
    }

    #[test]
    fn test_selector_idempotence() {
        let catalog = full_catalog();
        let run = || {
            let mut b = builder(&catalog);
            b.add_motor(Motor::new("main fan", 22_000.0, 1, StartType::Vfd, None, 400.0));
            b.add_instruments(vec![InstrumentRequirement {
                kind: InstrumentKind::DeltaPressureTransmitter,
                qty: 1,
                brand: None,
            }]);
            b.select_protective_devices();
            b.select_plc_io();
            b.select_accessories();
            b.select_instruments();
            b.select_enclosure();
            b.finish().0
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_drive_sized_by_power() {
        let catalog = full_catalog();
        let mut b = builder(&catalog);
        b.add_motor(Motor::new("main fan", 22_000.0, 1, StartType::Vfd, None, 400.0));
        b.select_protective_devices();
        let (panel, _) = b.finish();

        let idx = panel.types.iter().position(|t| t == "VFD").unwrap();
        // smallest drive at or above 22 kW with the freshest price
        assert_eq!(panel.order_numbers[idx], "VFD-22");
    }
}
