//! Bagfilter panel builder
//!
//! On top of the standard motor pipeline, the bagfilter panel carries the
//! pulse-valve hardware: solenoid valves, multiplexed valve-driver cards,
//! and the digital outputs needed to drive and address those cards. The
//! valve count is parsed out of the filter vendor's order string, which
//! encodes valve/bag/airtank counts in vendor-specific dialects.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{CatalogCategory, CatalogStore, LookupRequest};
use crate::engine::builders::{generic, PanelBuild, Subsystem};
use crate::engine::calc;
use crate::engine::selectors::{PanelBuilder, SelectorConfig};
use crate::spec::{BagfilterSection, ProjectSpec};

/// Digital outputs consumed per valve-driver card, addressing excluded
const DO_PER_VALVE_CARD: u32 = 5;

// Griin/China order strings look like "8.96x5.(2.7m).10":
// valves.bags x rows.(bag length m).airtank - the leading number is the
// valve count.
static GRIIN_ORDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)x(\d+)\.\((\d+(?:\.\d+)?)m\)\.(\d+)$").unwrap()
});

// BETH order strings come in two shapes: "6.78x2.3.10" (valve count =
// first number × fourth number) and the shorter "6.78x3.10" (valve count =
// first number × the number after the x).
static BETH_ORDER_LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)x(\d+)\.(\d+)\.(\d+)$").unwrap());
static BETH_ORDER_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)x(\d+)\.(\d+)$").unwrap());

/// Parse the pulse-valve count out of a vendor order string.
///
/// Unrecognized dialects or malformed strings yield `None`; the builder
/// treats that as zero valves and surfaces a warning instead of guessing.
pub fn parse_valve_count(order_type: &str, order_code: &str) -> Option<u32> {
    let code = order_code.trim();
    match order_type {
        "Griin/China" => GRIIN_ORDER
            .captures(code)
            .and_then(|c| c[1].parse::<u32>().ok()),
        "BETH" => {
            if let Some(c) = BETH_ORDER_LONG.captures(code) {
                let n1 = c[1].parse::<u32>().ok()?;
                let n4 = c[4].parse::<u32>().ok()?;
                Some(n1 * n4)
            } else if let Some(c) = BETH_ORDER_SHORT.captures(code) {
                let n1 = c[1].parse::<u32>().ok()?;
                let n3 = c[3].parse::<u32>().ok()?;
                Some(n1 * n3)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Build the bagfilter panel
pub(crate) fn build(
    section: &BagfilterSection,
    spec: &ProjectSpec,
    catalog: &CatalogStore,
    cfg: SelectorConfig,
) -> PanelBuild {
    let mut builder = PanelBuilder::new(
        catalog,
        cfg,
        spec.project_info.proj_avl.clone(),
        spec.project_info.plc_uses_front_connectors(),
    );

    for motor in generic::collect_motors(&section.motors, spec.project_info.l_voltage) {
        builder.add_motor(motor);
    }

    let (instruments, warnings) = ProjectSpec::resolve_instruments(&section.instruments);
    for warning in warnings {
        builder.warn(warning);
    }
    builder.add_instruments(instruments);

    let valves = match parse_valve_count(&section.order_type, &section.order_code) {
        Some(valves) => valves,
        None => {
            if !section.order_code.is_empty() || !section.order_type.is_empty() {
                builder.warn(format!(
                    "bagfilter order '{}' ({}) did not parse; assuming 0 valves",
                    section.order_code, section.order_type
                ));
            }
            0
        }
    };

    builder.select_protective_devices();

    if valves > 0 {
        let cards = calc::io_card_count(valves);
        builder.add_extra_do(DO_PER_VALVE_CARD * cards + calc::addressing_overhead_do(cards));

        let note = format!("order {}", section.order_code);
        match catalog.find(
            CatalogCategory::General,
            &LookupRequest::for_specification("Solenoid valve 24VDC"),
        ) {
            Ok(found) => builder.push_found("Solenoid valve", valves as f64, &found, note.clone()),
            Err(miss) => builder.push_missing("Solenoid valve", valves as f64, &miss, &note),
        }
        match catalog.find(
            CatalogCategory::General,
            &LookupRequest::for_specification("Valve driver card"),
        ) {
            Ok(found) => {
                builder.push_found("Valve driver card", cards as f64, &found, note.clone())
            }
            Err(miss) => builder.push_missing("Valve driver card", cards as f64, &miss, &note),
        }
    }

    builder.select_plc_io();
    builder.select_accessories();
    builder.select_instruments();
    builder.select_enclosure();

    let (panel, warnings) = builder.finish();
    PanelBuild {
        subsystem: Subsystem::Bagfilter,
        panel,
        warnings,
    }
}
