//! Generic motor-section pipeline
//!
//! Fan/damper, transport, fresh air and vibration panels differ only in
//! which motors and instruments their spec sections carry; the build
//! pipeline is identical. One parameterized function serves all four.

use std::collections::BTreeMap;

use crate::catalog::CatalogStore;
use crate::engine::builders::{PanelBuild, Subsystem};
use crate::engine::motor::Motor;
use crate::engine::selectors::{PanelBuilder, SelectorConfig};
use crate::spec::{MotorDef, MotorSection, ProjectSpec};

/// Construct motors from a spec section's motor map, skipping zero-quantity
/// definitions. Map order is the panel's motor order.
pub(crate) fn collect_motors(motors: &BTreeMap<String, MotorDef>, voltage: f64) -> Vec<Motor> {
    motors
        .iter()
        .filter(|(_, def)| def.qty > 0)
        .map(|(name, def)| {
            Motor::new(
                name.replace('_', " "),
                def.power,
                def.qty,
                def.start_type,
                def.brand.clone(),
                voltage,
            )
        })
        .collect()
}

/// Run the standard pipeline over one motor section
pub(crate) fn build(
    subsystem: Subsystem,
    section: &MotorSection,
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

    for motor in collect_motors(&section.motors, spec.project_info.l_voltage) {
        builder.add_motor(motor);
    }

    let (instruments, warnings) = ProjectSpec::resolve_instruments(&section.instruments);
    for warning in warnings {
        builder.warn(warning);
    }
    builder.add_instruments(instruments);

    builder.select_protective_devices();
    builder.select_plc_io();
    builder.select_accessories();
    builder.select_instruments();
    builder.select_enclosure();

    let (panel, warnings) = builder.finish();
    PanelBuild {
        subsystem,
        panel,
        warnings,
    }
}
