//! Installation/cabling builder
//!
//! Walks every enabled subsystem's motor inventory and sizes one power
//! cable per motor from the ampacity table - a covering search over both
//! the run length and the motor current. Signal wiring is aggregated into
//! a single run of fixed cross-section.

use crate::catalog::{CatalogCategory, CatalogStore, LookupMiss, LookupRequest};
use crate::engine::ampacity;
use crate::engine::builders::{generic, PanelBuild, Subsystem};
use crate::engine::calc;
use crate::engine::motor::Motor;
use crate::engine::selectors::{PanelBuilder, SelectorConfig};
use crate::spec::{InstallationSection, ProjectSpec};

/// Cross-section used for all instrument/control signal runs
const SIGNAL_CABLE_MM2: f64 = 1.5;

/// Collect the motors of every enabled subsystem, in subsystem order
fn field_motors(spec: &ProjectSpec) -> Vec<Motor> {
    let voltage = spec.project_info.l_voltage;
    let mut motors = Vec::new();

    if let Some(section) = spec.bagfilter.as_ref().filter(|s| s.status) {
        motors.extend(generic::collect_motors(&section.motors, voltage));
    }
    for section in [
        spec.fan_damper.as_ref(),
        spec.transport.as_ref(),
        spec.fresh_air.as_ref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| s.status)
    {
        motors.extend(generic::collect_motors(&section.motors, voltage));
    }
    if let Some(section) = spec.hopper_heater.as_ref().filter(|s| s.status) {
        for (name, heater) in &section.heaters {
            if heater.qty > 0 {
                motors.push(Motor::heater(
                    name.replace('_', " "),
                    heater.power,
                    heater.qty,
                    voltage,
                ));
            }
        }
    }
    if let Some(section) = spec.vibration.as_ref().filter(|s| s.status) {
        motors.extend(generic::collect_motors(&section.motors, voltage));
    }

    motors
}

pub(crate) fn build(
    section: &InstallationSection,
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

    let motors = field_motors(spec);
    let route = section.route_length_m;
    let mut signal_length = 0.0;

    for motor in &motors {
        signal_length += route * motor.bundle.signal_cable_factor * motor.qty as f64;

        let length = route * motor.bundle.power_cable_factor;
        let meters = calc::round2(length * motor.qty as f64);
        if meters == 0.0 || motor.current == 0.0 {
            continue;
        }
        let note = format!(
            "{} ×{}, {}m run @ {}A",
            motor.usage,
            motor.qty,
            calc::round2(length),
            motor.current
        );

        match ampacity::select_cable_size(length, motor.current) {
            Some(size) => {
                let request = LookupRequest::for_cable(size);
                match catalog.find(CatalogCategory::WireCable, &request) {
                    Ok(found) => builder.push_found("Power cable", meters, &found, note),
                    Err(miss) => builder.push_missing("Power cable", meters, &miss, &note),
                }
            }
            None => {
                let miss = LookupMiss {
                    category: CatalogCategory::WireCable,
                    detail: format!(
                        "no conductor rated for {}m at {}A",
                        calc::round2(length),
                        motor.current
                    ),
                };
                builder.push_missing("Power cable", meters, &miss, &note);
            }
        }
    }

    let signal_meters = calc::round2(signal_length);
    if signal_meters > 0.0 {
        let request = LookupRequest::for_cable(SIGNAL_CABLE_MM2);
        let note = format!("{} field devices", motors.len());
        match catalog.find(CatalogCategory::WireCable, &request) {
            Ok(found) => builder.push_found("Signal cable", signal_meters, &found, note),
            Err(miss) => builder.push_missing("Signal cable", signal_meters, &miss, &note),
        }
    }

    let (panel, warnings) = builder.finish();
    PanelBuild {
        subsystem: Subsystem::Installation,
        panel,
        warnings,
    }
}
