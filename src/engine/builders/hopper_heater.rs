//! Hopper heater panel builder
//!
//! Heaters are resistive loads: current is drawn at unity power factor,
//! switching is a plain contactor behind an MCCB, and there is no MPCB,
//! bimetal or drive. The rest of the pipeline is the standard one.

use crate::catalog::CatalogStore;
use crate::engine::builders::{PanelBuild, Subsystem};
use crate::engine::motor::Motor;
use crate::engine::selectors::{PanelBuilder, SelectorConfig};
use crate::spec::{HeaterSection, ProjectSpec};

pub(crate) fn build(
    section: &HeaterSection,
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

    for (name, heater) in &section.heaters {
        if heater.qty == 0 {
            continue;
        }
        builder.add_motor(Motor::heater(
            name.replace('_', " "),
            heater.power,
            heater.qty,
            spec.project_info.l_voltage,
        ));
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
        subsystem: Subsystem::HopperHeater,
        panel,
        warnings,
    }
}
