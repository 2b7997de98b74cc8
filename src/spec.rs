//! Project specification - the nested configuration a panel build reads
//!
//! One YAML file describes the site electrical parameters, the approved
//! vendor list, and per-subsystem motor and instrument definitions. The
//! engine only ever reads this structure; maps are BTreeMaps so repeated
//! builds walk motors in a stable order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::engine::instrument::{InstrumentKind, InstrumentRequirement};
use crate::engine::motor::StartType;

/// Site-wide electrical parameters and procurement constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,

    /// Low-voltage bus (V), feeds all motor calculations
    pub l_voltage: f64,

    /// Medium-voltage bus (V), informational
    #[serde(default)]
    pub m_voltage: f64,

    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// PLC family in use (decides front-connector allocation)
    #[serde(default)]
    pub plc_series: String,

    /// Approved vendor list for protective devices and drives
    #[serde(default)]
    pub proj_avl: Vec<String>,
}

fn default_frequency() -> f64 {
    50.0
}

impl ProjectInfo {
    /// Whether the configured PLC family takes 20-pin front connectors.
    /// Classic rack PLCs (S7-300/400) do; compact families terminate
    /// directly on the module.
    pub fn plc_uses_front_connectors(&self) -> bool {
        let series = self.plc_series.to_uppercase();
        series.starts_with("S7-300") || series.starts_with("S7-400")
    }
}

/// One motor definition inside a subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorDef {
    /// Rated power (W)
    pub power: f64,
    pub qty: u32,
    pub start_type: StartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// One instrument definition inside a subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentDef {
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// A subsystem holding motors and instruments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotorSection {
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub motors: BTreeMap<String, MotorDef>,
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentDef>,
}

fn default_status() -> bool {
    true
}

/// Bagfilter subsystem: a motor section plus the vendor order code the
/// valve count is parsed from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BagfilterSection {
    #[serde(default = "default_status")]
    pub status: bool,
    /// Order string vendor dialect ("Griin/China" or "BETH")
    #[serde(default)]
    pub order_type: String,
    /// Vendor order string encoding valve/bag/airtank counts
    #[serde(default)]
    pub order_code: String,
    #[serde(default)]
    pub motors: BTreeMap<String, MotorDef>,
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentDef>,
}

/// One resistive heater definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaterDef {
    /// Rated power (W)
    pub power: f64,
    pub qty: u32,
}

/// Hopper heater subsystem: resistive loads only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaterSection {
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub heaters: BTreeMap<String, HeaterDef>,
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentDef>,
}

/// Installation/cabling subsystem: field cable runs for every motor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallationSection {
    #[serde(default = "default_status")]
    pub status: bool,
    /// Base cable route length (m) from the panel to the field
    #[serde(default)]
    pub route_length_m: f64,
}

/// The complete project specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub project_info: ProjectInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bagfilter: Option<BagfilterSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_damper: Option<MotorSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<MotorSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fresh_air: Option<MotorSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hopper_heater: Option<HeaterSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<MotorSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation: Option<InstallationSection>,
}

impl ProjectSpec {
    /// Load and parse a specification file
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path).map_err(|e| SpecError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yml::from_str(&content).map_err(|e| SpecError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Validate contract-level requirements, returning human-readable
    /// issues. An empty list means the spec is buildable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.project_info.l_voltage <= 0.0 {
            issues.push("project_info.l_voltage must be positive".to_string());
        }

        let motor_sections: [(&str, Option<&MotorSection>); 4] = [
            ("fan_damper", self.fan_damper.as_ref()),
            ("transport", self.transport.as_ref()),
            ("fresh_air", self.fresh_air.as_ref()),
            ("vibration", self.vibration.as_ref()),
        ];
        for (name, section) in motor_sections {
            if let Some(section) = section {
                check_motors(name, &section.motors, &mut issues);
                check_instruments(name, &section.instruments, &mut issues);
            }
        }

        if let Some(bagfilter) = &self.bagfilter {
            check_motors("bagfilter", &bagfilter.motors, &mut issues);
            check_instruments("bagfilter", &bagfilter.instruments, &mut issues);
            if bagfilter.status
                && !bagfilter.order_type.is_empty()
                && !matches!(bagfilter.order_type.as_str(), "Griin/China" | "BETH")
            {
                issues.push(format!(
                    "bagfilter.order_type '{}' is not a known vendor dialect",
                    bagfilter.order_type
                ));
            }
        }

        if let Some(heaters) = &self.hopper_heater {
            for (name, heater) in &heaters.heaters {
                if heater.qty > 0 && heater.power <= 0.0 {
                    issues.push(format!("hopper_heater.{name}: power must be positive"));
                }
            }
            check_instruments("hopper_heater", &heaters.instruments, &mut issues);
        }

        issues
    }

    /// Resolve a subsystem's instrument map into canonical requirements.
    /// Unknown names are returned as warnings, not errors.
    pub fn resolve_instruments(
        instruments: &BTreeMap<String, InstrumentDef>,
    ) -> (Vec<InstrumentRequirement>, Vec<String>) {
        let mut requirements = Vec::new();
        let mut warnings = Vec::new();

        for (name, def) in instruments {
            if def.qty == 0 {
                continue;
            }
            match InstrumentKind::canonicalize(name) {
                Some(kind) => requirements.push(InstrumentRequirement {
                    kind,
                    qty: def.qty,
                    brand: def.brand.clone(),
                }),
                None => warnings.push(format!("unknown instrument '{name}' skipped")),
            }
        }

        (requirements, warnings)
    }
}

fn check_motors(section: &str, motors: &BTreeMap<String, MotorDef>, issues: &mut Vec<String>) {
    for (name, motor) in motors {
        if motor.qty > 0 && motor.power <= 0.0 {
            issues.push(format!("{section}.{name}: power must be positive"));
        }
    }
}

fn check_instruments(
    section: &str,
    instruments: &BTreeMap<String, InstrumentDef>,
    issues: &mut Vec<String>,
) {
    for (name, def) in instruments {
        if def.qty > 0 && InstrumentKind::canonicalize(name).is_none() {
            issues.push(format!("{section}.{name}: unknown instrument kind"));
        }
    }
}

/// Errors raised when a specification cannot be read at all
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("cannot read spec file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("cannot parse spec file {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Starter specification written by `dpt init`
pub const SPEC_TEMPLATE: &str = r#"# DPT project specification
project_info:
  name: New dust collection project
  l_voltage: 400
  m_voltage: 6000
  frequency: 50
  plc_series: S7-300
  proj_avl: [Siemens, Schneider]

bagfilter:
  status: true
  order_type: Griin/China
  order_code: 8.96x5.(2.7m).10
  motors:
    screw_conveyor:
      power: 4000
      qty: 1
      start_type: direct
    rotary_valve:
      power: 2200
      qty: 1
      start_type: direct
  instruments:
    delta_pressure_transmitter:
      qty: 1

fan_damper:
  status: true
  motors:
    main_fan:
      power: 22000
      qty: 1
      start_type: vfd
    outlet_damper:
      power: 750
      qty: 1
      start_type: motorized_gradual
  instruments:
    bearing_temperature_transmitter:
      qty: 2
    bearing_vibration_transmitter:
      qty: 2

transport:
  status: false

fresh_air:
  status: false

hopper_heater:
  status: false

vibration:
  status: false

installation:
  status: true
  route_length_m: 60
"#;
