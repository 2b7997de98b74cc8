//! Instrument kinds, alias canonicalization, and the pin/manifold/
//! calibration profile table
//!
//! Project specifications name instruments loosely ("pt100",
//! "bearing_vibration_transmitter"); one canonicalization function maps
//! every alias onto a closed set of kinds, and one table answers what each
//! kind costs in PLC pins and drags in as companion items.

use serde::{Deserialize, Serialize};

/// Closed set of field instrument kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    PressureTransmitter,
    DeltaPressureTransmitter,
    PressureSwitch,
    DeltaPressureSwitch,
    TemperatureTransmitter,
    VibrationTransmitter,
    LevelSwitch,
    LevelTransmitter,
}

/// Manifold variants required alongside pressure instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifoldWays {
    TwoWay,
    ThreeWay,
}

impl ManifoldWays {
    pub fn label(&self) -> &'static str {
        match self {
            ManifoldWays::TwoWay => "2-way manifold",
            ManifoldWays::ThreeWay => "3-way manifold",
        }
    }
}

/// PLC pin cost and companion requirements for one instrument kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentProfile {
    pub di_pins: u32,
    pub ai_pins: u32,
    pub manifold: Option<ManifoldWays>,
    pub needs_calibration: bool,
}

impl InstrumentKind {
    /// Canonicalize a spec-file instrument name, resolving aliases.
    ///
    /// Returns `None` for names outside the closed set.
    pub fn canonicalize(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace([' ', '-'], "_");
        match name.as_str() {
            "pressure_transmitter" => Some(InstrumentKind::PressureTransmitter),
            "delta_pressure_transmitter" => Some(InstrumentKind::DeltaPressureTransmitter),
            "pressure_switch" => Some(InstrumentKind::PressureSwitch),
            "delta_pressure_switch" => Some(InstrumentKind::DeltaPressureSwitch),
            "temperature_transmitter"
            | "inlet_temperature_transmitter"
            | "outlet_temperature_transmitter"
            | "bearing_temperature_transmitter"
            | "pt100" => Some(InstrumentKind::TemperatureTransmitter),
            "vibration_transmitter" | "bearing_vibration_transmitter" => {
                Some(InstrumentKind::VibrationTransmitter)
            }
            "level_switch" => Some(InstrumentKind::LevelSwitch),
            "level_transmitter" => Some(InstrumentKind::LevelTransmitter),
            _ => None,
        }
    }

    /// Display label for BOM rows and list output
    pub fn label(&self) -> &'static str {
        match self {
            InstrumentKind::PressureTransmitter => "Pressure transmitter",
            InstrumentKind::DeltaPressureTransmitter => "Delta pressure transmitter",
            InstrumentKind::PressureSwitch => "Pressure switch",
            InstrumentKind::DeltaPressureSwitch => "Delta pressure switch",
            InstrumentKind::TemperatureTransmitter => "Temperature transmitter",
            InstrumentKind::VibrationTransmitter => "Vibration transmitter",
            InstrumentKind::LevelSwitch => "Level switch",
            InstrumentKind::LevelTransmitter => "Level transmitter",
        }
    }

    /// Pin cost and companion requirements.
    ///
    /// Delta kinds take 3-way manifolds, plain pressure kinds 2-way;
    /// every transmitter needs a calibration line item. Switches land on
    /// digital inputs, transmitters on analog inputs.
    pub fn profile(&self) -> InstrumentProfile {
        match self {
            InstrumentKind::PressureTransmitter => InstrumentProfile {
                di_pins: 0,
                ai_pins: 1,
                manifold: Some(ManifoldWays::TwoWay),
                needs_calibration: true,
            },
            InstrumentKind::DeltaPressureTransmitter => InstrumentProfile {
                di_pins: 0,
                ai_pins: 1,
                manifold: Some(ManifoldWays::ThreeWay),
                needs_calibration: true,
            },
            InstrumentKind::PressureSwitch => InstrumentProfile {
                di_pins: 1,
                ai_pins: 0,
                manifold: Some(ManifoldWays::TwoWay),
                needs_calibration: false,
            },
            InstrumentKind::DeltaPressureSwitch => InstrumentProfile {
                di_pins: 1,
                ai_pins: 0,
                manifold: Some(ManifoldWays::ThreeWay),
                needs_calibration: false,
            },
            InstrumentKind::TemperatureTransmitter => InstrumentProfile {
                di_pins: 0,
                ai_pins: 1,
                manifold: None,
                needs_calibration: true,
            },
            InstrumentKind::VibrationTransmitter => InstrumentProfile {
                di_pins: 0,
                ai_pins: 1,
                manifold: None,
                needs_calibration: true,
            },
            InstrumentKind::LevelSwitch => InstrumentProfile {
                di_pins: 1,
                ai_pins: 0,
                manifold: None,
                needs_calibration: false,
            },
            InstrumentKind::LevelTransmitter => InstrumentProfile {
                di_pins: 0,
                ai_pins: 1,
                manifold: None,
                needs_calibration: true,
            },
        }
    }
}

/// One instrument line read from the project specification
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentRequirement {
    pub kind: InstrumentKind,
    pub qty: u32,
    pub brand: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_aliases() {
        for alias in [
            "inlet_temperature_transmitter",
            "outlet_temperature_transmitter",
            "bearing_temperature_transmitter",
            "pt100",
            "PT100",
            "temperature transmitter",
        ] {
            assert_eq!(
                InstrumentKind::canonicalize(alias),
                Some(InstrumentKind::TemperatureTransmitter),
                "alias {alias}"
            );
        }
        assert_eq!(
            InstrumentKind::canonicalize("bearing_vibration_transmitter"),
            Some(InstrumentKind::VibrationTransmitter)
        );
    }

    #[test]
    fn test_canonicalize_unknown() {
        assert_eq!(InstrumentKind::canonicalize("flux_capacitor"), None);
    }

    #[test]
    fn test_delta_kinds_take_three_way_manifolds() {
        assert_eq!(
            InstrumentKind::DeltaPressureTransmitter.profile().manifold,
            Some(ManifoldWays::ThreeWay)
        );
        assert_eq!(
            InstrumentKind::DeltaPressureSwitch.profile().manifold,
            Some(ManifoldWays::ThreeWay)
        );
        assert_eq!(
            InstrumentKind::PressureTransmitter.profile().manifold,
            Some(ManifoldWays::TwoWay)
        );
        assert_eq!(InstrumentKind::TemperatureTransmitter.profile().manifold, None);
    }

    #[test]
    fn test_transmitters_need_calibration_switches_do_not() {
        assert!(InstrumentKind::PressureTransmitter.profile().needs_calibration);
        assert!(InstrumentKind::LevelTransmitter.profile().needs_calibration);
        assert!(!InstrumentKind::PressureSwitch.profile().needs_calibration);
        assert!(!InstrumentKind::LevelSwitch.profile().needs_calibration);
    }

    #[test]
    fn test_pin_cost_is_zero_or_one() {
        use InstrumentKind::*;
        for kind in [
            PressureTransmitter,
            DeltaPressureTransmitter,
            PressureSwitch,
            DeltaPressureSwitch,
            TemperatureTransmitter,
            VibrationTransmitter,
            LevelSwitch,
            LevelTransmitter,
        ] {
            let p = kind.profile();
            assert!(p.di_pins <= 1);
            assert!(p.ai_pins <= 1);
            // switches are digital, transmitters analog, never both
            assert_eq!(p.di_pins + p.ai_pins, 1);
        }
    }
}
