//! Motor entity and the start-type accessory policy
//!
//! A motor's start type is classified once, at construction, and
//! deterministically fixes its per-unit accessory bundle: protective
//! device counts, PLC channel demand, pilot devices, wiring factors.
//! The dispatch is one table, not an inheritance tree; builders multiply
//! the per-unit figures by the instance quantity when rolling up rows.

use serde::{Deserialize, Serialize};

use crate::engine::calc;

/// How a motor is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartType {
    Direct,
    DeltaStar,
    Vfd,
    SoftStarter,
    Pneumatic,
    MotorizedOnOff,
    MotorizedGradual,
}

impl std::fmt::Display for StartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartType::Direct => write!(f, "direct"),
            StartType::DeltaStar => write!(f, "delta-star"),
            StartType::Vfd => write!(f, "VFD"),
            StartType::SoftStarter => write!(f, "soft starter"),
            StartType::Pneumatic => write!(f, "pneumatic"),
            StartType::MotorizedOnOff => write!(f, "motorized on/off"),
            StartType::MotorizedGradual => write!(f, "motorized gradual"),
        }
    }
}

/// Per-unit accessory quantities attached to one motor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccessoryBundle {
    pub contactor: u32,
    pub mpcb: u32,
    pub mccb: u32,
    pub bimetal: u32,
    /// VFD or soft starter units
    pub drive: u32,

    pub terminal_4mm: u32,
    pub terminal_6mm: u32,
    pub relay_1no1nc: u32,
    pub relay_2no2nc: u32,
    pub button: u32,
    pub selector_switch: u32,
    pub aux_contact: u32,
    pub signal_lamp: u32,

    pub di_channels: u32,
    pub do_channels: u32,
    pub ai_channels: u32,
    pub ao_channels: u32,

    /// Meters of slotted duct per unit
    pub duct_cover_m: f64,
    /// Meters of mounting rail per unit
    pub rail_m: f64,
    /// Run-length multiplier for the signal cable
    pub signal_cable_factor: f64,
    /// Run-length multiplier for the power cable
    pub power_cable_factor: f64,
}

impl StartType {
    /// The fixed accessory bundle for this start type
    pub fn bundle(&self) -> AccessoryBundle {
        match self {
            StartType::Direct => AccessoryBundle {
                contactor: 1,
                mpcb: 1,
                terminal_4mm: 6,
                relay_1no1nc: 2,
                button: 2,
                selector_switch: 1,
                aux_contact: 1,
                signal_lamp: 2,
                di_channels: 2,
                do_channels: 1,
                duct_cover_m: 1.0,
                rail_m: 0.4,
                signal_cable_factor: 1.0,
                power_cable_factor: 1.0,
                ..AccessoryBundle::default()
            },
            StartType::DeltaStar => AccessoryBundle {
                contactor: 3,
                mpcb: 1,
                bimetal: 1,
                terminal_6mm: 9,
                relay_1no1nc: 3,
                button: 2,
                selector_switch: 1,
                aux_contact: 2,
                signal_lamp: 2,
                di_channels: 2,
                do_channels: 1,
                duct_cover_m: 1.5,
                rail_m: 0.6,
                signal_cable_factor: 1.0,
                power_cable_factor: 1.5,
                ..AccessoryBundle::default()
            },
            StartType::Vfd => AccessoryBundle {
                mccb: 1,
                drive: 1,
                terminal_6mm: 6,
                relay_1no1nc: 3,
                button: 3,
                selector_switch: 1,
                aux_contact: 1,
                signal_lamp: 3,
                di_channels: 3,
                do_channels: 2,
                ai_channels: 1,
                ao_channels: 1,
                duct_cover_m: 2.0,
                rail_m: 0.8,
                signal_cable_factor: 2.0,
                power_cable_factor: 1.5,
                ..AccessoryBundle::default()
            },
            StartType::SoftStarter => AccessoryBundle {
                contactor: 1,
                mccb: 1,
                drive: 1,
                terminal_6mm: 6,
                relay_1no1nc: 3,
                button: 2,
                selector_switch: 1,
                aux_contact: 1,
                signal_lamp: 2,
                di_channels: 3,
                do_channels: 1,
                duct_cover_m: 2.0,
                rail_m: 0.8,
                signal_cable_factor: 1.5,
                power_cable_factor: 1.5,
                ..AccessoryBundle::default()
            },
            StartType::Pneumatic => AccessoryBundle {
                mccb: 1,
                relay_1no1nc: 6,
                terminal_4mm: 4,
                selector_switch: 1,
                signal_lamp: 2,
                di_channels: 2,
                do_channels: 2,
                duct_cover_m: 0.5,
                rail_m: 0.3,
                signal_cable_factor: 1.0,
                power_cable_factor: 0.5,
                ..AccessoryBundle::default()
            },
            StartType::MotorizedOnOff => AccessoryBundle {
                contactor: 2,
                mpcb: 1,
                terminal_4mm: 6,
                relay_1no1nc: 4,
                button: 2,
                selector_switch: 1,
                aux_contact: 2,
                signal_lamp: 2,
                di_channels: 4,
                do_channels: 2,
                duct_cover_m: 1.0,
                rail_m: 0.4,
                signal_cable_factor: 1.0,
                power_cable_factor: 1.0,
                ..AccessoryBundle::default()
            },
            StartType::MotorizedGradual => AccessoryBundle {
                contactor: 2,
                mpcb: 1,
                terminal_4mm: 8,
                relay_1no1nc: 5,
                button: 4,
                selector_switch: 1,
                aux_contact: 2,
                signal_lamp: 3,
                di_channels: 6,
                do_channels: 2,
                ai_channels: 1,
                ao_channels: 1,
                duct_cover_m: 1.0,
                rail_m: 0.5,
                signal_cable_factor: 2.0,
                power_cable_factor: 1.0,
                ..AccessoryBundle::default()
            },
        }
    }
}

/// One powered device instance in a panel
#[derive(Debug, Clone, PartialEq)]
pub struct Motor {
    /// Usage label from the project spec ("screw conveyor", "main fan")
    pub usage: String,
    pub power_w: f64,
    pub qty: u32,
    pub start_type: StartType,
    /// Preferred drive/protection brand for this motor, if any
    pub brand: Option<String>,
    /// Line current (A), derived at construction
    pub current: f64,
    /// Per-unit accessory quantities, fixed by the start type
    pub bundle: AccessoryBundle,
}

impl Motor {
    /// Construct a motor and classify its start type, deriving current
    /// from the project's low-voltage bus.
    pub fn new(
        usage: impl Into<String>,
        power_w: f64,
        qty: u32,
        start_type: StartType,
        brand: Option<String>,
        voltage: f64,
    ) -> Self {
        Self {
            usage: usage.into(),
            power_w,
            qty,
            start_type,
            brand,
            current: calc::three_phase_current(
                power_w,
                voltage,
                calc::DEFAULT_POWER_FACTOR,
                calc::DEFAULT_EFFICIENCY,
            ),
            bundle: start_type.bundle(),
        }
    }

    /// Construct a resistive heater load. Heaters draw unity-power-factor
    /// current and carry a fixed contactor + MCCB bundle with a
    /// thermostat input and one switching output.
    pub fn heater(usage: impl Into<String>, power_w: f64, qty: u32, voltage: f64) -> Self {
        Self {
            usage: usage.into(),
            power_w,
            qty,
            start_type: StartType::Direct,
            brand: None,
            current: calc::resistive_current(power_w, voltage),
            bundle: AccessoryBundle {
                contactor: 1,
                mccb: 1,
                terminal_6mm: 4,
                relay_1no1nc: 1,
                signal_lamp: 1,
                di_channels: 1,
                do_channels: 1,
                duct_cover_m: 0.5,
                rail_m: 0.3,
                signal_cable_factor: 1.0,
                power_cable_factor: 1.0,
                ..AccessoryBundle::default()
            },
        }
    }

    /// Motor power in kilowatts (drive sizing)
    pub fn power_kw(&self) -> f64 {
        self.power_w / 1000.0
    }
}
