//! Panel builders - one per subsystem
//!
//! Each builder assembles a motor/instrument inventory from its section of
//! the project specification and drives the selectors in a fixed order:
//! protective devices, PLC I/O, general accessories, instruments,
//! enclosure. The order matters - later steps consume state the earlier
//! ones established (motor currents, extra DO demand).
//!
//! Four subsystems share the generic motor-section pipeline; bagfilter,
//! hopper heater and installation carry their own domain arithmetic.

pub mod bagfilter;
pub mod generic;
pub mod hopper_heater;
pub mod installation;

use thiserror::Error;

use crate::catalog::CatalogStore;
use crate::engine::panel::Panel;
use crate::engine::selectors::SelectorConfig;
use crate::spec::ProjectSpec;

/// The subsystems a project can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Bagfilter,
    FanDamper,
    Transport,
    FreshAir,
    HopperHeater,
    Vibration,
    Installation,
}

impl Subsystem {
    pub fn all() -> &'static [Subsystem] {
        &[
            Subsystem::Bagfilter,
            Subsystem::FanDamper,
            Subsystem::Transport,
            Subsystem::FreshAir,
            Subsystem::HopperHeater,
            Subsystem::Vibration,
            Subsystem::Installation,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subsystem::Bagfilter => "Bagfilter",
            Subsystem::FanDamper => "Fan & damper",
            Subsystem::Transport => "Transport",
            Subsystem::FreshAir => "Fresh air",
            Subsystem::HopperHeater => "Hopper heater",
            Subsystem::Vibration => "Vibration",
            Subsystem::Installation => "Installation",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A finished build: the priced panel plus non-fatal warnings
#[derive(Debug)]
pub struct PanelBuild {
    pub subsystem: Subsystem,
    pub panel: Panel,
    pub warnings: Vec<String>,
}

/// Errors raised before a build can start
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("subsystem '{0}' is not present in the project specification")]
    SectionMissing(Subsystem),

    #[error("subsystem '{0}' is disabled (status: false)")]
    SectionDisabled(Subsystem),
}

/// Build one subsystem's panel
pub fn build(
    subsystem: Subsystem,
    spec: &ProjectSpec,
    catalog: &CatalogStore,
    cfg: SelectorConfig,
) -> Result<PanelBuild, BuildError> {
    match subsystem {
        Subsystem::Bagfilter => {
            let section = spec
                .bagfilter
                .as_ref()
                .ok_or(BuildError::SectionMissing(subsystem))?;
            if !section.status {
                return Err(BuildError::SectionDisabled(subsystem));
            }
            Ok(bagfilter::build(section, spec, catalog, cfg))
        }
        Subsystem::FanDamper | Subsystem::Transport | Subsystem::FreshAir | Subsystem::Vibration => {
            let section = match subsystem {
                Subsystem::FanDamper => spec.fan_damper.as_ref(),
                Subsystem::Transport => spec.transport.as_ref(),
                Subsystem::FreshAir => spec.fresh_air.as_ref(),
                Subsystem::Vibration => spec.vibration.as_ref(),
                _ => None,
            }
            .ok_or(BuildError::SectionMissing(subsystem))?;
            if !section.status {
                return Err(BuildError::SectionDisabled(subsystem));
            }
            Ok(generic::build(subsystem, section, spec, catalog, cfg))
        }
        Subsystem::HopperHeater => {
            let section = spec
                .hopper_heater
                .as_ref()
                .ok_or(BuildError::SectionMissing(subsystem))?;
            if !section.status {
                return Err(BuildError::SectionDisabled(subsystem));
            }
            Ok(hopper_heater::build(section, spec, catalog, cfg))
        }
        Subsystem::Installation => {
            let section = spec
                .installation
                .as_ref()
                .ok_or(BuildError::SectionMissing(subsystem))?;
            if !section.status {
                return Err(BuildError::SectionDisabled(subsystem));
            }
            Ok(installation::build(section, spec, catalog, cfg))
        }
    }
}

/// Build every subsystem that is present and enabled, in fixed order
pub fn build_all(
    spec: &ProjectSpec,
    catalog: &CatalogStore,
    cfg: SelectorConfig,
) -> Vec<PanelBuild> {
    Subsystem::all()
        .iter()
        .filter_map(|&subsystem| build(subsystem, spec, catalog, cfg).ok())
        .collect()
}
