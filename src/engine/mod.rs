//! Engine module - calculators, selectors and panel builders

pub mod ampacity;
pub mod builders;
pub mod calc;
pub mod instrument;
pub mod motor;
pub mod panel;
pub mod selectors;

pub use builders::{build, build_all, BuildError, PanelBuild, Subsystem};
pub use panel::{Panel, PanelRow};
pub use selectors::{PanelBuilder, SelectorConfig};
