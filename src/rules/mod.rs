//! The rule catalog: thin consumers of the engine.
//!
//! Each file groups the rules for one measurement family. The catalog here
//! covers every declaration shape the engine supports; a production
//! deployment registers a few hundred of these.

pub mod airspeed;
pub mod altitude;
pub mod engines;

use crate::config::AnalysisConfig;
use crate::error::ConfigError;
use crate::node::NodeRegistry;

pub use airspeed::{AirspeedAtTouchdown, AirspeedBandMax, AirspeedMaxAirborne};
pub use altitude::{AltitudeAtMachMax, MachMax};
pub use engines::EngCooldownDuration;

/// Builds the registry of standard rules for the given configuration.
/// Called once at process start; the result is shared read-only across runs.
pub fn standard_registry(config: &AnalysisConfig) -> Result<NodeRegistry, ConfigError> {
    let mut registry = NodeRegistry::new();
    registry.register(Box::new(AirspeedMaxAirborne))?;
    registry.register(Box::new(AirspeedAtTouchdown))?;
    registry.register(Box::new(AirspeedBandMax::descent_1000_to_500()))?;
    registry.register(Box::new(MachMax))?;
    registry.register(Box::new(AltitudeAtMachMax))?;
    registry.register(Box::new(EngCooldownDuration::new(config)))?;
    Ok(registry)
}
