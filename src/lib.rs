//! Flight-data key-point-value derivation engine.
//!
//! Takes one flight's recorded signals (multi-rate parameters with validity
//! masks, detected phases, event markers), resolves which of the registered
//! analysis rules can run against them, orders execution across rule-on-rule
//! dependencies, and accumulates the produced `(name, index, value)` records
//! into a result store handed back at run end.
//!
//! Ingestion, phase detection, calibration and reporting are collaborators
//! outside this crate; they meet it at `RunContext` on the way in and
//! `ResultStore` on the way out.

pub mod align;
pub mod config;
pub mod context;
pub mod error;
pub mod node;
pub mod rules;
pub mod scheduler;
pub mod signal;
pub mod store;

pub use config::AnalysisConfig;
pub use context::{RunContext, RunView};
pub use error::{ConfigError, DataError};
pub use node::{
    AvailableNames, Dependency, DependencyKind, DependencyList, KeyPointNode, NameTemplate,
    NodeInstance, NodeOutcome, NodeRegistry,
};
pub use scheduler::Resolver;
pub use signal::{KeyPointValue, Parameter, Phase, Samples, Section, TimeMarker};
pub use store::ResultStore;
