//! Per-run state: the loaded inputs, the growing result store, and the
//! configuration. Created at run start, discarded at run end.

use crate::config::AnalysisConfig;
use crate::error::ConfigError;
use crate::signal::{Parameter, Phase, TimeMarker};
use crate::store::ResultStore;
use std::collections::HashMap;

/// Owns one flight's input set and accumulating results.
#[derive(Debug)]
pub struct RunContext {
    pub config: AnalysisConfig,
    parameters: HashMap<String, Parameter>,
    phases: HashMap<String, Phase>,
    markers: HashMap<String, TimeMarker>,
    pub(crate) store: ResultStore,
}

impl RunContext {
    /// Builds the context, rejecting duplicate names within each namespace.
    /// Two different signals sharing a name is an input-configuration error,
    /// never resolved by precedence.
    pub fn new(
        config: AnalysisConfig,
        parameters: Vec<Parameter>,
        phases: Vec<Phase>,
        markers: Vec<TimeMarker>,
    ) -> Result<Self, ConfigError> {
        let mut ctx = Self {
            config,
            parameters: HashMap::with_capacity(parameters.len()),
            phases: HashMap::with_capacity(phases.len()),
            markers: HashMap::with_capacity(markers.len()),
            store: ResultStore::new(),
        };
        for p in parameters {
            let name = p.name.clone();
            if ctx.parameters.insert(name.clone(), p).is_some() {
                return Err(ConfigError::AmbiguousName { name });
            }
        }
        for p in phases {
            let name = p.name.clone();
            if ctx.phases.insert(name.clone(), p).is_some() {
                return Err(ConfigError::AmbiguousName { name });
            }
        }
        for m in markers {
            let name = m.name.clone();
            if ctx.markers.insert(name.clone(), m).is_some() {
                return Err(ConfigError::AmbiguousName { name });
            }
        }
        Ok(ctx)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.get(name)
    }

    pub fn marker(&self, name: &str) -> Option<&TimeMarker> {
        self.markers.get(name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn phase_names(&self) -> impl Iterator<Item = &str> {
        self.phases.keys().map(String::as_str)
    }

    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }

    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    /// The immutable view node computations receive.
    pub fn view(&self) -> RunView<'_> {
        RunView { ctx: self }
    }
}

/// Read-only window onto the run handed to `KeyPointNode::derive`.
///
/// Computations see the inputs and everything already in the result store;
/// they cannot write (the scheduler appends their emissions after the wave).
#[derive(Clone, Copy)]
pub struct RunView<'a> {
    ctx: &'a RunContext,
}

impl<'a> RunView<'a> {
    pub fn config(&self) -> &'a AnalysisConfig {
        &self.ctx.config
    }

    pub fn parameter(&self, name: &str) -> Option<&'a Parameter> {
        self.ctx.parameter(name)
    }

    pub fn phase(&self, name: &str) -> Option<&'a Phase> {
        self.ctx.phase(name)
    }

    pub fn marker(&self, name: &str) -> Option<&'a TimeMarker> {
        self.ctx.marker(name)
    }

    pub fn results(&self) -> &'a ResultStore {
        self.ctx.results()
    }
}
