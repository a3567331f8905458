//! The contract every analysis rule implements.

use crate::context::RunView;
use crate::error::DataError;
use crate::node::template::NameTemplate;
use crate::signal::KeyPointValue;
use smallvec::SmallVec;
use std::collections::HashSet;

/// What kind of entity a declared dependency name resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Parameter,
    Phase,
    Marker,
    /// The output family of another node. Satisfied only once records under
    /// that name are actually present in the result store.
    KeyPoint,
}

/// One entry of a node's declared dependency signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub kind: DependencyKind,
    pub optional: bool,
}

impl Dependency {
    pub fn required(name: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: true,
        }
    }
}

/// Dependency lists are short; four entries covers nearly every rule.
pub type DependencyList = SmallVec<[Dependency; 4]>;

/// The name set a node's availability predicate is evaluated over: the run's
/// inputs plus the output names already present in the result store.
#[derive(Debug, Default, Clone)]
pub struct AvailableNames {
    parameters: HashSet<String>,
    phases: HashSet<String>,
    markers: HashSet<String>,
    keypoints: HashSet<String>,
}

impl AvailableNames {
    pub fn new(
        parameters: impl IntoIterator<Item = String>,
        phases: impl IntoIterator<Item = String>,
        markers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
            phases: phases.into_iter().collect(),
            markers: markers.into_iter().collect(),
            keypoints: HashSet::new(),
        }
    }

    pub(crate) fn add_keypoint(&mut self, name: &str) {
        self.keypoints.insert(name.to_string());
    }

    pub fn contains(&self, kind: DependencyKind, name: &str) -> bool {
        match kind {
            DependencyKind::Parameter => self.parameters.contains(name),
            DependencyKind::Phase => self.phases.contains(name),
            DependencyKind::Marker => self.markers.contains(name),
            DependencyKind::KeyPoint => self.keypoints.contains(name),
        }
    }

    pub fn satisfies(&self, dep: &Dependency) -> bool {
        dep.optional || self.contains(dep.kind, &dep.name)
    }

    /// Convenience for availability overrides: true if any of the given
    /// parameter names is present.
    pub fn any_parameter<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> bool {
        names
            .into_iter()
            .any(|n| self.parameters.contains(n))
    }
}

/// One runnable expansion of a declaration. Simple nodes have exactly one
/// instance; templated families have one per substitution tuple. The
/// substitution values are how a family's computation tells its instances
/// apart — the dependency bindings themselves are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInstance {
    pub output_name: String,
    pub subs: Vec<String>,
}

impl NodeInstance {
    pub fn simple(output_name: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            subs: Vec::new(),
        }
    }
}

/// What a computation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    /// Zero or more records to append under this instance's output name.
    Emitted(Vec<KeyPointValue>),
    /// Applicable but unimplemented. A first-class outcome the scheduler
    /// treats exactly like `Emitted(vec![])`: the instance counts as
    /// executed and contributes nothing.
    NotImplemented,
}

/// A declared analysis rule.
///
/// Implementations are registered once at process start and shared read-only
/// across runs, so they must be `Send + Sync` and hold no per-run state.
pub trait KeyPointNode: Send + Sync {
    /// Fixed identity, or the family name a template instantiates.
    fn base_name(&self) -> &str;

    /// Present on templated families only.
    fn template(&self) -> Option<&NameTemplate> {
        None
    }

    /// The declared dependency signature the resolver schedules against.
    fn dependencies(&self) -> DependencyList;

    /// Availability predicate. The default is "every non-optional
    /// dependency resolvable"; override for richer preconditions such as
    /// "at least one of the per-engine signals present".
    fn can_operate(&self, available: &AvailableNames) -> bool {
        self.dependencies().iter().all(|d| available.satisfies(d))
    }

    /// Computes this instance's emissions from the bound dependencies.
    ///
    /// A `DataError` here is isolated to this instance; siblings and the
    /// rest of the run proceed.
    fn derive(&self, instance: &NodeInstance, view: RunView<'_>)
        -> Result<NodeOutcome, DataError>;
}
