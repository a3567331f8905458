//! Error taxonomy: fatal configuration errors vs. local data errors.

use thiserror::Error;

/// Fatal to the run. Nothing is returned once one of these surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two different entities share a name within one namespace. Never
    /// resolved by precedence; the input set (or registry) must be fixed.
    #[error("Ambiguous duplicate name '{name}'")]
    AmbiguousName { name: String },

    /// A set of nodes that can never become eligible because they produce
    /// each other's required inputs. `nodes` lists the implicated output
    /// identities.
    #[error("Cyclic dependency among nodes: {}", nodes.join(", "))]
    CyclicDependency { nodes: Vec<String> },

    /// A declaration references a dependency the resolver cannot bind
    /// (e.g. a KeyPoint dependency declared with a Parameter kind mismatch).
    #[error("Node '{node}' declares unresolvable dependency '{dependency}'")]
    UnresolvableDependency { node: String, dependency: String },
}

/// Local to one node instance (or one phase instance within it). Recoverable:
/// the scheduler logs it and continues with sibling instances.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// A slice contained no valid samples to search.
    #[error("No valid samples in slice")]
    NoValidData,

    /// Access past the end of a series. Never silently clamped.
    #[error("Range {start}..{end} out of bounds for series of length {len}")]
    OutOfRange { start: usize, end: usize, len: usize },
}
