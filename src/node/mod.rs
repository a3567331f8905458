//! Node declarations and the registry the resolver consults.

pub mod declaration;
pub mod registry;
pub mod template;

pub use declaration::{
    AvailableNames, Dependency, DependencyKind, DependencyList, KeyPointNode, NodeInstance,
    NodeOutcome,
};
pub use registry::NodeRegistry;
pub use template::NameTemplate;
