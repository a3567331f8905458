//! Dependency resolution and node execution.

pub mod residue;
pub mod resolver;

pub use resolver::Resolver;
