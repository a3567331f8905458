//! The explicit node registry.
//!
//! Rules are registered by an explicit call at process start; there is no
//! discovery by reflection or type enumeration. Once handed to the resolver
//! the registry is read-only, shared across runs.

use crate::error::ConfigError;
use crate::node::declaration::{KeyPointNode, NodeInstance};
use std::collections::HashSet;

#[derive(Default)]
pub struct NodeRegistry {
    nodes: Vec<Box<dyn KeyPointNode>>,
    // Uniqueness check across every expanded output identity.
    used_names: HashSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, rejecting output-identity collisions and
    /// malformed dependency declarations up front.
    pub fn register(&mut self, node: Box<dyn KeyPointNode>) -> Result<(), ConfigError> {
        for dep in node.dependencies() {
            if dep.name.trim().is_empty() {
                return Err(ConfigError::UnresolvableDependency {
                    node: node.base_name().to_string(),
                    dependency: dep.name,
                });
            }
        }
        for instance in Self::instances_of(node.as_ref()) {
            if !self.used_names.insert(instance.output_name.clone()) {
                return Err(ConfigError::AmbiguousName {
                    name: instance.output_name,
                });
            }
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &dyn KeyPointNode> {
        self.nodes.iter().map(Box::as_ref)
    }

    pub fn get(&self, idx: usize) -> &dyn KeyPointNode {
        self.nodes[idx].as_ref()
    }

    /// Whether any declaration's expansion produces `name`.
    pub fn produces(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// The concrete instances a declaration expands into: one for a simple
    /// node, one per substitution tuple for a templated family.
    pub fn instances_of(node: &dyn KeyPointNode) -> Vec<NodeInstance> {
        match node.template() {
            Some(t) => t.expand(),
            None => vec![NodeInstance::simple(node.base_name())],
        }
    }
}
