//! Classification of instances left unexecuted at the fixed point.
//!
//! An instance blocked on a name nobody can produce is inactive — the
//! expected way an inapplicable rule absents its output. An instance set
//! whose members block each other is a fatal configuration error.

use crate::error::ConfigError;
use crate::node::{AvailableNames, Dependency, DependencyKind, NodeRegistry};
use crate::scheduler::resolver::Pending;
use petgraph::graphmap::DiGraphMap;
use petgraph::algo::tarjan_scc;
use std::collections::HashMap;

/// Fails with `CyclicDependency` iff the unexecuted residue contains a true
/// cycle; silently accepts residue blocked on genuinely absent inputs or on
/// false availability predicates.
pub(crate) fn check(
    registry: &NodeRegistry,
    pending: &[Pending],
    executed: &[bool],
    available: &AvailableNames,
) -> Result<(), ConfigError> {
    let mut remaining: Vec<usize> = (0..pending.len()).filter(|&i| !executed[i]).collect();
    if remaining.is_empty() {
        return Ok(());
    }

    // Iteratively prune instances that cannot be part of a cycle: those
    // blocked on anything no remaining instance can produce, and those with
    // no unsatisfied dependency at all (their predicate said no). Nodes only
    // ever produce KeyPoints, so an unsatisfied Parameter/Phase/Marker
    // dependency always means a missing input, even when a node output
    // happens to share its name. What survives pruning is a set where every
    // member waits on another member.
    loop {
        let producible: HashMap<&str, usize> = remaining
            .iter()
            .map(|&i| (pending[i].instance.output_name.as_str(), i))
            .collect();

        let before = remaining.len();
        remaining.retain(|&i| {
            let unsat = unsatisfied(registry, &pending[i], available);
            !unsat.is_empty()
                && unsat.iter().all(|d| {
                    d.kind == DependencyKind::KeyPoint
                        && producible.contains_key(d.name.as_str())
                })
        });
        if remaining.len() == before {
            break;
        }
    }

    if remaining.is_empty() {
        return Ok(());
    }

    // Every survivor has an in-edge from another survivor, so a cycle
    // exists. Name the members of the non-trivial components.
    let producible: HashMap<&str, usize> = remaining
        .iter()
        .map(|&i| (pending[i].instance.output_name.as_str(), i))
        .collect();
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
    let mut self_loops: Vec<usize> = Vec::new();
    for &i in &remaining {
        graph.add_node(i);
        for dep in unsatisfied(registry, &pending[i], available) {
            if dep.kind != DependencyKind::KeyPoint {
                continue;
            }
            match producible.get(dep.name.as_str()) {
                Some(&producer) if producer == i => self_loops.push(i),
                Some(&producer) => {
                    graph.add_edge(producer, i, ());
                }
                None => {}
            }
        }
    }

    let mut implicated: Vec<String> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || scc.iter().any(|n| self_loops.contains(n)))
        .flatten()
        .chain(self_loops.iter().copied())
        .map(|i| pending[i].instance.output_name.clone())
        .collect();
    if implicated.is_empty() {
        // Every survivor waits on a survivor, so the whole set is implicated.
        implicated = remaining
            .iter()
            .map(|&i| pending[i].instance.output_name.clone())
            .collect();
    }
    implicated.sort();
    implicated.dedup();

    Err(ConfigError::CyclicDependency { nodes: implicated })
}

/// The required dependencies of `p` not currently resolvable.
fn unsatisfied(
    registry: &NodeRegistry,
    p: &Pending,
    available: &AvailableNames,
) -> Vec<Dependency> {
    registry
        .get(p.decl)
        .dependencies()
        .into_iter()
        .filter(|d| !d.optional && !available.contains(d.kind, &d.name))
        .collect()
}
