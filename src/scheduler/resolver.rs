//! The run scheduler: expands declarations, repeatedly executes every
//! eligible instance until fixed point, then classifies whatever is left.

use crate::context::RunContext;
use crate::error::ConfigError;
use crate::node::{AvailableNames, NodeInstance, NodeOutcome, NodeRegistry};
use crate::scheduler::residue;
use crate::store::ResultStore;
use log::{debug, warn};
use rayon::prelude::*;

/// One expanded, runnable unit of work: a declaration index paired with its
/// concrete output identity.
#[derive(Debug, Clone)]
pub(crate) struct Pending {
    pub decl: usize,
    pub instance: NodeInstance,
}

pub struct Resolver<'a> {
    registry: &'a NodeRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a NodeRegistry) -> Self {
        Self { registry }
    }

    /// Executes a full analysis run.
    ///
    /// On success the context's result store is returned whole; on a fatal
    /// configuration error the context (and every partial result in it) is
    /// dropped with the `Err`, so consumers only ever see a complete set.
    pub fn run(&self, mut ctx: RunContext) -> Result<ResultStore, ConfigError> {
        // 1. Expand every declaration into its concrete instances.
        let mut pending: Vec<Pending> = Vec::new();
        for (decl, node) in self.registry.nodes().enumerate() {
            for instance in NodeRegistry::instances_of(node) {
                pending.push(Pending { decl, instance });
            }
        }
        let mut executed = vec![false; pending.len()];

        let mut available = AvailableNames::new(
            ctx.parameter_names().map(str::to_string),
            ctx.phase_names().map(str::to_string),
            ctx.marker_names().map(str::to_string),
        );

        // 2. Wave loop to fixed point. Within a wave every eligible instance
        // is independent of every other (none of their outputs exist yet),
        // so they run in parallel; emissions land in the store only after
        // the join, keeping store writes single-threaded.
        let mut wave = 0usize;
        loop {
            let eligible: Vec<usize> = (0..pending.len())
                .filter(|&i| !executed[i] && self.is_eligible(&pending[i], &available))
                .collect();
            if eligible.is_empty() {
                break;
            }
            debug!("wave {}: {} eligible instances", wave, eligible.len());

            let outcomes: Vec<(usize, Result<NodeOutcome, crate::error::DataError>)> = {
                let view = ctx.view();
                eligible
                    .par_iter()
                    .map(|&i| {
                        let p = &pending[i];
                        (i, self.registry.get(p.decl).derive(&p.instance, view))
                    })
                    .collect()
            };

            for (i, outcome) in outcomes {
                // Executed regardless of outcome: an empty, unimplemented or
                // failed instance never blocks the rest of the run, it just
                // absents its output.
                executed[i] = true;
                match outcome {
                    Ok(NodeOutcome::Emitted(kpvs)) => ctx.store.extend(kpvs),
                    Ok(NodeOutcome::NotImplemented) => {}
                    Err(e) => {
                        // Isolated at instance granularity: engine 3 failing
                        // must not take engines 1, 2 and 4 with it.
                        warn!(
                            "instance '{}' failed: {}",
                            pending[i].instance.output_name, e
                        );
                    }
                }
            }

            for name in ctx.store.names() {
                available.add_keypoint(name);
            }
            wave += 1;
        }

        // 3. Whatever never became eligible is either inactive (missing
        // input, false predicate) or part of a true cycle. Only the latter
        // is fatal.
        residue::check(self.registry, &pending, &executed, &available)?;

        debug!(
            "run complete: {} records across {} names",
            ctx.store.len(),
            ctx.store.names().count()
        );
        Ok(ctx.store)
    }

    /// Every non-optional dependency resolves against the currently known
    /// name set, and the availability predicate holds.
    fn is_eligible(&self, p: &Pending, available: &AvailableNames) -> bool {
        let node = self.registry.get(p.decl);
        node.dependencies().iter().all(|d| available.satisfies(d))
            && node.can_operate(available)
    }
}
