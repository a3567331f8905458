//! Per-engine measurements: one templated family, one output per engine.

use crate::align::{duration_secs, longest_valid_run, master_to_local, repair_gaps};
use crate::config::AnalysisConfig;
use crate::context::RunView;
use crate::error::DataError;
use crate::node::{
    AvailableNames, Dependency, DependencyKind, DependencyList, KeyPointNode, NameTemplate,
    NodeInstance, NodeOutcome,
};
use crate::signal::KeyPointValue;
use smallvec::smallvec;

/// Time each engine's N1 spent below the cooldown threshold between
/// touchdown and engine stop.
///
/// Expands into one output identity per configured engine number. An
/// aircraft recording only two engines produces two records; the other
/// instances silently absent themselves.
pub struct EngCooldownDuration {
    template: NameTemplate,
    n1_names: Vec<String>,
}

impl EngCooldownDuration {
    pub fn new(config: &AnalysisConfig) -> Self {
        let numbers: Vec<String> = config.engine_numbers.iter().map(u8::to_string).collect();
        Self {
            template: NameTemplate::over(
                "Eng (%) N1 Cooldown Duration",
                numbers.iter().cloned(),
            ),
            n1_names: numbers.iter().map(|n| format!("Eng ({n}) N1")).collect(),
        }
    }

    fn n1_name(instance: &NodeInstance) -> String {
        format!("Eng ({}) N1", instance.subs[0])
    }
}

impl KeyPointNode for EngCooldownDuration {
    fn base_name(&self) -> &str {
        "Eng N1 Cooldown Duration"
    }

    fn template(&self) -> Option<&NameTemplate> {
        Some(&self.template)
    }

    fn dependencies(&self) -> DependencyList {
        let mut deps: DependencyList = smallvec![
            Dependency::required("Touchdown", DependencyKind::Marker),
            Dependency::required("Eng (*) Stop", DependencyKind::Marker),
        ];
        for name in &self.n1_names {
            deps.push(Dependency::optional(name.clone(), DependencyKind::Parameter));
        }
        deps
    }

    /// Richer precondition than the default: both markers, plus at least
    /// one of the per-engine signals.
    fn can_operate(&self, available: &AvailableNames) -> bool {
        available.contains(DependencyKind::Marker, "Touchdown")
            && available.contains(DependencyKind::Marker, "Eng (*) Stop")
            && available.any_parameter(self.n1_names.iter().map(String::as_str))
    }

    fn derive(
        &self,
        instance: &NodeInstance,
        view: RunView<'_>,
    ) -> Result<NodeOutcome, DataError> {
        // This engine's signal may be absent even though the family runs;
        // that instance simply emits nothing.
        let Some(n1) = view.parameter(&Self::n1_name(instance)) else {
            return Ok(NodeOutcome::Emitted(vec![]));
        };
        let touchdown = view
            .marker("Touchdown")
            .expect("BUG: scheduler guarantees required dependency");
        let eng_stop = view
            .marker("Eng (*) Stop")
            .expect("BUG: scheduler guarantees required dependency");
        let config = view.config();

        let Some(td) = touchdown.last() else {
            return Ok(NodeOutcome::Emitted(vec![]));
        };
        let Some(stop) = eng_stop.indices().iter().copied().find(|&i| i >= td) else {
            return Ok(NodeOutcome::Emitted(vec![]));
        };

        let slice = match master_to_local(td..stop, config.master_hz, n1) {
            Ok(s) => s,
            Err(_) => return Ok(NodeOutcome::Emitted(vec![])),
        };

        // Cooldown needs a continuous signal; repair short dropouts first.
        let repaired = repair_gaps(&n1.samples, config.max_repair_gap);
        let threshold = config.cooldown_n1_threshold;
        let run = longest_valid_run(&repaired, slice.clone(), |v| v < threshold)?;

        let (index, duration) = match run {
            Some(r) => (r.start as f64, duration_secs(&r, n1.sample_rate)),
            // No sample below threshold: a zero-duration result, not an
            // absent one.
            None => (slice.start as f64, 0.0),
        };
        Ok(NodeOutcome::Emitted(vec![KeyPointValue::new(
            index,
            duration,
            instance.output_name.clone(),
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunContext;
    use crate::node::NodeRegistry;
    use crate::scheduler::Resolver;
    use crate::signal::{Parameter, Samples, TimeMarker};
    use crate::store::ResultStore;

    fn registry() -> NodeRegistry {
        let mut reg = NodeRegistry::new();
        reg.register(Box::new(EngCooldownDuration::new(&AnalysisConfig::default())))
            .unwrap();
        reg
    }

    fn n1(engine: u8, values: Vec<f64>) -> Parameter {
        Parameter::from_values(format!("Eng ({engine}) N1"), 1.0, values)
    }

    fn run_with(params: Vec<Parameter>, markers: Vec<TimeMarker>) -> ResultStore {
        let ctx = RunContext::new(AnalysisConfig::default(), params, vec![], markers).unwrap();
        Resolver::new(&registry()).run(ctx).unwrap()
    }

    fn markers() -> Vec<TimeMarker> {
        vec![
            TimeMarker::new("Touchdown", vec![2.0]),
            TimeMarker::new("Eng (*) Stop", vec![10.0]),
        ]
    }

    #[test]
    fn test_two_of_four_engines_present() {
        // N1 idles below 60% from index 4 onward.
        let profile = vec![80.0, 75.0, 70.0, 65.0, 55.0, 40.0, 30.0, 25.0, 22.0, 20.0, 20.0];
        let store = run_with(
            vec![n1(1, profile.clone()), n1(2, profile)],
            markers(),
        );

        for engine in [1, 2] {
            let name = format!("Eng ({engine}) N1 Cooldown Duration");
            let records = store.get_all(&name);
            assert_eq!(records.len(), 1, "{name}");
            assert!(records[0].value >= 0.0);
        }
        assert!(store.get_all("Eng (3) N1 Cooldown Duration").is_empty());
        assert!(store.get_all("Eng (4) N1 Cooldown Duration").is_empty());
        assert_eq!(store.names().count(), 2);
    }

    #[test]
    fn test_cooldown_duration_value() {
        let profile = vec![80.0, 75.0, 70.0, 65.0, 55.0, 40.0, 30.0, 25.0, 22.0, 20.0, 20.0];
        let store = run_with(vec![n1(1, profile)], markers());

        let rec = &store.get_all("Eng (1) N1 Cooldown Duration")[0];
        // Below 60% from index 4 through the end of the 2..10 window.
        assert_eq!(rec.index, 4.0);
        assert_eq!(rec.value, 6.0);
    }

    #[test]
    fn test_never_below_threshold_is_zero_duration() {
        let store = run_with(vec![n1(1, vec![90.0; 11])], markers());
        let rec = &store.get_all("Eng (1) N1 Cooldown Duration")[0];
        assert_eq!(rec.value, 0.0);
    }

    #[test]
    fn test_family_ineligible_without_markers() {
        let profile = vec![80.0, 20.0, 20.0];
        let store = run_with(
            vec![n1(1, profile)],
            vec![TimeMarker::new("Touchdown", vec![0.0])],
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_family_ineligible_without_any_n1() {
        let store = run_with(vec![], markers());
        assert!(store.is_empty());
    }

    #[test]
    fn test_dropout_repaired_before_duration() {
        // Two invalid samples inside the cooldown run; repair bridges them
        // so the duration is unbroken.
        let values = vec![80.0, 70.0, 65.0, 50.0, 0.0, 0.0, 30.0, 25.0, 20.0, 20.0, 20.0];
        let mut valid = vec![true; values.len()];
        valid[4] = false;
        valid[5] = false;
        let p = Parameter::new("Eng (1) N1", 1.0, 0.0, Samples::new(values, valid));

        let store = run_with(vec![p], markers());
        let rec = &store.get_all("Eng (1) N1 Cooldown Duration")[0];
        assert_eq!(rec.index, 3.0);
        assert_eq!(rec.value, 7.0);
    }
}
