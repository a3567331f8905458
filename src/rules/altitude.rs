//! Mach and altitude measurements, including a KPV-on-KPV chain.

use crate::align::{extremum, master_to_local, value_at, Extremum};
use crate::context::RunView;
use crate::error::DataError;
use crate::node::{
    Dependency, DependencyKind, DependencyList, KeyPointNode, NodeInstance, NodeOutcome,
};
use crate::signal::KeyPointValue;
use smallvec::smallvec;

/// Peak Mach for the flight, restricted to Airborne when that phase exists.
pub struct MachMax;

impl KeyPointNode for MachMax {
    fn base_name(&self) -> &str {
        "Mach Max"
    }

    fn dependencies(&self) -> DependencyList {
        smallvec![
            Dependency::required("Mach", DependencyKind::Parameter),
            Dependency::optional("Airborne", DependencyKind::Phase),
        ]
    }

    fn derive(
        &self,
        instance: &NodeInstance,
        view: RunView<'_>,
    ) -> Result<NodeOutcome, DataError> {
        let mach = view
            .parameter("Mach")
            .expect("BUG: scheduler guarantees required dependency");
        let master_hz = view.config().master_hz;

        let slices: Vec<std::ops::Range<usize>> = match view.phase("Airborne") {
            Some(phase) => phase
                .sections()
                .iter()
                .filter_map(|s| master_to_local(s.start..s.stop, master_hz, mach).ok())
                .collect(),
            None => vec![0..mach.len()],
        };

        let mut kpvs = Vec::new();
        for slice in slices {
            if let Ok((idx, value)) = extremum(&mach.samples, slice, Extremum::Max) {
                kpvs.push(KeyPointValue::new(
                    idx as f64,
                    value,
                    instance.output_name.clone(),
                ));
            }
        }
        Ok(NodeOutcome::Emitted(kpvs))
    }
}

/// Pressure altitude read at the index of the peak-Mach record. Depends on
/// another node's output, so it only becomes eligible once "Mach Max" is in
/// the result store.
pub struct AltitudeAtMachMax;

impl KeyPointNode for AltitudeAtMachMax {
    fn base_name(&self) -> &str {
        "Altitude At Mach Max"
    }

    fn dependencies(&self) -> DependencyList {
        smallvec![
            Dependency::required("Altitude STD", DependencyKind::Parameter),
            Dependency::required("Mach", DependencyKind::Parameter),
            Dependency::required("Mach Max", DependencyKind::KeyPoint),
        ]
    }

    fn derive(
        &self,
        instance: &NodeInstance,
        view: RunView<'_>,
    ) -> Result<NodeOutcome, DataError> {
        let altitude = view
            .parameter("Altitude STD")
            .expect("BUG: scheduler guarantees required dependency");
        let mach = view
            .parameter("Mach")
            .expect("BUG: scheduler guarantees required dependency");
        let peak = view
            .results()
            .get_max("Mach Max")
            .expect("BUG: scheduler guarantees KeyPoint dependency records");
        let master_hz = view.config().master_hz;

        // The peak's index is on the Mach axis; hop via the master axis onto
        // the altitude axis, keeping the fractional position.
        let master = (peak.index / mach.sample_rate + mach.offset) * master_hz;
        let alt_idx = (master / master_hz - altitude.offset) * altitude.sample_rate;
        let value = value_at(&altitude.samples, alt_idx)?;

        Ok(NodeOutcome::Emitted(vec![KeyPointValue::new(
            alt_idx,
            value,
            instance.output_name.clone(),
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::context::RunContext;
    use crate::node::NodeRegistry;
    use crate::scheduler::Resolver;
    use crate::signal::Parameter;

    fn registry() -> NodeRegistry {
        let mut reg = NodeRegistry::new();
        reg.register(Box::new(MachMax)).unwrap();
        reg.register(Box::new(AltitudeAtMachMax)).unwrap();
        reg
    }

    #[test]
    fn test_altitude_read_at_peak_mach() {
        let mach = Parameter::from_values("Mach", 1.0, vec![0.5, 0.82, 0.79, 0.6]);
        let altitude =
            Parameter::from_values("Altitude STD", 1.0, vec![30000.0, 35000.0, 34000.0, 31000.0]);

        let ctx = RunContext::new(
            AnalysisConfig::default(),
            vec![mach, altitude],
            vec![],
            vec![],
        )
        .unwrap();
        let store = Resolver::new(&registry()).run(ctx).unwrap();

        assert_eq!(store.get_max("Mach Max").unwrap().value, 0.82);
        let alt = store.get_all("Altitude At Mach Max");
        assert_eq!(alt.len(), 1);
        assert_eq!(alt[0].value, 35000.0);
        assert_eq!(alt[0].index, 1.0);
    }

    #[test]
    fn test_chain_inactive_when_mach_missing() {
        let altitude = Parameter::from_values("Altitude STD", 1.0, vec![30000.0]);
        let ctx =
            RunContext::new(AnalysisConfig::default(), vec![altitude], vec![], vec![]).unwrap();
        let store = Resolver::new(&registry()).run(ctx).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_mach_axis_mapped_onto_slower_altitude_axis() {
        // Mach at 2 Hz, altitude at 1 Hz: peak at Mach index 3 is altitude
        // index 1.5, interpolated.
        let mach = Parameter::from_values("Mach", 2.0, vec![0.4, 0.5, 0.6, 0.8, 0.7, 0.6]);
        let altitude = Parameter::from_values("Altitude STD", 1.0, vec![10000.0, 12000.0, 14000.0]);

        let ctx = RunContext::new(
            AnalysisConfig::default(),
            vec![mach, altitude],
            vec![],
            vec![],
        )
        .unwrap();
        let store = Resolver::new(&registry()).run(ctx).unwrap();

        let alt = store.get_all("Altitude At Mach Max");
        assert_eq!(alt.len(), 1);
        assert_eq!(alt[0].index, 1.5);
        assert_eq!(alt[0].value, 13000.0);
    }
}
