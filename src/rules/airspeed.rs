//! Airspeed measurements.

use crate::align::{extremum, master_to_local, slices_between, value_at, Extremum};
use crate::context::RunView;
use crate::error::DataError;
use crate::node::{
    Dependency, DependencyKind, DependencyList, KeyPointNode, NodeInstance, NodeOutcome,
};
use crate::signal::KeyPointValue;
use smallvec::smallvec;

/// Maximum airspeed within each Airborne section: one record per section.
pub struct AirspeedMaxAirborne;

impl KeyPointNode for AirspeedMaxAirborne {
    fn base_name(&self) -> &str {
        "Airspeed Max"
    }

    fn dependencies(&self) -> DependencyList {
        smallvec![
            Dependency::required("Airspeed", DependencyKind::Parameter),
            Dependency::required("Airborne", DependencyKind::Phase),
        ]
    }

    fn derive(
        &self,
        instance: &NodeInstance,
        view: RunView<'_>,
    ) -> Result<NodeOutcome, DataError> {
        let airspeed = view
            .parameter("Airspeed")
            .expect("BUG: scheduler guarantees required dependency");
        let airborne = view
            .phase("Airborne")
            .expect("BUG: scheduler guarantees required dependency");
        let master_hz = view.config().master_hz;

        let mut kpvs = Vec::new();
        for section in airborne.sections() {
            // A section the signal cannot cover, or one with no valid
            // samples, contributes nothing; the next section still runs.
            let Ok(slice) = master_to_local(section.start..section.stop, master_hz, airspeed)
            else {
                continue;
            };
            if let Ok((idx, value)) = extremum(&airspeed.samples, slice, Extremum::Max) {
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

/// Airspeed read at each Touchdown marker, interpolated at the fractional
/// event index.
pub struct AirspeedAtTouchdown;

impl KeyPointNode for AirspeedAtTouchdown {
    fn base_name(&self) -> &str {
        "Airspeed At Touchdown"
    }

    fn dependencies(&self) -> DependencyList {
        smallvec![
            Dependency::required("Airspeed", DependencyKind::Parameter),
            Dependency::required("Touchdown", DependencyKind::Marker),
        ]
    }

    fn derive(
        &self,
        instance: &NodeInstance,
        view: RunView<'_>,
    ) -> Result<NodeOutcome, DataError> {
        let airspeed = view
            .parameter("Airspeed")
            .expect("BUG: scheduler guarantees required dependency");
        let touchdown = view
            .marker("Touchdown")
            .expect("BUG: scheduler guarantees required dependency");
        let master_hz = view.config().master_hz;

        let mut kpvs = Vec::new();
        for master_idx in touchdown.indices() {
            let local = (master_idx / master_hz - airspeed.offset) * airspeed.sample_rate;
            if let Ok(value) = value_at(&airspeed.samples, local) {
                kpvs.push(KeyPointValue::new(
                    local,
                    value,
                    instance.output_name.clone(),
                ));
            }
        }
        Ok(NodeOutcome::Emitted(kpvs))
    }
}

/// Maximum airspeed within each altitude-band traversal, e.g.
/// "Airspeed 1000 To 500 Ft Max" during descent.
pub struct AirspeedBandMax {
    name: String,
    low_ft: f64,
    high_ft: f64,
}

impl AirspeedBandMax {
    pub fn new(name: impl Into<String>, low_ft: f64, high_ft: f64) -> Self {
        Self {
            name: name.into(),
            low_ft,
            high_ft,
        }
    }

    pub fn descent_1000_to_500() -> Self {
        Self::new("Airspeed 1000 To 500 Ft Max", 500.0, 1000.0)
    }
}

impl KeyPointNode for AirspeedBandMax {
    fn base_name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> DependencyList {
        smallvec![
            Dependency::required("Airspeed", DependencyKind::Parameter),
            Dependency::required("Altitude AAL", DependencyKind::Parameter),
        ]
    }

    fn derive(
        &self,
        instance: &NodeInstance,
        view: RunView<'_>,
    ) -> Result<NodeOutcome, DataError> {
        let airspeed = view
            .parameter("Airspeed")
            .expect("BUG: scheduler guarantees required dependency");
        let altitude = view
            .parameter("Altitude AAL")
            .expect("BUG: scheduler guarantees required dependency");
        let master_hz = view.config().master_hz;

        let mut kpvs = Vec::new();
        for band in slices_between(&altitude.samples, self.low_ft, self.high_ft) {
            // The band is on the altitude axis; hop via the master axis onto
            // the airspeed axis before searching.
            let master = crate::align::local_to_master(&band, master_hz, altitude);
            let Ok(slice) = master_to_local(master, master_hz, airspeed) else {
                continue;
            };
            if slice.is_empty() {
                continue;
            }
            if let Ok((idx, value)) = extremum(&airspeed.samples, slice, Extremum::Max) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::context::RunContext;
    use crate::node::NodeRegistry;
    use crate::scheduler::Resolver;
    use crate::signal::{Parameter, Phase, Section, TimeMarker};

    fn run(
        registry: NodeRegistry,
        params: Vec<Parameter>,
        phases: Vec<Phase>,
        markers: Vec<TimeMarker>,
    ) -> crate::store::ResultStore {
        let ctx = RunContext::new(AnalysisConfig::default(), params, phases, markers).unwrap();
        Resolver::new(&registry).run(ctx).unwrap()
    }

    #[test]
    fn test_airspeed_max_within_airborne() {
        // 1000 samples; the global maximum sits outside the phase and must
        // not win.
        let mut values: Vec<f64> = (0..1000).map(|i| 100.0 + (i % 97) as f64).collect();
        values[50] = 9999.0; // before liftoff
        values[400] = 321.0; // in-phase maximum
        let airspeed = Parameter::from_values("Airspeed", 1.0, values);
        let airborne = Phase::new("Airborne", vec![Section::new(100.0, 900.0)]);

        let mut reg = NodeRegistry::new();
        reg.register(Box::new(AirspeedMaxAirborne)).unwrap();
        let store = run(reg, vec![airspeed], vec![airborne], vec![]);

        let records = store.get_all("Airspeed Max");
        assert_eq!(records.len(), 1);
        assert!(records[0].index >= 100.0 && records[0].index < 900.0);
        assert_eq!(records[0].value, 321.0);
    }

    #[test]
    fn test_one_record_per_airborne_section() {
        let airspeed = Parameter::from_values("Airspeed", 1.0, (0..100).map(f64::from).collect());
        let airborne = Phase::new(
            "Airborne",
            vec![Section::new(10.0, 30.0), Section::new(50.0, 80.0)],
        );

        let mut reg = NodeRegistry::new();
        reg.register(Box::new(AirspeedMaxAirborne)).unwrap();
        let store = run(reg, vec![airspeed], vec![airborne], vec![]);
        assert_eq!(store.get_all("Airspeed Max").len(), 2);
    }

    #[test]
    fn test_airspeed_at_touchdown_interpolated() {
        let airspeed = Parameter::from_values("Airspeed", 1.0, vec![140.0, 130.0, 120.0, 110.0]);
        let touchdown = TimeMarker::new("Touchdown", vec![1.5]);

        let mut reg = NodeRegistry::new();
        reg.register(Box::new(AirspeedAtTouchdown)).unwrap();
        let store = run(reg, vec![airspeed], vec![], vec![touchdown]);

        let records = store.get_all("Airspeed At Touchdown");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 1.5);
        assert_eq!(records[0].value, 125.0);
    }

    #[test]
    fn test_band_max_during_descent() {
        let altitude = Parameter::from_values(
            "Altitude AAL",
            1.0,
            vec![1500.0, 1200.0, 900.0, 700.0, 550.0, 400.0, 200.0],
        );
        let airspeed =
            Parameter::from_values("Airspeed", 1.0, vec![250.0, 240.0, 230.0, 235.0, 220.0, 210.0, 200.0]);

        let mut reg = NodeRegistry::new();
        reg.register(Box::new(AirspeedBandMax::descent_1000_to_500()))
            .unwrap();
        let store = run(reg, vec![altitude, airspeed], vec![], vec![]);

        let records = store.get_all("Airspeed 1000 To 500 Ft Max");
        assert_eq!(records.len(), 1);
        // Band samples are indices 2..5; the fastest is 235 kt at index 3.
        assert_eq!(records[0].index, 3.0);
        assert_eq!(records[0].value, 235.0);
    }
}
