//! Time markers: named, ordered sets of single master-axis indices marking
//! discrete events (e.g. every "Liftoff").

#[derive(Debug, Clone, PartialEq)]
pub struct TimeMarker {
    pub name: String,
    indices: Vec<f64>,
}

impl TimeMarker {
    pub fn new(name: impl Into<String>, mut indices: Vec<f64>) -> Self {
        indices.sort_by(f64::total_cmp);
        Self {
            name: name.into(),
            indices,
        }
    }

    pub fn indices(&self) -> &[f64] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Ordinal lookup: the n-th occurrence in time order.
    pub fn get(&self, ordinal: usize) -> Option<f64> {
        self.indices.get(ordinal).copied()
    }

    pub fn first(&self) -> Option<f64> {
        self.indices.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.indices.last().copied()
    }

    /// The occurrence closest to `index`. Ties resolve to the earlier one.
    pub fn nearest(&self, index: f64) -> Option<f64> {
        self.indices
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - index)
                    .abs()
                    .total_cmp(&(b - index).abs())
                    .then(a.total_cmp(b))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_and_nearest() {
        let m = TimeMarker::new("Liftoff", vec![850.0, 120.0]);
        assert_eq!(m.get(0), Some(120.0));
        assert_eq!(m.get(1), Some(850.0));
        assert_eq!(m.get(2), None);
        assert_eq!(m.nearest(200.0), Some(120.0));
        assert_eq!(m.nearest(800.0), Some(850.0));
        // Equidistant: earlier occurrence wins.
        assert_eq!(m.nearest(485.0), Some(120.0));
    }
}
