//! Flight phases: named, ordered sets of `[start, stop)` intervals on the
//! master time axis.

/// One `[start, stop)` interval. Indices are master-axis positions and may
/// be fractional (a phase can begin between two samples).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub start: f64,
    pub stop: f64,
}

impl Section {
    pub fn new(start: f64, stop: f64) -> Self {
        assert!(start <= stop, "section start must not exceed stop");
        Self { start, stop }
    }

    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    pub fn contains(&self, index: f64) -> bool {
        index >= self.start && index < self.stop
    }
}

/// A named collection of sections, ordered by start index. Multiple sections
/// of the same name coexist (e.g. two takeoffs in one recording).
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub name: String,
    sections: Vec<Section>,
}

impl Phase {
    pub fn new(name: impl Into<String>, mut sections: Vec<Section>) -> Self {
        sections.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self {
            name: name.into(),
            sections,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The section covering `index`, if any.
    pub fn covering(&self, index: f64) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(index))
    }
}
