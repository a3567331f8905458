//! `Samples` (masked array) and `Parameter` (named, rated time series).

use crate::error::DataError;
use std::ops::Range;

/// A raw masked array: sample values plus a parallel validity mask.
///
/// Invariant: `values.len() == valid.len()`, enforced at construction.
/// Invalid samples must never feed an extremum search directly; the align
/// layer either excludes them or repairs them first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Samples {
    values: Vec<f64>,
    valid: Vec<bool>,
}

impl Samples {
    pub fn new(values: Vec<f64>, valid: Vec<bool>) -> Self {
        assert_eq!(
            values.len(),
            valid.len(),
            "values and validity mask must have equal length"
        );
        Self { values, valid }
    }

    /// All samples valid.
    pub fn fully_valid(values: Vec<f64>) -> Self {
        let valid = vec![true; values.len()];
        Self { values, valid }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn valid(&self) -> &[bool] {
        &self.valid
    }

    #[inline]
    pub fn is_valid(&self, idx: usize) -> bool {
        self.valid.get(idx).copied().unwrap_or(false)
    }

    /// Value at `idx` if the sample exists and is valid.
    pub fn get(&self, idx: usize) -> Option<f64> {
        if self.is_valid(idx) {
            Some(self.values[idx])
        } else {
            None
        }
    }

    /// Bounds-checks `range` against the series. Out-of-range access is an
    /// error, never a clamp.
    pub fn check_range(&self, range: &Range<usize>) -> Result<(), DataError> {
        if range.end > self.values.len() || range.start > range.end {
            return Err(DataError::OutOfRange {
                start: range.start,
                end: range.end,
                len: self.values.len(),
            });
        }
        Ok(())
    }

    /// Windowed access to `(values, valid)` within `range`.
    pub fn window(&self, range: Range<usize>) -> Result<(&[f64], &[bool]), DataError> {
        self.check_range(&range)?;
        Ok((&self.values[range.clone()], &self.valid[range]))
    }
}

/// A named, continuous time series. Immutable once loaded for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// Samples per second.
    pub sample_rate: f64,
    /// Sub-second start alignment relative to the master axis, in seconds.
    pub offset: f64,
    pub samples: Samples,
}

impl Parameter {
    pub fn new(name: impl Into<String>, sample_rate: f64, offset: f64, samples: Samples) -> Self {
        Self {
            name: name.into(),
            sample_rate,
            offset,
            samples,
        }
    }

    /// Convenience constructor for a fully valid series.
    pub fn from_values(name: impl Into<String>, sample_rate: f64, values: Vec<f64>) -> Self {
        Self::new(name, sample_rate, 0.0, Samples::fully_valid(values))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
