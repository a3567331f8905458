//! Extremum search within a slice of a masked array.

use crate::error::DataError;
use crate::signal::Samples;
use std::ops::Range;

/// Which extreme to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
    /// Greatest absolute value; the returned value keeps its sign.
    MaxAbs,
}

/// Returns `(index, value)` of the extreme valid sample within `slice`.
///
/// Ties resolve to the first qualifying index. Invalid samples are excluded.
/// A slice with no valid samples is `NoValidData`; a slice past the series
/// end is `OutOfRange`, never clamped.
pub fn extremum(
    samples: &Samples,
    slice: Range<usize>,
    mode: Extremum,
) -> Result<(usize, f64), DataError> {
    let (values, valid) = samples.window(slice.clone())?;

    let mut best: Option<(usize, f64)> = None;
    for (i, (&v, &ok)) in values.iter().zip(valid).enumerate() {
        if !ok {
            continue;
        }
        let better = match best {
            None => true,
            // Strict comparison keeps the first index on ties.
            Some((_, b)) => match mode {
                Extremum::Max => v > b,
                Extremum::Min => v < b,
                Extremum::MaxAbs => v.abs() > b.abs(),
            },
        };
        if better {
            best = Some((slice.start + i, v));
        }
    }

    best.ok_or(DataError::NoValidData)
}
