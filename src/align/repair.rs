//! Gap repair and continuous-run search over masked arrays.

use crate::error::DataError;
use crate::signal::Samples;
use std::ops::Range;

/// Produces a copy of `samples` where interior runs of invalid samples of
/// length at most `max_gap` are linearly interpolated from the valid samples
/// on either side. Longer runs, and leading/trailing runs (which have no
/// anchor on one side), remain invalid. Idempotent: repairing a repaired
/// array changes nothing.
pub fn repair_gaps(samples: &Samples, max_gap: usize) -> Samples {
    let mut values = samples.values().to_vec();
    let mut valid = samples.valid().to_vec();
    let len = values.len();

    let mut i = 0;
    while i < len {
        if valid[i] {
            i += 1;
            continue;
        }
        // Invalid run [i, j).
        let mut j = i;
        while j < len && !valid[j] {
            j += 1;
        }
        let anchored = i > 0 && j < len;
        if anchored && j - i <= max_gap {
            let left = values[i - 1];
            let right = values[j];
            let span = (j - i + 1) as f64;
            for (k, slot) in (i..j).enumerate() {
                let frac = (k + 1) as f64 / span;
                values[slot] = left + (right - left) * frac;
                valid[slot] = true;
            }
        }
        i = j;
    }

    Samples::new(values, valid)
}

/// The longest contiguous sub-range of `slice` whose samples are valid and
/// satisfy `predicate`. Returns `None` when no sample qualifies; callers
/// read that as a zero-duration result, not a failure. Ties resolve to the
/// earliest run.
pub fn longest_valid_run(
    samples: &Samples,
    slice: Range<usize>,
    predicate: impl Fn(f64) -> bool,
) -> Result<Option<Range<usize>>, DataError> {
    let (values, valid) = samples.window(slice.clone())?;

    let mut best: Option<Range<usize>> = None;
    let mut run_start: Option<usize> = None;

    for (i, (&v, &ok)) in values.iter().zip(valid).enumerate() {
        if ok && predicate(v) {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            if best.as_ref().map_or(true, |b| i - start > b.len()) {
                best = Some(slice.start + start..slice.start + i);
            }
        }
    }
    if let Some(start) = run_start {
        let end = values.len();
        if best.as_ref().map_or(true, |b| end - start > b.len()) {
            best = Some(slice.start + start..slice.start + end);
        }
    }

    Ok(best)
}
