//! Band slicing and axis conversion.

use crate::error::DataError;
use crate::signal::{Parameter, Samples};
use std::ops::Range;

/// Returns the index ranges where the reference signal traverses the band
/// `[low, high]` from one bound to the other.
///
/// A maximal in-band run qualifies only when the signal enters through one
/// bound and exits through the *other* — each monotonic crossing yields its
/// own range. Runs that never cross one of the bounds (dips that return the
/// way they came, or runs touching the array edges) are excluded, not
/// truncated. Invalid samples terminate a candidate run.
pub fn slices_between(reference: &Samples, low: f64, high: f64) -> Vec<Range<usize>> {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let values = reference.values();
    let valid = reference.valid();
    let len = values.len();

    let in_band = |i: usize| valid[i] && values[i] >= low && values[i] <= high;

    let mut out = Vec::new();
    let mut i = 0;
    while i < len {
        if !in_band(i) {
            i += 1;
            continue;
        }
        let start = i;
        while i < len && in_band(i) {
            i += 1;
        }
        // Run is [start, i). Qualify on the neighboring samples.
        if start == 0 || i == len {
            continue;
        }
        let (before, after) = (start - 1, i);
        if !valid[before] || !valid[after] {
            continue;
        }
        let entered_above = values[before] > high;
        let entered_below = values[before] < low;
        let exited_above = values[after] > high;
        let exited_below = values[after] < low;
        // Opposite sides only: a genuine traversal of the band.
        if (entered_above && exited_below) || (entered_below && exited_above) {
            out.push(start..i);
        }
    }
    out
}

/// Maps a half-open master-axis range onto a parameter's local sample
/// indices, honoring the parameter's rate and offset. The resulting range
/// must lie within the series; anything outside is `OutOfRange`.
pub fn master_to_local(
    master: Range<f64>,
    master_hz: f64,
    param: &Parameter,
) -> Result<Range<usize>, DataError> {
    let to_local = |m: f64| (m / master_hz - param.offset) * param.sample_rate;
    let start_f = to_local(master.start).ceil();
    let end_f = to_local(master.end).ceil();

    let len = param.len();
    if start_f < 0.0 || end_f < start_f || end_f > len as f64 {
        return Err(DataError::OutOfRange {
            start: start_f.max(0.0) as usize,
            end: end_f.max(0.0) as usize,
            len,
        });
    }
    Ok(start_f as usize..end_f as usize)
}

/// Maps a parameter-local sample range back onto the master axis. Inverse
/// of `master_to_local` up to the inward rounding; always in range.
pub fn local_to_master(local: &Range<usize>, master_hz: f64, param: &Parameter) -> Range<f64> {
    let to_master = |i: f64| (i / param.sample_rate + param.offset) * master_hz;
    to_master(local.start as f64)..to_master(local.end as f64)
}

/// Length of a local sample range in seconds.
pub fn duration_secs(range: &Range<usize>, sample_rate: f64) -> f64 {
    range.len() as f64 / sample_rate
}

/// Reads a series at a possibly fractional index, interpolating linearly
/// between the two neighboring samples. Either neighbor being invalid is
/// `NoValidData`; an index past the series end is `OutOfRange`.
pub fn value_at(samples: &Samples, index: f64) -> Result<f64, DataError> {
    let len = samples.len();
    if len == 0 || index < 0.0 || index > (len - 1) as f64 {
        return Err(DataError::OutOfRange {
            start: index.max(0.0) as usize,
            end: index.max(0.0) as usize + 1,
            len,
        });
    }
    let i0 = index.floor() as usize;
    let frac = index - i0 as f64;
    let v0 = samples.get(i0).ok_or(DataError::NoValidData)?;
    if frac == 0.0 {
        return Ok(v0);
    }
    let v1 = samples.get(i0 + 1).ok_or(DataError::NoValidData)?;
    Ok(v0 + (v1 - v0) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_band_window() {
        // Altitude descending 1200 -> 300: one "1000 To 500 Ft" window.
        let alt = Samples::fully_valid(vec![1200.0, 1100.0, 950.0, 800.0, 600.0, 450.0, 300.0]);
        let slices = slices_between(&alt, 500.0, 1000.0);
        assert_eq!(slices, vec![2..5]);
    }

    #[test]
    fn test_dip_without_full_crossing_excluded() {
        // Enters from above, leaves back above: no traversal.
        let alt = Samples::fully_valid(vec![1200.0, 900.0, 800.0, 1100.0]);
        assert!(slices_between(&alt, 500.0, 1000.0).is_empty());
    }

    #[test]
    fn test_edge_touching_run_excluded() {
        // Starts already inside the band.
        let alt = Samples::fully_valid(vec![900.0, 700.0, 400.0]);
        assert!(slices_between(&alt, 500.0, 1000.0).is_empty());
    }

    #[test]
    fn test_multiple_crossings_separate_ranges() {
        let alt = Samples::fully_valid(vec![
            1200.0, 800.0, 300.0, // down through the band
            700.0, 1100.0, // back up through it
        ]);
        let slices = slices_between(&alt, 500.0, 1000.0);
        assert_eq!(slices, vec![1..2, 3..4]);
    }

    #[test]
    fn test_invalid_neighbor_disqualifies() {
        let alt = Samples::new(
            vec![1200.0, 800.0, 300.0],
            vec![false, true, true],
        );
        assert!(slices_between(&alt, 500.0, 1000.0).is_empty());
    }

    #[test]
    fn test_no_zero_length_ranges() {
        let alt = Samples::fully_valid(vec![1200.0, 800.0, 300.0]);
        for s in slices_between(&alt, 500.0, 1000.0) {
            assert!(!s.is_empty());
        }
    }

    #[test]
    fn test_master_to_local_rate_and_offset() {
        // 4 Hz parameter, master axis at 1 Hz.
        let p = Parameter::from_values("Airspeed", 4.0, vec![0.0; 100]);
        assert_eq!(master_to_local(2.0..5.0, 1.0, &p).unwrap(), 8..20);

        // Offset shifts the local window left.
        let p = Parameter::new(
            "Airspeed",
            1.0,
            0.5,
            Samples::fully_valid(vec![0.0; 10]),
        );
        assert_eq!(master_to_local(1.0..3.0, 1.0, &p).unwrap(), 1..3);
    }

    #[test]
    fn test_master_to_local_out_of_range() {
        let p = Parameter::from_values("Airspeed", 1.0, vec![0.0; 10]);
        assert!(matches!(
            master_to_local(5.0..20.0, 1.0, &p),
            Err(DataError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_value_at_interpolates() {
        let s = Samples::fully_valid(vec![10.0, 20.0, 30.0]);
        assert_eq!(value_at(&s, 0.0).unwrap(), 10.0);
        assert_eq!(value_at(&s, 0.5).unwrap(), 15.0);
        assert_eq!(value_at(&s, 2.0).unwrap(), 30.0);
        assert!(matches!(
            value_at(&s, 2.5),
            Err(DataError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_value_at_empty_series_is_out_of_range() {
        let s = Samples::fully_valid(vec![]);
        assert!(matches!(
            value_at(&s, 0.0),
            Err(DataError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_value_at_invalid_neighbor() {
        let s = Samples::new(vec![10.0, 20.0], vec![true, false]);
        assert_eq!(value_at(&s, 0.5), Err(DataError::NoValidData));
    }

    #[test]
    fn test_duration_secs() {
        assert_eq!(duration_secs(&(4..12), 4.0), 2.0);
        assert_eq!(duration_secs(&(0..0), 4.0), 0.0);
    }
}
