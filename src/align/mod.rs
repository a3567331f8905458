//! Pure slicing, extremum and gap-repair primitives shared by every rule.
//!
//! All functions take their input arrays by reference and never mutate them;
//! repaired or derived arrays are always new values.

pub mod extremum;
pub mod repair;
pub mod slices;

pub use extremum::{extremum, Extremum};
pub use repair::{longest_valid_run, repair_gaps};
pub use slices::{duration_secs, local_to_master, master_to_local, slices_between, value_at};
