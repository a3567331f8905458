//! The per-run collection of produced key point values.

pub mod results;

pub use results::ResultStore;
