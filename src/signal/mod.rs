//! Typed time-series, interval and marker containers for one flight.

pub mod kpv;
pub mod marker;
pub mod parameter;
pub mod phase;

pub use kpv::KeyPointValue;
pub use marker::TimeMarker;
pub use parameter::{Parameter, Samples};
pub use phase::{Phase, Section};
