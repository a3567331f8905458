//! The output record type.

use serde::{Deserialize, Serialize};

/// A single point-in-time measurement produced by a node computation.
///
/// `index` is on the producing parameter's own sample axis and may be
/// fractional when the event was interpolated between samples. `name` is the
/// node's declared identity, or a resolved instantiation of its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPointValue {
    pub index: f64,
    pub value: f64,
    pub name: String,
}

impl KeyPointValue {
    pub fn new(index: f64, value: f64, name: impl Into<String>) -> Self {
        Self {
            index,
            value,
            name: name.into(),
        }
    }
}
