//! Size Estimator Module
//!
//! Computes the memory footprint charged against the byte budget for a
//! [`Payload`]. Each payload kind has its own rule; the JSON kind is the
//! best-effort fallback and is reported as degraded.

use serde_json::Value;

use crate::payload::Payload;

// == Size Estimate ==
/// Result of sizing a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEstimate {
    /// Bytes charged against the budget
    pub bytes: u64,
    /// True when the generic fallback probe was used
    pub degraded: bool,
}

// == Estimate ==
/// Estimates the size of a payload in bytes.
///
/// - Tensors: element count × element width
/// - Byte buffers: buffer length
/// - JSON: deep walk over the tree (degraded)
pub fn estimate(value: &Payload) -> SizeEstimate {
    match value {
        Payload::Tensor { data, .. } => SizeEstimate {
            bytes: (data.len() * data.element_width()) as u64,
            degraded: false,
        },
        Payload::Bytes { data } => SizeEstimate {
            bytes: data.len() as u64,
            degraded: false,
        },
        Payload::Json { value } => SizeEstimate {
            bytes: json_deep_size(value) as u64,
            degraded: true,
        },
    }
}

/// Node header plus owned string and key bytes, summed over the tree.
fn json_deep_size(value: &Value) -> usize {
    let owned = match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        Value::String(s) => s.len(),
        Value::Array(items) => items.iter().map(json_deep_size).sum(),
        Value::Object(map) => map.iter().map(|(k, v)| k.len() + json_deep_size(v)).sum(),
    };
    std::mem::size_of::<Value>() + owned
}
