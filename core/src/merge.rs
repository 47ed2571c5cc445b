//! Deep merge of partial stub payloads onto canonical fixtures.
//!
//! A stub only needs to name the fields a test cares about; everything else
//! inherits from the packaged fixture. Objects merge recursively
//! key-by-key with the stub side winning; any non-object value replaces the
//! fixture subtree wholesale.

use serde_json::Value;

use crate::error::Result;
use crate::fixtures;
use crate::operation::{Operation, Outcome};
use crate::payload::normalize_root;

/// Merge `partial` onto the canonical fixture for `(operation, outcome)`.
///
/// Both sides are root-normalized first, so an array stub merges against an
/// array fixture the same way object documents do.
pub fn merge_fixture(partial: Value, operation: Operation, outcome: Outcome) -> Result<Value> {
    let base = fixtures::load_default(operation, outcome)?;
    Ok(deep_merge(normalize_root(base), normalize_root(partial)))
}

fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}
