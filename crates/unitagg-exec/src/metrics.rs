//! Run-level metric events.
//!
//! Emitted as `tracing` events; wire a subscriber in the binary layer to ship
//! them anywhere.

use std::collections::BTreeMap;

pub fn emit(event: &str, key_values: &[(&str, String)]) {
    for (k, v) in key_values {
        tracing::trace!(event, key = %k, value = %v, "metric");
    }
}

/// Emit every counter of a finished run.
pub fn emit_counters(event: &str, counters: &BTreeMap<String, u64>) {
    let kv: Vec<(&str, String)> = counters
        .iter()
        .map(|(k, v)| (k.as_str(), v.to_string()))
        .collect();
    emit(event, &kv);
}
