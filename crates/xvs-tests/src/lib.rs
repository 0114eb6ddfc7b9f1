//! Shared helpers for the XVS integration tests and benches.

use std::path::Path;

use xvs_types::{TimeSeriesEntry, TypedValues, VariableEntryV2, VariableStateV2};

/// Read `tests/fixtures/<name>` as JSON.
///
/// # Panics
///
/// Panics if the fixture is missing or is not valid JSON.
pub fn fixture(name: &str) -> serde_json::Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("fixture {} is not valid JSON: {e}", path.display()))
}

/// `count` time-series entries, each fanning `width` doubles out over
/// `width` streams. Stream names repeat every entry, so later entries
/// overwrite earlier samples.
pub fn synthetic_time_series(count: usize, width: usize) -> Vec<TimeSeriesEntry> {
    (0..count)
        .map(|i| {
            let streams = (0..width).map(|s| format!("/synthetic/stream_{s}"));
            #[allow(clippy::cast_precision_loss)]
            let values = (0..width).map(|s| (i * width + s) as f64).collect();
            TimeSeriesEntry::new(i as i64, streams, TypedValues::Doubles(values))
        })
        .collect()
}

/// A v2 variable block with `count` entries of `len` values each,
/// cycling through the four element types.
pub fn synthetic_variable_v2(count: usize, len: usize) -> VariableStateV2 {
    let variables = (0..count)
        .map(|i| {
            let values = match i % 4 {
                #[allow(clippy::cast_precision_loss)]
                0 => TypedValues::Doubles((0..len).map(|v| v as f64).collect()),
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                1 => TypedValues::Int32s((0..len).map(|v| v as i32).collect()),
                2 => TypedValues::Bools((0..len).map(|v| v % 2 == 0).collect()),
                _ => TypedValues::Strings((0..len).map(|v| format!("value {v}")).collect()),
            };
            let entry = VariableEntryV2::new(values);
            if i % 2 == 0 {
                entry
            } else {
                entry.with_object_id(format!("object-{i}"))
            }
        })
        .collect();
    VariableStateV2 { variables }
}
