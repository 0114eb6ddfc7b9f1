#![no_main]

use libfuzzer_sys::fuzz_target;
use xvs_decoder::{StreamAccumulator, StreamParser, VersionContext};

// Fuzz target: raw JSON records through every parser entry point.
//
// Input format:
//   - First byte: protocol major version (taken modulo 4, so 0 and 3
//     exercise the unsupported-version path)
//   - Remaining bytes: JSON text
//
// Catches bugs in:
// - Value container precedence and empty-container handling
// - Stream/value and timestamp/value length checks
// - v1 declared-type conversion
// - Accumulator atomicity on failure
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let parser = StreamParser::new(VersionContext::from_major(u32::from(data[0] % 4)));
    let Ok(record) = serde_json::from_slice::<serde_json::Value>(&data[1..]) else {
        return;
    };

    let mut accumulator = StreamAccumulator::new();
    let before = accumulator.clone();
    if parser.parse_time_series_json(&record, &mut accumulator).is_err() {
        assert_eq!(accumulator, before, "failed call must not modify the accumulator");
    }

    let _ = parser.parse_variable(&record, "/fuzz", 0);
});
