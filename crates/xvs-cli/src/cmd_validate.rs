/// Implementation of `xvs validate`.
///
/// Decodes a record file without printing the canonical form and reports
/// either success checkmarks (`✓`) or one diagnostic line (`✗`). Exits
/// with code 0 on success and 1 on any error.
///
/// # Success output
///
/// ```text
/// ✓ Protocol: v2
/// ✓ Time series: 3 chunks, 5 streams
/// ```
///
/// ```text
/// ✓ Protocol: v1
/// ✓ Variable: 2 values
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: length mismatch — entry 1: 2 streams but 1 values
/// ```
use anyhow::{Result, anyhow};
use xvs_decoder::{DecodeError, StreamAccumulator, StreamParser};
use xvs_types::{TypeError, VariableRecord};

use crate::ValidateArgs;
use crate::input::{read_json, time_series_chunks};

/// Run the `xvs validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON, or if the
/// records fail to decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let doc = read_json(&args.file)?;
    let parser = StreamParser::current();

    let outcome = match parser.version() {
        Ok(version) => {
            println!("✓ Protocol: v{}", version.major());
            if doc.is_array() {
                check_time_series(&parser, &doc)
            } else {
                check_variable(&parser, &doc)
            }
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(summary) => {
            println!("✓ {summary}");
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

fn check_time_series(parser: &StreamParser, doc: &serde_json::Value) -> Result<String, DecodeError> {
    let chunks = time_series_chunks(doc);
    let mut accumulator = StreamAccumulator::new();
    for chunk in &chunks {
        parser.parse_time_series_json(chunk, &mut accumulator)?;
    }
    Ok(format!(
        "Time series: {} chunk{}, {} stream{}",
        chunks.len(),
        plural(chunks.len()),
        accumulator.len(),
        plural(accumulator.len())
    ))
}

fn check_variable(parser: &StreamParser, doc: &serde_json::Value) -> Result<String, DecodeError> {
    let count = match parser.parse_variable(doc, "/validate", 0)? {
        VariableRecord::V1(record) => record.variable.len(),
        VariableRecord::V2(record) => record.variable.iter().map(|v| v.values.len()).sum(),
    };
    Ok(format!("Variable: {count} value{}", plural(count)))
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a one-line diagnostic.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────┐
/// │ Variant                  │ Diagnostic prefix                    │
/// ├──────────────────────────┼──────────────────────────────────────┤
/// │ LengthMismatch           │ "length mismatch — "                 │
/// │ EmptyContainer           │ "empty value container"              │
/// │ UnsupportedVersion       │ "unsupported protocol version N"     │
/// │ MalformedRecord / other  │ "<error Display>"                    │
/// └──────────────────────────┴──────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::LengthMismatch { .. } => format!("length mismatch — {e}"),
        DecodeError::Type(TypeError::EmptyContainer) => {
            "empty value container (no doubles, int32s, bools or strings)".to_string()
        }
        DecodeError::Type(TypeError::UnsupportedVersion { major }) => {
            format!("unsupported protocol version {major} (expected 1 or 2)")
        }
        other => other.to_string(),
    }
}
