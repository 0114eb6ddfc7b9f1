/// Implementation of `xvs variable`.
///
/// Reads one variable block and normalizes it under the protocol version
/// selected by `--major-version`. The block must have the shape of that
/// version:
///
/// ```text
/// ┌───────┬───────────────────────────────────────────────────────────┐
/// │ Major │ Block                                                     │
/// ├───────┼───────────────────────────────────────────────────────────┤
/// │ 1     │ {"timestamps": [..], "type": "float", "values": [..]}     │
/// │ 2     │ {"variables": [{"values": {"doubles": [..]}, "base": ..}]} │
/// └───────┴───────────────────────────────────────────────────────────┘
/// ```
use anyhow::{Context, Result};
use xvs_decoder::StreamParser;

use crate::VariableArgs;
use crate::input::{read_json, write_json};

/// Run the `xvs variable` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, the version
/// is unsupported, or the block fails to decode.
pub fn run(args: &VariableArgs) -> Result<()> {
    let block = read_json(&args.file)?;
    let parser = StreamParser::current();

    let record = parser
        .parse_variable(&block, &args.stream, args.time)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    write_json(&record, args.pretty)
}
