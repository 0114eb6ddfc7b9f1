/// Implementation of `xvs timeseries`.
///
/// Reads a JSON file of time-series entries, folds every chunk into one
/// [`StreamAccumulator`] in file order, and prints the accumulator as a
/// JSON object of stream name to latest sample:
///
/// ```text
/// {"/test/bools":{"time":1003,"variable":false},"/test/strings":{"time":1004,"variable":"test string","id":"123"}}
/// ```
use anyhow::{Context, Result};
use xvs_decoder::{StreamAccumulator, StreamParser};

use crate::TimeseriesArgs;
use crate::input::{read_json, time_series_chunks, write_json};

/// Run the `xvs timeseries` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or any chunk
/// fails to decode. Nothing is printed on error.
pub fn run(args: &TimeseriesArgs) -> Result<()> {
    let doc = read_json(&args.file)?;
    let parser = StreamParser::current();
    let mut accumulator = StreamAccumulator::new();

    for (i, chunk) in time_series_chunks(&doc).into_iter().enumerate() {
        parser
            .parse_time_series_json(chunk, &mut accumulator)
            .with_context(|| format!("chunk {i} of {}", args.file.display()))?;
    }

    log::debug!("{} stream(s) in {}", accumulator.len(), args.file.display());
    write_json(&accumulator, args.pretty)
}
