use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Read and parse a JSON record file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Split a time-series document into chunks.
///
/// An array whose elements are all arrays is a list of chunks; any other
/// value is a single chunk. An empty array is one empty chunk.
pub fn time_series_chunks(doc: &serde_json::Value) -> Vec<&serde_json::Value> {
    match doc.as_array() {
        Some(items) if !items.is_empty() && items.iter().all(serde_json::Value::is_array) => {
            items.iter().collect()
        }
        _ => vec![doc],
    }
}

/// Serialize `value` as JSON to stdout, followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(rendered.as_bytes())
        .context("cannot write to stdout")?;
    handle.write_all(b"\n").context("cannot write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_array_is_one_chunk() {
        let doc = json!([{ "timestamp": 1 }, { "timestamp": 2 }]);
        assert_eq!(time_series_chunks(&doc).len(), 1);
    }

    #[test]
    fn nested_arrays_are_chunks() {
        let doc = json!([[{ "timestamp": 1 }], [], [{ "timestamp": 2 }]]);
        assert_eq!(time_series_chunks(&doc).len(), 3);
    }

    #[test]
    fn empty_array_is_one_chunk() {
        let doc = json!([]);
        assert_eq!(time_series_chunks(&doc), vec![&doc]);
    }
}
