use xvs_types::error::TypeError;

/// Errors that can occur while normalizing stream records.
///
/// Every variant is a structural contract violation that upstream schema
/// validation should have caught. None of them is recoverable inside a
/// parse call: the call returns the error and no partial canonical output.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── LengthMismatch     ← stream/timestamp count ≠ decoded value count
///   ├── MalformedRecord    ← raw JSON is not the shape the version expects
///   └── Type(TypeError)    ← from xvs-types payload decoding
///         ├── EmptyContainer
///         ├── ValueTypeMismatch
///         └── UnsupportedVersion
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The number of keys did not match the number of decoded values.
    ///
    /// `keys` names what the values are paired with: `"streams"` for a
    /// time-series entry, `"timestamps"` for a v1 variable block. `index`
    /// is the position of the offending entry within the call's input
    /// (always 0 for a v1 block).
    #[error("entry {index}: {key_count} {keys} but {value_count} values")]
    LengthMismatch {
        keys: &'static str,
        index: usize,
        key_count: usize,
        value_count: usize,
    },

    /// A raw JSON record could not be read as the expected record shape.
    ///
    /// `record` names the shape that was expected. `stream` is set when
    /// the record belongs to a named stream.
    #[error("malformed {record} record{}: {source}", fmt_stream(.stream.as_deref()))]
    MalformedRecord {
        record: &'static str,
        stream: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    /// A payload-level error from `xvs-types`.
    ///
    /// Covers empty value containers, v1 values of the wrong type, and
    /// unsupported protocol versions.
    #[error(transparent)]
    Type(#[from] TypeError),
}

fn fmt_stream(stream: Option<&str>) -> String {
    stream.map(|s| format!(" for stream {s}")).unwrap_or_default()
}
