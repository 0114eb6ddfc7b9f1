use crate::values::ElementType;

/// Errors that can occur when turning wire-shaped stream payloads into
/// typed values.
///
/// These are lower-level than the decoder's `DecodeError`: they deal with
/// a single value container or a single declared value type, never with
/// how values line up against stream names or timestamps. A `DecodeError`
/// wraps a `TypeError` when the problem originates in one payload.
///
/// # Error hierarchy
///
/// ```text
/// ┌───────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                                │
/// │   ├── EmptyContainer for a container with no variant  │
/// │   ├── ValueTypeMismatch for a v1 value of wrong type  │
/// │   └── UnsupportedVersion for a major version ∉ {1,2}  │
/// └───────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// None of `doubles`, `int32s`, `bools` or `strings` was present.
    ///
    /// Upstream validation requires exactly one populated variant, so this
    /// indicates a record that bypassed or slipped through the validator.
    #[error("value container has no populated variant")]
    EmptyContainer,

    /// A v1 variable value did not match the block's declared type.
    ///
    /// The index is the position within the block's `values` array.
    #[error("value at index {index} is not of declared type {expected}")]
    ValueTypeMismatch { index: usize, expected: ElementType },

    /// The protocol version context reported a major version this crate
    /// has no record shapes for.
    #[error("unsupported protocol major version: {major}")]
    UnsupportedVersion { major: u32 },
}
