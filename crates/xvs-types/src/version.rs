use crate::error::TypeError;

/// Protocol generation governing the wire shape of variable records.
///
/// ```text
/// ┌───────┬─────────────────────────────────────────────────────┐
/// │ Major │ Variable block shape                                │
/// ├───────┼─────────────────────────────────────────────────────┤
/// │ 1     │ { timestamps, type, values } parallel arrays        │
/// │ 2     │ { variables: [{ values: <container>, base? }] }     │
/// └───────┴─────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    V1,
    V2,
}

impl ProtocolVersion {
    pub fn major(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    /// Map a major version number to a [`ProtocolVersion`].
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::UnsupportedVersion`] for anything but 1 or 2.
    pub fn from_major(major: u32) -> Result<Self, TypeError> {
        match major {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(TypeError::UnsupportedVersion { major: other }),
        }
    }
}
