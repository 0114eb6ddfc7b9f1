use std::sync::atomic::{AtomicU32, Ordering};

use xvs_types::ProtocolVersion;

use crate::error::DecodeError;

/// Major version reported before anything calls
/// [`set_current_major_version`].
pub const DEFAULT_MAJOR_VERSION: u32 = 2;

static CURRENT_MAJOR_VERSION: AtomicU32 = AtomicU32::new(DEFAULT_MAJOR_VERSION);

/// Set the process-wide protocol major version.
///
/// Any value is accepted here; an unsupported one surfaces as
/// `TypeError::UnsupportedVersion` from the next parse call that snapshots
/// it. Calls already in progress are unaffected because each call works
/// from a [`VersionContext`] captured at entry.
pub fn set_current_major_version(major: u32) {
    log::debug!("protocol major version set to {major}");
    CURRENT_MAJOR_VERSION.store(major, Ordering::SeqCst);
}

/// The process-wide protocol major version.
pub fn current_major_version() -> u32 {
    CURRENT_MAJOR_VERSION.load(Ordering::SeqCst)
}

/// An immutable snapshot of the protocol major version for one parse call
/// or one parsing session.
///
/// ```text
/// ┌────────────┬─────────────────────────────────────────┐
/// │ Constructor│ Source                                  │
/// ├────────────┼─────────────────────────────────────────┤
/// │ current    │ process-wide setting, read once         │
/// │ new        │ an explicit ProtocolVersion             │
/// │ from_major │ a raw major number, checked on use      │
/// └────────────┴─────────────────────────────────────────┘
/// ```
///
/// The raw number is kept unchecked so an unsupported setting is reported
/// by the parse call that relies on it, not when the snapshot is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionContext {
    major: u32,
}

impl VersionContext {
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            major: version.major(),
        }
    }

    pub fn from_major(major: u32) -> Self {
        Self { major }
    }

    /// Snapshot the process-wide setting.
    pub fn current() -> Self {
        Self::from_major(current_major_version())
    }

    pub fn major(self) -> u32 {
        self.major
    }

    /// The protocol generation this snapshot selects.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::UnsupportedVersion` (wrapped in
    /// [`DecodeError::Type`]) when the major version is not 1 or 2.
    pub fn protocol_version(self) -> Result<ProtocolVersion, DecodeError> {
        Ok(ProtocolVersion::from_major(self.major)?)
    }
}

impl Default for VersionContext {
    /// The snapshot of the current process-wide setting.
    fn default() -> Self {
        Self::current()
    }
}

impl From<ProtocolVersion> for VersionContext {
    fn from(version: ProtocolVersion) -> Self {
        Self::new(version)
    }
}
