#![warn(clippy::pedantic)]

pub mod canonical;
pub mod error;
pub mod records;
pub mod values;
pub mod version;

pub use canonical::{
    CanonicalSample, VariableRecord, VariableRecordV1, VariableRecordV2, VariableValues,
};
pub use error::TypeError;
pub use records::{
    TimeSeriesEntry, VariableBase, VariableBlockV1, VariableEntryV2, VariableStateV2,
    VariableTypeV1,
};
pub use values::{ElementType, RawValueContainer, Scalar, TypedValues};
pub use version::ProtocolVersion;
