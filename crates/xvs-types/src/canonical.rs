use serde::Serialize;

use crate::values::{Scalar, TypedValues};

/// The latest sample seen for one time-series stream.
///
/// ```text
/// "/vehicle/speed": { "time": 1001, "variable": 12.5, "id": "car-7" }
/// ```
///
/// `id` is left out of serialized output when the entry carried no
/// `object_id`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalSample {
    pub time: i64,
    pub variable: Scalar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One decoded entry of a v2 variable record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableValues {
    pub values: TypedValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Canonical form of a v2 variable block.
///
/// `time` is the caller-supplied block time; entries keep the order they
/// had on the wire.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableRecordV2 {
    pub time: i64,
    pub variable: Vec<VariableValues>,
}

/// Canonical form of a v1 variable block.
///
/// Each pair is `(timestamp, value)` taken from the block's parallel
/// arrays and serializes as a two-element JSON array. The outer `time` is
/// the caller's grouping time and is unrelated to the pair timestamps.
///
/// ```text
/// { "time": 1001, "variable": [[1011, "Right"], [1021, "Left"]] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableRecordV1 {
    pub time: i64,
    pub variable: Vec<(i64, Scalar)>,
}

/// A canonical variable record of either protocol generation.
///
/// Serializes untagged: the JSON form is that of the inner record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VariableRecord {
    V1(VariableRecordV1),
    V2(VariableRecordV2),
}

impl VariableRecord {
    /// The record's top-level grouping time.
    pub fn time(&self) -> i64 {
        match self {
            Self::V1(r) => r.time,
            Self::V2(r) => r.time,
        }
    }

    pub fn as_v1(&self) -> Option<&VariableRecordV1> {
        match self {
            Self::V1(r) => Some(r),
            Self::V2(_) => None,
        }
    }

    pub fn as_v2(&self) -> Option<&VariableRecordV2> {
        match self {
            Self::V2(r) => Some(r),
            Self::V1(_) => None,
        }
    }
}

impl From<VariableRecordV1> for VariableRecord {
    fn from(record: VariableRecordV1) -> Self {
        Self::V1(record)
    }
}

impl From<VariableRecordV2> for VariableRecord {
    fn from(record: VariableRecordV2) -> Self {
        Self::V2(record)
    }
}
