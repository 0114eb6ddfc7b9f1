use serde::Deserialize;

use crate::error::TypeError;
use crate::values::{ElementType, RawValueContainer, TypedValues};

/// One timestamped block of a time-series stream record.
///
/// The block fans a single value container out across several streams:
/// position `i` of the decoded values belongs to `streams[i]`.
///
/// ```text
/// {
///   "timestamp": 1001,
///   "streams": ["/vehicle/speed", "/vehicle/accel"],
///   "values": { "doubles": [12.5, 0.3] },
///   "object_id": "car-7"            ← optional
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimeSeriesEntry {
    pub timestamp: i64,
    pub streams: Vec<String>,
    pub values: RawValueContainer,
    #[serde(default)]
    pub object_id: Option<String>,
}

impl TimeSeriesEntry {
    pub fn new<S: Into<String>>(
        timestamp: i64,
        streams: impl IntoIterator<Item = S>,
        values: impl Into<RawValueContainer>,
    ) -> Self {
        Self {
            timestamp,
            streams: streams.into_iter().map(Into::into).collect(),
            values: values.into(),
            object_id: None,
        }
    }

    /// Associate every sample in this entry with a tracked object.
    #[must_use]
    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }
}

/// Object association carried by a v2 variable entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct VariableBase {
    #[serde(default)]
    pub object_id: Option<String>,
}

/// One entry of a v2 variable block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableEntryV2 {
    pub values: RawValueContainer,
    #[serde(default)]
    pub base: Option<VariableBase>,
}

impl VariableEntryV2 {
    pub fn new(values: impl Into<RawValueContainer>) -> Self {
        Self {
            values: values.into(),
            base: None,
        }
    }

    #[must_use]
    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.base = Some(VariableBase {
            object_id: Some(object_id.into()),
        });
        self
    }

    /// The entry's object id, if it has a `base` carrying one.
    pub fn object_id(&self) -> Option<&str> {
        self.base.as_ref().and_then(|b| b.object_id.as_deref())
    }
}

/// A v2 variable block: an ordered list of independently typed entries.
///
/// ```text
/// {
///   "variables": [
///     { "values": { "doubles": [10, 11, 12] } },
///     { "values": { "strings": ["a", "b"] }, "base": { "object_id": "123" } }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct VariableStateV2 {
    pub variables: Vec<VariableEntryV2>,
}

/// Declared element type of a v1 variable block.
///
/// ```text
/// ┌────────┬──────────────┐
/// │ Wire   │ Element type │
/// ├────────┼──────────────┤
/// │ string │ String       │
/// │ bool   │ Bool         │
/// │ float  │ Double       │
/// └────────┴──────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableTypeV1 {
    String,
    Bool,
    Float,
}

impl VariableTypeV1 {
    pub fn element_type(self) -> ElementType {
        match self {
            Self::String => ElementType::String,
            Self::Bool => ElementType::Bool,
            Self::Float => ElementType::Double,
        }
    }
}

/// A v1 variable block: parallel timestamp and value arrays with an
/// explicitly declared element type.
///
/// The values stay as raw JSON until [`typed_values`](Self::typed_values)
/// reads them against `value_type`, since the declared type, not the JSON
/// value, decides how each element is interpreted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableBlockV1 {
    pub timestamps: Vec<i64>,
    #[serde(rename = "type")]
    pub value_type: VariableTypeV1,
    pub values: Vec<serde_json::Value>,
}

impl VariableBlockV1 {
    /// Interpret `values` according to the declared type.
    ///
    /// `float` blocks accept any JSON number, integral or not.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::ValueTypeMismatch`] for the first value that
    /// does not fit the declared type.
    pub fn typed_values(&self) -> Result<TypedValues, TypeError> {
        let expected = self.value_type.element_type();
        let mismatch = |index| TypeError::ValueTypeMismatch { index, expected };

        match self.value_type {
            VariableTypeV1::Float => self
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| v.as_f64().ok_or_else(|| mismatch(i)))
                .collect::<Result<_, _>>()
                .map(TypedValues::Doubles),
            VariableTypeV1::Bool => self
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| v.as_bool().ok_or_else(|| mismatch(i)))
                .collect::<Result<_, _>>()
                .map(TypedValues::Bools),
            VariableTypeV1::String => self
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| v.as_str().map(str::to_string).ok_or_else(|| mismatch(i)))
                .collect::<Result<_, _>>()
                .map(TypedValues::Strings),
        }
    }
}
