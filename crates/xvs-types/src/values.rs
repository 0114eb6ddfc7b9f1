use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Element type of a decoded value sequence.
///
/// ```text
/// ┌──────────┬─────────┬─────────────┐
/// │ Variant  │ Wire    │ Rust type   │
/// ├──────────┼─────────┼─────────────┤
/// │ Double   │ doubles │ f64         │
/// │ Int32    │ int32s  │ i32         │
/// │ Bool     │ bools   │ bool        │
/// │ String   │ strings │ String      │
/// └──────────┴─────────┴─────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Double,
    Int32,
    Bool,
    String,
}

impl ElementType {
    /// The wire field name of the container variant holding this type.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Double => "doubles",
            Self::Int32 => "int32s",
            Self::Bool => "bools",
            Self::String => "strings",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The value container exactly as it appears on the wire.
///
/// Four optional typed arrays, of which a valid record populates exactly
/// one. A variant counts as populated when its key is present with an
/// array value, even a zero-length one; `null` and a missing key are both
/// treated as absent.
///
/// Use [`decode`](Self::decode) to obtain the explicit sum type.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawValueContainer {
    pub doubles: Option<Vec<f64>>,
    pub int32s: Option<Vec<i32>>,
    pub bools: Option<Vec<bool>>,
    pub strings: Option<Vec<String>>,
}

impl RawValueContainer {
    /// Decode the container into its single typed sequence.
    ///
    /// When more than one variant is populated the first one in the order
    /// `doubles > int32s > bools > strings` wins. Records carrying several
    /// variants are outside the protocol, but resolving them by a fixed
    /// order keeps decoding deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::EmptyContainer`] if no variant is populated.
    pub fn decode(&self) -> Result<TypedValues, TypeError> {
        let populated = self.populated();
        if populated.len() > 1 {
            log::debug!(
                "value container has {} populated variants {:?}, keeping {}",
                populated.len(),
                populated,
                populated[0]
            );
        }

        if let Some(v) = &self.doubles {
            return Ok(TypedValues::Doubles(v.clone()));
        }
        if let Some(v) = &self.int32s {
            return Ok(TypedValues::Int32s(v.clone()));
        }
        if let Some(v) = &self.bools {
            return Ok(TypedValues::Bools(v.clone()));
        }
        if let Some(v) = &self.strings {
            return Ok(TypedValues::Strings(v.clone()));
        }
        Err(TypeError::EmptyContainer)
    }

    /// Element types of every populated variant, in precedence order.
    pub fn populated(&self) -> Vec<ElementType> {
        let mut out = Vec::with_capacity(1);
        if self.doubles.is_some() {
            out.push(ElementType::Double);
        }
        if self.int32s.is_some() {
            out.push(ElementType::Int32);
        }
        if self.bools.is_some() {
            out.push(ElementType::Bool);
        }
        if self.strings.is_some() {
            out.push(ElementType::String);
        }
        out
    }
}

impl From<TypedValues> for RawValueContainer {
    /// Build a single-variant container holding `values`.
    fn from(values: TypedValues) -> Self {
        let mut raw = Self::default();
        match values {
            TypedValues::Doubles(v) => raw.doubles = Some(v),
            TypedValues::Int32s(v) => raw.int32s = Some(v),
            TypedValues::Bools(v) => raw.bools = Some(v),
            TypedValues::Strings(v) => raw.strings = Some(v),
        }
        raw
    }
}

/// A decoded value sequence with its element type made explicit.
///
/// Serializes untagged, as the bare JSON array, so canonical output reads
/// like the protocol's own value arrays.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValues {
    Doubles(Vec<f64>),
    Int32s(Vec<i32>),
    Bools(Vec<bool>),
    Strings(Vec<String>),
}

impl TypedValues {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Doubles(_) => ElementType::Double,
            Self::Int32s(_) => ElementType::Int32,
            Self::Bools(_) => ElementType::Bool,
            Self::Strings(_) => ElementType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Doubles(v) => v.len(),
            Self::Int32s(v) => v.len(),
            Self::Bools(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value at `index` as a [`Scalar`], or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        match self {
            Self::Doubles(v) => v.get(index).copied().map(Scalar::Double),
            Self::Int32s(v) => v.get(index).copied().map(Scalar::Int32),
            Self::Bools(v) => v.get(index).copied().map(Scalar::Bool),
            Self::Strings(v) => v.get(index).cloned().map(Scalar::String),
        }
    }

    /// Split the sequence into one [`Scalar`] per element, in order.
    pub fn into_scalars(self) -> Vec<Scalar> {
        match self {
            Self::Doubles(v) => v.into_iter().map(Scalar::Double).collect(),
            Self::Int32s(v) => v.into_iter().map(Scalar::Int32).collect(),
            Self::Bools(v) => v.into_iter().map(Scalar::Bool).collect(),
            Self::Strings(v) => v.into_iter().map(Scalar::String).collect(),
        }
    }
}

/// A single typed value: one element of a [`TypedValues`] sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Double(f64),
    Int32(i32),
    Bool(bool),
    String(String),
}

impl Scalar {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Double(_) => ElementType::Double,
            Self::Int32(_) => ElementType::Int32,
            Self::Bool(_) => ElementType::Bool,
            Self::String(_) => ElementType::String,
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawValueContainer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decode_each_variant() {
        assert_eq!(
            raw(r#"{"doubles": [1.5, 2.0]}"#).decode().unwrap(),
            TypedValues::Doubles(vec![1.5, 2.0])
        );
        assert_eq!(
            raw(r#"{"int32s": [23]}"#).decode().unwrap(),
            TypedValues::Int32s(vec![23])
        );
        assert_eq!(
            raw(r#"{"bools": [true, false]}"#).decode().unwrap(),
            TypedValues::Bools(vec![true, false])
        );
        assert_eq!(
            raw(r#"{"strings": ["a"]}"#).decode().unwrap(),
            TypedValues::Strings(vec!["a".to_string()])
        );
    }

    #[test]
    fn integral_json_numbers_decode_as_doubles() {
        let values = raw(r#"{"doubles": [10, 11, 12]}"#).decode().unwrap();
        assert_eq!(values, TypedValues::Doubles(vec![10.0, 11.0, 12.0]));
        assert_eq!(values.element_type(), ElementType::Double);
    }

    #[test]
    fn empty_container_is_an_error() {
        let err = raw("{}").decode().unwrap_err();
        assert!(matches!(err, TypeError::EmptyContainer));
    }

    #[test]
    fn null_variants_count_as_absent() {
        let err = raw(r#"{"doubles": null, "strings": null}"#)
            .decode()
            .unwrap_err();
        assert!(matches!(err, TypeError::EmptyContainer));
    }

    #[test]
    fn zero_length_array_is_populated() {
        let values = raw(r#"{"bools": []}"#).decode().unwrap();
        assert_eq!(values, TypedValues::Bools(vec![]));
        assert!(values.is_empty());
    }

    #[test]
    fn precedence_resolves_multiple_variants() {
        let all = raw(r#"{"strings": ["s"], "bools": [true], "int32s": [1], "doubles": [2.5]}"#);
        assert_eq!(all.decode().unwrap(), TypedValues::Doubles(vec![2.5]));

        let no_doubles = raw(r#"{"strings": ["s"], "bools": [true], "int32s": [1]}"#);
        assert_eq!(no_doubles.decode().unwrap(), TypedValues::Int32s(vec![1]));

        let bools_strings = raw(r#"{"strings": ["s"], "bools": [true]}"#);
        assert_eq!(bools_strings.decode().unwrap(), TypedValues::Bools(vec![true]));
    }

    #[test]
    fn populated_lists_in_precedence_order() {
        let container = raw(r#"{"strings": ["s"], "int32s": [1]}"#);
        assert_eq!(
            container.populated(),
            vec![ElementType::Int32, ElementType::String]
        );
    }

    #[test]
    fn from_typed_values_builds_single_variant() {
        let container = RawValueContainer::from(TypedValues::Strings(vec!["x".into()]));
        assert_eq!(container.populated(), vec![ElementType::String]);
        assert_eq!(
            container.decode().unwrap(),
            TypedValues::Strings(vec!["x".into()])
        );
    }

    #[test]
    fn get_and_into_scalars_agree() {
        let values = TypedValues::Int32s(vec![4, 5, 6]);
        assert_eq!(values.get(1), Some(Scalar::Int32(5)));
        assert_eq!(values.get(3), None);
        assert_eq!(
            values.into_scalars(),
            vec![Scalar::Int32(4), Scalar::Int32(5), Scalar::Int32(6)]
        );
    }

    #[test]
    fn serializes_untagged() {
        let values = TypedValues::Strings(vec!["one".into(), "two".into()]);
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"["one","two"]"#);
        assert_eq!(serde_json::to_string(&Scalar::Bool(false)).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Scalar::Double(23.32)).unwrap(), "23.32");
    }
}
