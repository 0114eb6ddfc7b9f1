use serde::Deserialize;
use xvs_types::{
    ProtocolVersion, VariableBlockV1, VariableRecord, VariableRecordV1, VariableRecordV2,
    VariableStateV2, VariableValues,
};

use crate::error::DecodeError;
use crate::settings::VersionContext;

/// Normalize a v2 variable block.
///
/// Every entry's value container is decoded independently, so entries of
/// one block may carry different element types. Output order matches
/// input order and each entry keeps its `base.object_id` as `id`.
///
/// # Errors
///
/// [`DecodeError::Type`] with `TypeError::EmptyContainer` if any entry's
/// container has no populated variant.
pub fn parse_variable_v2(
    block: &VariableStateV2,
    time: i64,
) -> Result<VariableRecordV2, DecodeError> {
    let variable = block
        .variables
        .iter()
        .map(|entry| -> Result<VariableValues, DecodeError> {
            Ok(VariableValues {
                values: entry.values.decode()?,
                id: entry.object_id().map(str::to_string),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VariableRecordV2 { time, variable })
}

/// Normalize a v1 variable block.
///
/// Pairs `timestamps[i]` with `values[i]`, reading each value as the
/// block's declared type. `time` becomes the record's grouping time and is
/// not derived from the pair timestamps.
///
/// # Errors
///
/// - [`DecodeError::LengthMismatch`] if the timestamp and value arrays
///   differ in length.
/// - [`DecodeError::Type`] with `TypeError::ValueTypeMismatch` if a value
///   does not fit the declared type.
pub fn parse_variable_v1(
    block: &VariableBlockV1,
    time: i64,
) -> Result<VariableRecordV1, DecodeError> {
    if block.timestamps.len() != block.values.len() {
        return Err(DecodeError::LengthMismatch {
            keys: "timestamps",
            index: 0,
            key_count: block.timestamps.len(),
            value_count: block.values.len(),
        });
    }

    let values = block.typed_values()?;
    let variable = block
        .timestamps
        .iter()
        .copied()
        .zip(values.into_scalars())
        .collect();

    Ok(VariableRecordV1 { time, variable })
}

/// Normalize one raw variable record of `stream_name`.
///
/// The protocol version is taken from `context` once, before anything is
/// read, and decides which record shape `block` must have:
///
/// ```text
/// ┌───────┬──────────────────────────────┬────────────────────┐
/// │ Major │ Expected block               │ Output             │
/// ├───────┼──────────────────────────────┼────────────────────┤
/// │ 1     │ VariableBlockV1              │ VariableRecord::V1 │
/// │ 2     │ VariableStateV2              │ VariableRecord::V2 │
/// │ other │ (not read)                   │ UnsupportedVersion │
/// └───────┴──────────────────────────────┴────────────────────┘
/// ```
///
/// `stream_name` does not change the output; it only labels errors and
/// log lines.
///
/// # Errors
///
/// - [`DecodeError::Type`] with `TypeError::UnsupportedVersion` if the
///   context's major version is not 1 or 2.
/// - [`DecodeError::MalformedRecord`] if `block` is not the shape the
///   version expects.
/// - Everything [`parse_variable_v1`] or [`parse_variable_v2`] returns.
pub fn parse_stream_variable(
    block: &serde_json::Value,
    stream_name: &str,
    time: i64,
    context: VersionContext,
) -> Result<VariableRecord, DecodeError> {
    let version = context.protocol_version()?;
    log::trace!("variable {stream_name} at {time}: protocol v{}", version.major());

    let malformed = |record, source| DecodeError::MalformedRecord {
        record,
        stream: Some(stream_name.to_string()),
        source,
    };

    match version {
        ProtocolVersion::V1 => {
            let block = VariableBlockV1::deserialize(block)
                .map_err(|source| malformed("variable (v1)", source))?;
            parse_variable_v1(&block, time).map(VariableRecord::V1)
        }
        ProtocolVersion::V2 => {
            let block = VariableStateV2::deserialize(block)
                .map_err(|source| malformed("variable_state", source))?;
            parse_variable_v2(&block, time).map(VariableRecord::V2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xvs_types::{
        RawValueContainer, Scalar, TypeError, TypedValues, VariableEntryV2, VariableTypeV1,
    };

    fn v1() -> VersionContext {
        VersionContext::new(ProtocolVersion::V1)
    }

    fn v2() -> VersionContext {
        VersionContext::new(ProtocolVersion::V2)
    }

    #[test]
    fn v2_preserves_entry_order_and_ids() {
        let block = VariableStateV2 {
            variables: vec![
                VariableEntryV2::new(TypedValues::Int32s(vec![1, 2])),
                VariableEntryV2::new(TypedValues::Strings(vec!["a".into()])).with_object_id("7"),
            ],
        };
        let record = parse_variable_v2(&block, 50).unwrap();

        assert_eq!(record.time, 50);
        assert_eq!(record.variable.len(), 2);
        assert_eq!(record.variable[0].values, TypedValues::Int32s(vec![1, 2]));
        assert_eq!(record.variable[0].id, None);
        assert_eq!(record.variable[1].id.as_deref(), Some("7"));
    }

    #[test]
    fn v2_empty_container_fails() {
        let block = VariableStateV2 {
            variables: vec![
                VariableEntryV2::new(TypedValues::Bools(vec![true])),
                VariableEntryV2::new(RawValueContainer::default()),
            ],
        };
        assert!(matches!(
            parse_variable_v2(&block, 1),
            Err(DecodeError::Type(TypeError::EmptyContainer))
        ));
    }

    #[test]
    fn v2_empty_block_yields_empty_record() {
        let record = parse_variable_v2(&VariableStateV2::default(), 9).unwrap();
        assert_eq!(record.time, 9);
        assert!(record.variable.is_empty());
    }

    #[test]
    fn v1_pairs_timestamps_with_values() {
        let block = VariableBlockV1 {
            timestamps: vec![1011, 1021],
            value_type: VariableTypeV1::Bool,
            values: vec![json!(true), json!(false)],
        };
        let record = parse_variable_v1(&block, 1001).unwrap();
        assert_eq!(record.time, 1001);
        assert_eq!(
            record.variable,
            vec![(1011, Scalar::Bool(true)), (1021, Scalar::Bool(false))]
        );
    }

    #[test]
    fn v1_length_mismatch() {
        let block = VariableBlockV1 {
            timestamps: vec![1, 2, 3],
            value_type: VariableTypeV1::Float,
            values: vec![json!(1.0)],
        };
        match parse_variable_v1(&block, 0) {
            Err(DecodeError::LengthMismatch {
                keys,
                key_count,
                value_count,
                ..
            }) => {
                assert_eq!(keys, "timestamps");
                assert_eq!(key_count, 3);
                assert_eq!(value_count, 1);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_follows_context() {
        let v1_block = json!({ "timestamps": [1011], "type": "string", "values": ["Right"] });
        let v2_block = json!({ "variables": [{ "values": { "doubles": [1.5] } }] });

        let record = parse_stream_variable(&v1_block, "/test", 1001, v1()).unwrap();
        assert!(matches!(record, VariableRecord::V1(_)));

        let record = parse_stream_variable(&v2_block, "/test", 1001, v2()).unwrap();
        assert!(matches!(record, VariableRecord::V2(_)));
    }

    #[test]
    fn dispatch_rejects_shape_of_other_version() {
        let v2_block = json!({ "variables": [{ "values": { "doubles": [1.5] } }] });
        match parse_stream_variable(&v2_block, "/test", 1001, v1()) {
            Err(DecodeError::MalformedRecord { record, stream, .. }) => {
                assert_eq!(record, "variable (v1)");
                assert_eq!(stream.as_deref(), Some("/test"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_version_fails_before_reading_block() {
        // Not a valid block for any version; the version check must come first.
        let garbage = json!("not a block");
        assert!(matches!(
            parse_stream_variable(&garbage, "/test", 0, VersionContext::from_major(3)),
            Err(DecodeError::Type(TypeError::UnsupportedVersion { major: 3 }))
        ));
    }
}
