use xvs_types::{ProtocolVersion, TimeSeriesEntry, VariableRecord};

use crate::error::DecodeError;
use crate::settings::VersionContext;
use crate::time_series::{self, StreamAccumulator};
use crate::variable;

/// A stream parsing session pinned to one protocol version.
///
/// The session captures a [`VersionContext`] when it is built and uses it
/// for every call, so changing the process-wide setting mid-session has no
/// effect on it. Build a new parser to pick up a new setting.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use xvs_decoder::{StreamAccumulator, StreamParser};
/// use xvs_types::{ProtocolVersion, Scalar, VariableRecord};
///
/// let parser = StreamParser::new(ProtocolVersion::V1);
///
/// let block = json!({ "timestamps": [1011, 1021], "type": "string", "values": ["Right", "Left"] });
/// let record = parser.parse_variable(&block, "/turn_signal", 1001).unwrap();
/// let VariableRecord::V1(record) = record else { panic!("expected a v1 record") };
/// assert_eq!(record.variable[1], (1021, Scalar::String("Left".into())));
///
/// let entries = json!([
///     { "timestamp": 1001, "streams": ["/speed"], "values": { "doubles": [12.5] } }
/// ]);
/// let mut latest = StreamAccumulator::new();
/// parser.parse_time_series_json(&entries, &mut latest).unwrap();
/// assert_eq!(latest.get("/speed").unwrap().variable, Scalar::Double(12.5));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StreamParser {
    context: VersionContext,
}

impl StreamParser {
    pub fn new(context: impl Into<VersionContext>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// A parser pinned to the current process-wide setting.
    pub fn current() -> Self {
        Self::new(VersionContext::current())
    }

    pub fn context(&self) -> VersionContext {
        self.context
    }

    /// # Errors
    ///
    /// `TypeError::UnsupportedVersion` if the pinned major version is not
    /// 1 or 2.
    pub fn version(&self) -> Result<ProtocolVersion, DecodeError> {
        self.context.protocol_version()
    }

    /// See [`time_series::parse_stream_time_series`].
    ///
    /// # Errors
    ///
    /// As [`time_series::parse_stream_time_series`].
    pub fn parse_time_series<'a>(
        &self,
        entries: &[TimeSeriesEntry],
        accumulator: &'a mut StreamAccumulator,
    ) -> Result<&'a mut StreamAccumulator, DecodeError> {
        time_series::parse_stream_time_series(entries, accumulator)
    }

    /// See [`time_series::parse_stream_time_series_json`].
    ///
    /// # Errors
    ///
    /// As [`time_series::parse_stream_time_series_json`].
    pub fn parse_time_series_json<'a>(
        &self,
        record: &serde_json::Value,
        accumulator: &'a mut StreamAccumulator,
    ) -> Result<&'a mut StreamAccumulator, DecodeError> {
        time_series::parse_stream_time_series_json(record, accumulator)
    }

    /// See [`variable::parse_stream_variable`].
    ///
    /// # Errors
    ///
    /// As [`variable::parse_stream_variable`].
    pub fn parse_variable(
        &self,
        block: &serde_json::Value,
        stream_name: &str,
        time: i64,
    ) -> Result<VariableRecord, DecodeError> {
        variable::parse_stream_variable(block, stream_name, time, self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xvs_types::TypeError;

    #[test]
    fn version_reports_pinned_context() {
        assert_eq!(
            StreamParser::new(ProtocolVersion::V2).version().unwrap(),
            ProtocolVersion::V2
        );
        assert!(matches!(
            StreamParser::new(VersionContext::from_major(0)).version(),
            Err(DecodeError::Type(TypeError::UnsupportedVersion { major: 0 }))
        ));
    }

    #[test]
    fn separate_parsers_decode_independently() {
        let old = StreamParser::new(ProtocolVersion::V1);
        let new = StreamParser::new(ProtocolVersion::V2);

        let v1_block = json!({ "timestamps": [1], "type": "float", "values": [0.5] });
        let v2_block = json!({ "variables": [{ "values": { "bools": [true] } }] });

        assert!(old.parse_variable(&v1_block, "/a", 1).unwrap().as_v1().is_some());
        assert!(new.parse_variable(&v2_block, "/a", 1).unwrap().as_v2().is_some());
        assert!(old.parse_variable(&v2_block, "/a", 1).is_err());
    }
}
