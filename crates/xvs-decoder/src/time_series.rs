use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xvs_types::{CanonicalSample, TimeSeriesEntry};

use crate::error::DecodeError;

/// Latest sample per time-series stream, keyed by stream name.
///
/// The accumulator is owned by the caller and threaded through successive
/// [`parse_stream_time_series`] calls, so after each call it reflects the
/// most recent sample seen for every stream so far. It must have a single
/// writer: share it across threads only behind external synchronization.
///
/// Keys are kept sorted, which makes serialized output deterministic.
/// Serializes as a plain JSON object of stream name to sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StreamAccumulator {
    samples: BTreeMap<String, CanonicalSample>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stream: &str) -> Option<&CanonicalSample> {
        self.samples.get(stream)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalSample)> {
        self.samples.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn into_inner(self) -> BTreeMap<String, CanonicalSample> {
        self.samples
    }
}

/// Fold a sequence of time-series entries into `accumulator`.
///
/// Entries are processed in order. Each entry's value container is
/// decoded and its values are paired positionally with its stream names;
/// every pair becomes that stream's current sample, stamped with the
/// entry's timestamp and `object_id`. A later entry for the same stream
/// replaces the earlier sample.
///
/// Writes are staged until every entry has decoded, so on error the
/// accumulator is left exactly as it was.
///
/// ```text
///   entries                                   accumulator
///   ┌──────────────────────────────────┐      ┌──────────────────────────┐
///   │ t=1001 [/a, /b]  doubles [1, 2]  │ ──▶  │ /a → {1001, 1.0}         │
///   │ t=1002 [/a]      int32s  [5]     │      │ /b → {1001, 2.0}         │
///   └──────────────────────────────────┘      │ /a → {1002, 5}   (wins)  │
///                                             └──────────────────────────┘
/// ```
///
/// # Errors
///
/// - [`DecodeError::Type`] with `TypeError::EmptyContainer` if an entry's
///   container has no populated variant.
/// - [`DecodeError::LengthMismatch`] if an entry's stream count differs
///   from its decoded value count.
pub fn parse_stream_time_series<'a>(
    entries: &[TimeSeriesEntry],
    accumulator: &'a mut StreamAccumulator,
) -> Result<&'a mut StreamAccumulator, DecodeError> {
    let mut staged = Vec::with_capacity(entries.iter().map(|e| e.streams.len()).sum());

    for (index, entry) in entries.iter().enumerate() {
        let values = entry.values.decode()?;
        if values.len() != entry.streams.len() {
            return Err(DecodeError::LengthMismatch {
                keys: "streams",
                index,
                key_count: entry.streams.len(),
                value_count: values.len(),
            });
        }

        log::trace!(
            "time series entry {index}: t={} {} {} value(s)",
            entry.timestamp,
            values.len(),
            values.element_type()
        );

        for (stream, variable) in entry.streams.iter().zip(values.into_scalars()) {
            staged.push((
                stream.clone(),
                CanonicalSample {
                    time: entry.timestamp,
                    variable,
                    id: entry.object_id.clone(),
                },
            ));
        }
    }

    for (stream, sample) in staged {
        accumulator.samples.insert(stream, sample);
    }
    Ok(accumulator)
}

/// Read a JSON array of time-series entries and fold it into
/// `accumulator`.
///
/// # Errors
///
/// [`DecodeError::MalformedRecord`] if `record` is not an array of
/// entries, plus everything [`parse_stream_time_series`] returns.
pub fn parse_stream_time_series_json<'a>(
    record: &serde_json::Value,
    accumulator: &'a mut StreamAccumulator,
) -> Result<&'a mut StreamAccumulator, DecodeError> {
    let entries = Vec::<TimeSeriesEntry>::deserialize(record).map_err(|source| {
        DecodeError::MalformedRecord {
            record: "time_series_state",
            stream: None,
            source,
        }
    })?;
    parse_stream_time_series(&entries, accumulator)
}
