#![warn(clippy::pedantic)]

pub mod error;
pub mod parser;
pub mod settings;
pub mod time_series;
pub mod variable;

pub use error::DecodeError;
pub use parser::StreamParser;
pub use settings::{VersionContext, current_major_version, set_current_major_version};
pub use time_series::{StreamAccumulator, parse_stream_time_series, parse_stream_time_series_json};
pub use variable::{parse_stream_variable, parse_variable_v1, parse_variable_v2};
