//! Core types: canonical events, start times, filters, exclusions, formatting

pub mod event;
pub mod exclusion;
pub mod filter;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::CanonicalEvent;
pub use exclusion::{ExclusionSet, ExpressionObserver, NegationInput, QueryParamMirror};
pub use filter::{FilterConfig, LookaheadRange, UnknownRange, apply_filters};
pub use format::{
    DisplayRow, FormatOptions, JsonOutput, OutputFormat, OutputFormatter, ellipsis, format_start,
};
pub use time::{TimeParseError, days_until, parse_start};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
