//! Raw calendar events and their normalization.
//!
//! - [`RawEvent`] - an event as the calendar API returns it
//! - [`normalize_event`] - turns a raw event into a [`CanonicalEvent`](eventsieve_core::CanonicalEvent)
//! - [`EventSource`] - where raw events come from
//!
//! ```text
//!  events.json ──► JsonFileSource ──► Vec<RawEvent>
//!                                         │
//!                                         ▼ normalize_events()
//!                                  NormalizeOutcome { events, rejected }
//! ```

pub mod error;
pub mod normalize;
pub mod raw_event;
pub mod source;

pub use error::{NormalizeError, SourceError, SourceResult};
pub use normalize::{NormalizeOutcome, RejectedEvent, normalize_event, normalize_events};
pub use raw_event::{RawAttendee, RawEvent, RawEventStart};
pub use source::{EventSource, JsonFileSource, StaticSource, parse_events_json};
