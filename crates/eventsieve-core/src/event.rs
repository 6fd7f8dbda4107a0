//! The canonical event type.
//!
//! [`CanonicalEvent`] is the provider-agnostic representation every filter
//! in this crate works on. It is built fresh on each fetch cycle by the
//! normalizer and dropped after the display list is rendered.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::time::days_until;

/// A normalized calendar event.
///
/// `start` always carries an offset: sources without one are pinned to UTC
/// during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Provider identifier, when the source supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title-cased event summary.
    pub title: String,
    /// When the event starts.
    pub start: DateTime<FixedOffset>,
    /// Attendee email addresses in source order.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Raw description, empty when the source had none.
    #[serde(default)]
    pub description: String,
    /// Whether this is one instance of a recurring series.
    #[serde(default)]
    pub is_recurring: bool,
}

impl CanonicalEvent {
    /// Creates an event with no attendees and an empty description.
    pub fn new(title: impl Into<String>, start: DateTime<FixedOffset>) -> Self {
        Self {
            id: None,
            title: title.into(),
            start,
            attendees: Vec::new(),
            description: String::new(),
            is_recurring: false,
        }
    }

    /// Returns true if anyone is invited.
    pub fn has_attendees(&self) -> bool {
        !self.attendees.is_empty()
    }

    /// The start instant in UTC.
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    /// Whole days from `now` until this event starts (floored).
    pub fn days_until(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.start, now)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attendee(mut self, email: impl Into<String>) -> Self {
        self.attendees.push(email.into());
        self
    }

    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = attendees;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }
}
