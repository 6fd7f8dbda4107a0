//! Raw event type as supplied by the calendar API.
//!
//! [`RawEvent`] mirrors the JSON shape of a Google Calendar `events.list`
//! item. Every field is optional on the wire; the normalizer decides which
//! gaps are fatal (a missing start) and which default to empty values.

use serde::{Deserialize, Serialize};

/// The `start` object of an event.
///
/// Timed events carry `dateTime`, all-day events carry `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventStart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// IANA timezone the event was created in. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventStart {
    pub fn date_time(value: impl Into<String>) -> Self {
        Self {
            date_time: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self {
            date: Some(value.into()),
            ..Default::default()
        }
    }

    /// The value to parse: `dateTime` when present, `date` otherwise.
    pub fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

/// An attendee entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl RawAttendee {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            display_name: None,
        }
    }
}

/// A raw calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RawEventStart>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<RawAttendee>>,

    /// Set on every instance of an expanded recurring series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_event_id: Option<String>,

    /// RRULE lines, present on the series master.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,

    /// "confirmed", "tentative" or "cancelled".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RawEvent {
    /// Creates an event with only a start.
    pub fn new(start: RawEventStart) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    /// Returns true if the event is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Returns true for recurring instances and series masters.
    pub fn is_recurring(&self) -> bool {
        self.recurring_event_id.is_some()
            || self.recurrence.as_ref().is_some_and(|rules| !rules.is_empty())
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attendee(mut self, attendee: RawAttendee) -> Self {
        self.attendees.get_or_insert_with(Vec::new).push(attendee);
        self
    }

    pub fn with_recurring(mut self, recurring_event_id: impl Into<String>) -> Self {
        self.recurring_event_id = Some(recurring_event_id.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timed_event() {
        let json = r#"{
            "id": "event1",
            "summary": "Weekly Sync",
            "description": "Agenda in doc",
            "start": { "dateTime": "2024-03-15T10:00:00Z", "timeZone": "Europe/Paris" },
            "attendees": [{ "email": "a@x.com" }, { "email": "b@x.com", "displayName": "B" }],
            "status": "confirmed"
        }"#;

        let event: RawEvent = serde_json::from_str(json).unwrap();
        let start = event.start.as_ref().unwrap();
        assert_eq!(start.value(), Some("2024-03-15T10:00:00Z"));
        assert_eq!(start.time_zone.as_deref(), Some("Europe/Paris"));
        assert_eq!(event.attendees.as_ref().unwrap().len(), 2);
        assert!(!event.is_cancelled());
        assert!(!event.is_recurring());
    }

    #[test]
    fn parse_all_day_event() {
        let json = r#"{ "summary": "Offsite", "start": { "date": "2024-03-15" } }"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        let start = event.start.unwrap();
        assert!(start.date_time.is_none());
        assert_eq!(start.value(), Some("2024-03-15"));
    }

    #[test]
    fn date_time_wins_over_date() {
        let start = RawEventStart {
            date_time: Some("2024-03-15T10:00:00Z".to_string()),
            date: Some("2024-03-16".to_string()),
            time_zone: None,
        };
        assert_eq!(start.value(), Some("2024-03-15T10:00:00Z"));
    }

    #[test]
    fn everything_is_optional() {
        let event: RawEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event, RawEvent::default());
        assert!(event.start.is_none());
    }

    #[test]
    fn recurrence_detection() {
        let instance = RawEvent::new(RawEventStart::date("2024-03-15")).with_recurring("series-1");
        assert!(instance.is_recurring());

        let json = r#"{ "start": { "date": "2024-03-15" }, "recurrence": ["RRULE:FREQ=WEEKLY"] }"#;
        let master: RawEvent = serde_json::from_str(json).unwrap();
        assert!(master.is_recurring());
    }

    #[test]
    fn cancelled_status() {
        let event = RawEvent::new(RawEventStart::date("2024-03-15")).with_status("CANCELLED");
        assert!(event.is_cancelled());
    }
}
