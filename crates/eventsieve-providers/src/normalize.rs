//! RawEvent to CanonicalEvent conversion.
//!
//! The normalizer resolves the start time to an offset-aware instant,
//! title-cases the summary, and flattens the attendee list to emails.
//! Missing optional fields become empty values. Only the start can fail.

use eventsieve_core::{CanonicalEvent, parse_start};
use tracing::{debug, warn};

use crate::error::NormalizeError;
use crate::raw_event::RawEvent;

/// Converts a [`RawEvent`] to a [`CanonicalEvent`].
///
/// The start is read from `dateTime` when present and from `date`
/// otherwise. A `dateTime` that does not parse is an error even if `date`
/// is also set.
///
/// # Errors
///
/// [`NormalizeError::MissingStart`] when the event has no start value,
/// [`NormalizeError::UnparseableStart`] when it cannot be parsed.
pub fn normalize_event(raw: &RawEvent) -> Result<CanonicalEvent, NormalizeError> {
    let value = raw
        .start
        .as_ref()
        .and_then(|start| start.value())
        .ok_or(NormalizeError::MissingStart)?;

    let start = parse_start(value).map_err(|e| NormalizeError::UnparseableStart { value: e.value })?;

    let title = title_case(raw.summary.as_deref().unwrap_or_default());
    let mut event = CanonicalEvent::new(title, start)
        .with_attendees(attendee_emails(raw))
        .with_recurring(raw.is_recurring());

    if let Some(ref id) = raw.id {
        event = event.with_id(id);
    }
    if let Some(ref description) = raw.description {
        event = event.with_description(description);
    }

    Ok(event)
}

fn attendee_emails(raw: &RawEvent) -> Vec<String> {
    let Some(ref attendees) = raw.attendees else {
        return Vec::new();
    };

    attendees
        .iter()
        .filter_map(|attendee| {
            if attendee.email.is_none() {
                debug!(event_id = ?raw.id, name = ?attendee.display_name, "skipping attendee without email");
            }
            attendee.email.clone()
        })
        .collect()
}

/// Lowercases `s`, then title-cases the first letter of every run of cased
/// characters.
///
/// `"WEEKLY sync"` becomes `"Weekly Sync"`, `"o'neil 1on1"` becomes
/// `"O'Neil 1On1"`. Uncased characters such as digits or CJK ideographs end a
/// word. A first letter whose uppercase form is several characters keeps
/// only the first one uppercase, so `"ß"` becomes `"Ss"`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if !is_cased(c) {
            out.push(c);
            in_word = false;
        } else if in_word {
            out.extend(c.to_lowercase());
        } else {
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
            in_word = true;
        }
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

/// An event the batch normalizer could not convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEvent {
    /// Position in the input slice.
    pub index: usize,
    pub id: Option<String>,
    pub error: NormalizeError,
}

/// Result of [`normalize_events`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// Canonical events in input order.
    pub events: Vec<CanonicalEvent>,
    pub rejected: Vec<RejectedEvent>,
}

impl NormalizeOutcome {
    /// Returns true if every non-cancelled event normalized.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Normalizes a batch, skipping cancelled events and collecting failures.
pub fn normalize_events(raw_events: &[RawEvent]) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    for (index, raw) in raw_events.iter().enumerate() {
        if raw.is_cancelled() {
            debug!(index, event_id = ?raw.id, "skipping cancelled event");
            continue;
        }
        match normalize_event(raw) {
            Ok(event) => outcome.events.push(event),
            Err(error) => {
                warn!(index, event_id = ?raw.id, %error, "rejected event");
                outcome.rejected.push(RejectedEvent {
                    index,
                    id: raw.id.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event::{RawAttendee, RawEventStart};
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap().fixed_offset()
    }

    fn sample_raw_event() -> RawEvent {
        RawEvent::new(RawEventStart::date_time("2025-02-06T15:00:00Z"))
            .with_id("evt-1")
            .with_summary("weekly SYNC")
            .with_description("Agenda in doc")
            .with_attendee(RawAttendee::new("a@x.com"))
            .with_attendee(RawAttendee::new("b@x.com"))
    }

    mod start_resolution {
        use super::*;

        #[test]
        fn utc_designator() {
            let event = normalize_event(&sample_raw_event()).unwrap();
            assert_eq!(event.start, utc(2025, 2, 6, 15, 0, 0));
        }

        #[test]
        fn explicit_offset_is_kept() {
            let raw = RawEvent::new(RawEventStart::date_time("2025-02-06T10:00:00-05:00"));
            let event = normalize_event(&raw).unwrap();
            assert_eq!(event.start.offset().local_minus_utc(), -5 * 3600);
            assert_eq!(event.start_utc(), utc(2025, 2, 6, 15, 0, 0));
        }

        #[test]
        fn offset_less_date_time_is_utc() {
            let raw = RawEvent::new(RawEventStart::date_time("2025-02-06T15:00:00"));
            let event = normalize_event(&raw).unwrap();
            assert_eq!(event.start, utc(2025, 2, 6, 15, 0, 0));
            assert_eq!(event.start.offset().local_minus_utc(), 0);
        }

        #[test]
        fn date_only_is_midnight_utc() {
            let raw = RawEvent::new(RawEventStart::date("2025-02-10"));
            let event = normalize_event(&raw).unwrap();
            assert_eq!(event.start, utc(2025, 2, 10, 0, 0, 0));
        }

        #[test]
        fn date_time_preferred_over_date() {
            let raw = RawEvent::new(RawEventStart {
                date_time: Some("2025-02-06T15:00:00Z".to_string()),
                date: Some("2025-03-01".to_string()),
                time_zone: None,
            });
            assert_eq!(normalize_event(&raw).unwrap().start, utc(2025, 2, 6, 15, 0, 0));
        }

        #[test]
        fn missing_start() {
            let raw = RawEvent::default().with_summary("No start");
            assert_eq!(normalize_event(&raw), Err(NormalizeError::MissingStart));

            let raw = RawEvent::new(RawEventStart::default());
            assert_eq!(normalize_event(&raw), Err(NormalizeError::MissingStart));
        }

        #[test]
        fn unparseable_start() {
            let raw = RawEvent::new(RawEventStart::date_time("next tuesday"));
            assert_eq!(
                normalize_event(&raw),
                Err(NormalizeError::UnparseableStart {
                    value: "next tuesday".to_string()
                })
            );
        }

        #[test]
        fn bad_date_time_does_not_fall_back_to_date() {
            let raw = RawEvent::new(RawEventStart {
                date_time: Some("garbage".to_string()),
                date: Some("2025-03-01".to_string()),
                time_zone: None,
            });
            assert!(matches!(
                normalize_event(&raw),
                Err(NormalizeError::UnparseableStart { .. })
            ));
        }
    }

    mod fields {
        use super::*;

        #[test]
        fn maps_all_fields() {
            let event = normalize_event(&sample_raw_event()).unwrap();
            assert_eq!(event.id.as_deref(), Some("evt-1"));
            assert_eq!(event.title, "Weekly Sync");
            assert_eq!(event.attendees, vec!["a@x.com", "b@x.com"]);
            assert_eq!(event.description, "Agenda in doc");
            assert!(!event.is_recurring);
        }

        #[test]
        fn missing_optionals_default_to_empty() {
            let raw = RawEvent::new(RawEventStart::date("2025-02-10"));
            let event = normalize_event(&raw).unwrap();
            assert_eq!(event.id, None);
            assert_eq!(event.title, "");
            assert!(event.attendees.is_empty());
            assert_eq!(event.description, "");
        }

        #[test]
        fn attendees_without_email_are_skipped() {
            let raw = sample_raw_event().with_attendee(RawAttendee {
                email: None,
                display_name: Some("Room 4".to_string()),
            });
            let event = normalize_event(&raw).unwrap();
            assert_eq!(event.attendees, vec!["a@x.com", "b@x.com"]);
        }

        #[test]
        fn recurring_instance_is_flagged() {
            let raw = sample_raw_event().with_recurring("series-9");
            assert!(normalize_event(&raw).unwrap().is_recurring);
        }

        #[test]
        fn from_api_json() {
            let json = r#"{
                "id": "abc",
                "summary": "DEMO day",
                "start": { "date": "2025-02-10" },
                "attendees": [{ "email": "pm@x.com", "responseStatus": "accepted" }]
            }"#;
            let raw: RawEvent = serde_json::from_str(json).unwrap();
            let event = normalize_event(&raw).unwrap();
            assert_eq!(event.title, "Demo Day");
            assert_eq!(event.attendees, vec!["pm@x.com"]);
        }
    }

    mod titles {
        use super::*;

        #[test]
        fn title_case_words() {
            assert_eq!(title_case("weekly sync"), "Weekly Sync");
            assert_eq!(title_case("WEEKLY SYNC"), "Weekly Sync");
            assert_eq!(title_case("q3 planning - DRAFT"), "Q3 Planning - Draft");
        }

        #[test]
        fn title_case_restarts_after_non_letters() {
            assert_eq!(title_case("o'neil 1on1"), "O'Neil 1On1");
            assert_eq!(title_case("team-lunch"), "Team-Lunch");
        }

        #[test]
        fn title_case_empty_and_unicode() {
            assert_eq!(title_case(""), "");
            assert_eq!(title_case("ÉQUIPE réunion"), "Équipe Réunion");
        }

        #[test]
        fn uncased_characters_end_words() {
            assert_eq!(title_case("中a"), "中A");
            assert_eq!(title_case("会议 sync中review"), "会议 Sync中Review");
        }

        #[test]
        fn multi_char_uppercase_keeps_one_capital() {
            assert_eq!(title_case("ßtraße"), "Sstraße");
            assert_eq!(title_case("ﬁnal review"), "Final Review");
        }
    }

    mod batch {
        use super::*;

        #[test]
        fn keeps_order_and_collects_rejections() {
            let raws = vec![
                sample_raw_event(),
                RawEvent::default().with_id("no-start"),
                RawEvent::new(RawEventStart::date("2025-02-10")).with_summary("demo day"),
                RawEvent::new(RawEventStart::date_time("soon")).with_id("bad"),
            ];

            let outcome = normalize_events(&raws);
            let titles: Vec<_> = outcome.events.iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, vec!["Weekly Sync", "Demo Day"]);

            assert!(!outcome.is_clean());
            assert_eq!(outcome.rejected.len(), 2);
            assert_eq!(outcome.rejected[0].index, 1);
            assert_eq!(outcome.rejected[0].error, NormalizeError::MissingStart);
            assert_eq!(outcome.rejected[1].index, 3);
            assert_eq!(outcome.rejected[1].id.as_deref(), Some("bad"));
        }

        #[test]
        fn skips_cancelled_events() {
            let raws = vec![
                sample_raw_event().with_status("cancelled"),
                RawEvent::default().with_status("cancelled"),
            ];
            let outcome = normalize_events(&raws);
            assert!(outcome.events.is_empty());
            assert!(outcome.is_clean());
        }

        #[test]
        fn empty_input() {
            assert_eq!(normalize_events(&[]), NormalizeOutcome::default());
        }
    }
}
