//! Range and attendance filtering.
//!
//! [`FilterConfig`] decides whether a [`CanonicalEvent`] stays on the
//! dashboard. The look-ahead window only bounds the future: an event whose
//! start is at most `lookahead_days` whole days away is kept, and events that
//! already started are never dropped by the range check.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::CanonicalEvent;

/// Named look-ahead presets offered by the dashboard.
///
/// Deserializes through [`FromStr`], so config files accept the same
/// spellings as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum LookaheadRange {
    /// Seven days.
    Week,
    /// Thirty days.
    Month,
    /// Ninety days.
    #[default]
    Quarter,
}

impl LookaheadRange {
    /// All presets, shortest first.
    pub const ALL: [LookaheadRange; 3] = [Self::Week, Self::Month, Self::Quarter];

    /// Number of days covered by this preset.
    pub fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Next Week",
            Self::Month => "Next Month",
            Self::Quarter => "Next Quarter",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for LookaheadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a look-ahead preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown range {0:?} (expected week, month or quarter)")]
pub struct UnknownRange(pub String);

impl FromStr for LookaheadRange {
    type Err = UnknownRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "next week" => Ok(Self::Week),
            "month" | "next month" => Ok(Self::Month),
            "quarter" | "next quarter" => Ok(Self::Quarter),
            _ => Err(UnknownRange(s.to_string())),
        }
    }
}

impl TryFrom<String> for LookaheadRange {
    type Error = UnknownRange;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rules applied before keyword exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Upper bound, in whole days from now, for an event start.
    pub lookahead_days: u32,
    /// Drop events nobody is invited to.
    pub exclude_no_attendees: bool,
    /// Drop instances of recurring series.
    pub exclude_recurring: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::from_range(LookaheadRange::default())
    }
}

impl FilterConfig {
    /// Creates a config with the given window, dropping attendee-less events.
    pub fn new(lookahead_days: u32) -> Self {
        Self {
            lookahead_days,
            exclude_no_attendees: true,
            exclude_recurring: false,
        }
    }

    /// Creates a config from a named preset.
    pub fn from_range(range: LookaheadRange) -> Self {
        Self::new(range.days())
    }

    pub fn with_exclude_no_attendees(mut self, exclude: bool) -> Self {
        self.exclude_no_attendees = exclude;
        self
    }

    pub fn with_exclude_recurring(mut self, exclude: bool) -> Self {
        self.exclude_recurring = exclude;
        self
    }

    /// Upper-bound window check. Past events always pass.
    pub fn in_range(&self, event: &CanonicalEvent, now: DateTime<Utc>) -> bool {
        event.days_until(now) <= i64::from(self.lookahead_days)
    }

    /// Attendance check; always passes unless `exclude_no_attendees` is set.
    pub fn attendance_ok(&self, event: &CanonicalEvent) -> bool {
        !self.exclude_no_attendees || event.has_attendees()
    }

    /// Recurrence check; always passes unless `exclude_recurring` is set.
    pub fn recurrence_ok(&self, event: &CanonicalEvent) -> bool {
        !self.exclude_recurring || !event.is_recurring
    }

    /// Returns true if the event survives every rule.
    pub fn keeps(&self, event: &CanonicalEvent, now: DateTime<Utc>) -> bool {
        if !self.in_range(event, now) {
            trace!(title = %event.title, "dropped: beyond look-ahead window");
            return false;
        }
        if !self.attendance_ok(event) {
            trace!(title = %event.title, "dropped: no attendees");
            return false;
        }
        if !self.recurrence_ok(event) {
            trace!(title = %event.title, "dropped: recurring instance");
            return false;
        }
        true
    }

    /// Keeps the events that pass, preserving input order.
    pub fn apply<I>(&self, events: I, now: DateTime<Utc>) -> Vec<CanonicalEvent>
    where
        I: IntoIterator<Item = CanonicalEvent>,
    {
        events
            .into_iter()
            .filter(|event| self.keeps(event, now))
            .collect()
    }
}

/// Applies the range and attendance rules to `events`.
pub fn apply_filters<I>(events: I, config: &FilterConfig, now: DateTime<Utc>) -> Vec<CanonicalEvent>
where
    I: IntoIterator<Item = CanonicalEvent>,
{
    config.apply(events, now)
}
