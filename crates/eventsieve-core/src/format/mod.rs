//! Output formatting for the dashboard display list.
//!
//! Each surviving [`CanonicalEvent`] becomes a [`DisplayRow`] with four
//! columns: title, a compact start (`3/15 10am`), the comma-joined attendee
//! list, and the description. Rows are rendered either as an aligned text
//! table or as JSON.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::event::CanonicalEvent;
use crate::exclusion::ExclusionSet;

const HEADERS: [&str; 4] = ["Event", "Start", "Attendees", "Description"];
const COLUMN_GAP: &str = "  ";

/// Text shown when nothing survives filtering.
pub const DEFAULT_NO_EVENTS_TEXT: &str = "No events matched the criteria.";

/// The output format for the display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Maximum description length in the table (truncated with ellipsis).
    pub max_description_length: Option<usize>,
    /// Text to show when there are no events.
    pub no_events_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_description_length: Some(60),
            no_events_text: DEFAULT_NO_EVENTS_TEXT.to_string(),
        }
    }
}

/// One display-ready line of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub title: String,
    pub start: String,
    pub attendees: String,
    pub description: String,
}

impl DisplayRow {
    pub fn from_event(event: &CanonicalEvent) -> Self {
        Self {
            title: event.title.clone(),
            start: format_start(&event.start),
            attendees: event.attendees.join(", "),
            description: event.description.clone(),
        }
    }

    fn cells(&self, max_description: Option<usize>) -> [String; 4] {
        let description = single_line(&self.description);
        let description = match max_description {
            Some(max) => ellipsis(&description, max).into_owned(),
            None => description,
        };
        [
            self.title.clone(),
            self.start.clone(),
            self.attendees.clone(),
            description,
        ]
    }
}

/// JSON document emitted with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOutput {
    pub count: usize,
    pub exclusions: Vec<String>,
    pub events: Vec<DisplayRow>,
}

/// Renders display lists.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Renders an aligned text table, or the no-events text.
    pub fn format_table(&self, events: &[CanonicalEvent]) -> String {
        if events.is_empty() {
            return self.options.no_events_text.clone();
        }

        let rows: Vec<[String; 4]> = events
            .iter()
            .map(|e| DisplayRow::from_event(e).cells(self.options.max_description_length))
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(render_line(&HEADERS.map(String::from), &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP),
        );
        lines.extend(rows.iter().map(|row| render_line(row, &widths)));
        lines.join("\n")
    }

    /// Builds the JSON document. Descriptions are never truncated here.
    pub fn format_json(&self, events: &[CanonicalEvent], exclusions: &ExclusionSet) -> JsonOutput {
        JsonOutput {
            count: events.len(),
            exclusions: exclusions.tokens().to_vec(),
            events: events.iter().map(DisplayRow::from_event).collect(),
        }
    }
}

fn render_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
    }
    line.trim_end().to_string()
}

/// Formats a start as `m/d h[am|pm]` in the event's own offset, e.g. `3/15 10am`.
pub fn format_start(start: &DateTime<FixedOffset>) -> String {
    start.format("%-m/%-d %-I%p").to_string().to_lowercase()
}

fn single_line(s: &str) -> String {
    s.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }
    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{truncated}..."))
}
