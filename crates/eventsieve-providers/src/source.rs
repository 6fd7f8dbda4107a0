//! EventSource trait and the JSON file source.
//!
//! A source hands back the raw events for one dashboard refresh. The JSON
//! file source accepts either a bare array of events or a full
//! `events.list` response with the events under `items`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::raw_event::RawEvent;

/// Supplies raw calendar events.
pub trait EventSource {
    /// A short name for logs, e.g. a file path.
    fn name(&self) -> String;

    /// Fetches the current event list.
    fn fetch_events(&self) -> SourceResult<Vec<RawEvent>>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    List(Vec<RawEvent>),
    Response { items: Vec<RawEvent> },
}

impl EventsDocument {
    fn into_events(self) -> Vec<RawEvent> {
        match self {
            Self::List(events) | Self::Response { items: events } => events,
        }
    }
}

/// Parses raw events from a JSON string in either accepted shape.
pub fn parse_events_json(json: &str) -> Result<Vec<RawEvent>, serde_json::Error> {
    serde_json::from_str::<EventsDocument>(json).map(EventsDocument::into_events)
}

/// Reads events from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_events(&self) -> SourceResult<Vec<RawEvent>> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| SourceError::io(&self.path, e))?;
        let events =
            parse_events_json(&content).map_err(|e| SourceError::invalid_json(&self.path, e))?;
        debug!(path = %self.path.display(), count = events.len(), "loaded raw events");
        Ok(events)
    }
}

/// A fixed list of events, for tests and piping.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    events: Vec<RawEvent>,
}

impl StaticSource {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> String {
        "static".to_string()
    }

    fn fetch_events(&self) -> SourceResult<Vec<RawEvent>> {
        Ok(self.events.clone())
    }
}
