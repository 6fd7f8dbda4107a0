//! The dashboard pipeline.
//!
//! ```text
//! raw events ─► normalize ─► range/attendance ─► exclusions ─► DashboardView
//!                                                   ▲
//!                         NegationInput ────────────┘ (live text or saved set)
//! ```
//!
//! A render never fails: rejected events are reported in the view and an
//! unreachable store only disables saved filters.

use eventsieve_core::{CanonicalEvent, ExclusionSet, FilterConfig, NegationInput};
use eventsieve_providers::{RawEvent, RejectedEvent, normalize_events};
use eventsieve_store::{ExclusionStore, StoreError, StoreResult};
use tracing::{debug, info, warn};

use crate::session::Session;

/// Saved-filter status for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedFilters {
    Present(ExclusionSet),
    Absent,
    /// The store could not be reached; the reason is for display.
    Unavailable(String),
}

impl SavedFilters {
    /// Looks up `user_id` without failing.
    pub fn check(store: &dyn ExclusionStore, user_id: &str) -> Self {
        match store.load(user_id) {
            Ok(tokens) if tokens.is_empty() => Self::Absent,
            Ok(tokens) => Self::Present(ExclusionSet::from_tokens(tokens)),
            Err(err) => Self::unavailable(&err),
        }
    }

    pub fn unavailable(err: &StoreError) -> Self {
        warn!(backend = err.backend(), %err, "saved filters unavailable");
        Self::Unavailable(err.to_string())
    }

    /// True when a load action would have something to load.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// What one render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Survivors, in input order.
    pub events: Vec<CanonicalEvent>,
    /// The exclusions that were applied.
    pub exclusions: ExclusionSet,
    pub saved_filters: SavedFilters,
    /// Events that could not be normalized.
    pub rejected: Vec<RejectedEvent>,
}

/// Filter settings plus the live negation input.
#[derive(Debug, Default)]
pub struct Dashboard {
    filter: FilterConfig,
    input: NegationInput,
}

impl Dashboard {
    pub fn new(filter: FilterConfig) -> Self {
        Self {
            filter,
            input: NegationInput::default(),
        }
    }

    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.input.set_expression(expression);
        self
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn input(&self) -> &NegationInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut NegationInput {
        &mut self.input
    }

    /// Replaces the live expression with the user's saved set.
    ///
    /// Returns the loaded set, empty when nothing was saved (the input is
    /// left untouched in that case).
    pub fn load_saved_filters(
        &mut self,
        store: &dyn ExclusionStore,
        session: &Session,
    ) -> StoreResult<ExclusionSet> {
        let saved = ExclusionSet::from_tokens(store.load(&session.user_id)?);
        if saved.is_empty() {
            debug!(user_id = %session.user_id, "no saved filters to load");
        } else {
            self.input.load_saved(&saved);
            info!(user_id = %session.user_id, count = saved.len(), "loaded saved filters");
        }
        Ok(saved)
    }

    /// Persists the exclusions currently in the input for the session user.
    pub fn save_filters(
        &self,
        store: &mut dyn ExclusionStore,
        session: &Session,
    ) -> StoreResult<ExclusionSet> {
        let exclusions = self.input.exclusions();
        store.save(&session.user_id, exclusions.tokens())?;
        info!(user_id = %session.user_id, count = exclusions.len(), "saved filters");
        Ok(exclusions)
    }

    /// Runs normalize, filter and exclusion over `raw`.
    pub fn render(
        &self,
        raw: &[RawEvent],
        saved_filters: SavedFilters,
        session: &Session,
    ) -> DashboardView {
        let outcome = normalize_events(raw);
        let in_window = self.filter.apply(outcome.events, session.now);
        let exclusions = self.input.exclusions();
        let events = exclusions.apply(in_window);

        debug!(
            raw = raw.len(),
            shown = events.len(),
            rejected = outcome.rejected.len(),
            exclusions = exclusions.len(),
            "rendered dashboard"
        );

        DashboardView {
            events,
            exclusions,
            saved_filters,
            rejected: outcome.rejected,
        }
    }

    /// [`render`](Self::render) with the saved-filter status read from `store`.
    pub fn render_with_store(
        &self,
        raw: &[RawEvent],
        store: &dyn ExclusionStore,
        session: &Session,
    ) -> DashboardView {
        let saved = SavedFilters::check(store, &session.user_id);
        self.render(raw, saved, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use eventsieve_core::QueryParamMirror;
    use eventsieve_providers::{NormalizeError, RawAttendee, RawEventStart};
    use eventsieve_store::MemoryExclusionStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn session() -> Session {
        Session::new("u1", utc(2025, 2, 5, 10, 0, 0))
    }

    fn raw_events() -> Vec<RawEvent> {
        vec![
            RawEvent::new(RawEventStart::date_time("2025-02-06T15:00:00Z"))
                .with_summary("weekly sync")
                .with_attendee(RawAttendee::new("a@x.com")),
            RawEvent::new(RawEventStart::date("2025-02-10")).with_summary("DEMO DAY"),
        ]
    }

    fn titles(view: &DashboardView) -> Vec<&str> {
        view.events.iter().map(|e| e.title.as_str()).collect()
    }

    struct BrokenStore;

    impl ExclusionStore for BrokenStore {
        fn backend(&self) -> &'static str {
            "broken"
        }

        fn save(&mut self, _user_id: &str, _exclusions: &[String]) -> StoreResult<()> {
            Err(StoreError::unavailable("broken", "disk on fire"))
        }

        fn load(&self, _user_id: &str) -> StoreResult<Vec<String>> {
            Err(StoreError::unavailable("broken", "disk on fire"))
        }
    }

    mod pipeline {
        use super::*;

        #[test]
        fn attendance_then_exclusion_leaves_nothing() {
            let dashboard = Dashboard::new(FilterConfig::default()).with_expression("-sync");
            let store = MemoryExclusionStore::new();
            let view = dashboard.render_with_store(&raw_events(), &store, &session());

            assert!(view.events.is_empty());
            assert_eq!(view.exclusions.tokens(), ["sync"]);
            assert_eq!(view.saved_filters, SavedFilters::Absent);
            assert!(view.rejected.is_empty());
        }

        #[test]
        fn without_exclusions_only_attendance_applies() {
            let dashboard = Dashboard::new(FilterConfig::default());
            let view = dashboard.render(&raw_events(), SavedFilters::Absent, &session());
            assert_eq!(titles(&view), vec!["Weekly Sync"]);
        }

        #[test]
        fn keep_no_attendees() {
            let filter = FilterConfig::default().with_exclude_no_attendees(false);
            let dashboard = Dashboard::new(filter).with_expression("-sync");
            let view = dashboard.render(&raw_events(), SavedFilters::Absent, &session());
            assert_eq!(titles(&view), vec!["Demo Day"]);
        }

        #[test]
        fn window_is_applied_before_exclusions() {
            let mut raws = raw_events();
            raws.push(
                RawEvent::new(RawEventStart::date("2025-03-01"))
                    .with_summary("far off")
                    .with_attendee(RawAttendee::new("a@x.com")),
            );
            let dashboard = Dashboard::new(FilterConfig::new(7));
            let view = dashboard.render(&raws, SavedFilters::Absent, &session());
            assert_eq!(titles(&view), vec!["Weekly Sync"]);
        }

        #[test]
        fn rejected_events_are_reported() {
            let mut raws = raw_events();
            raws.insert(0, RawEvent::default().with_id("broken"));
            let dashboard = Dashboard::new(FilterConfig::default());
            let view = dashboard.render(&raws, SavedFilters::Absent, &session());

            assert_eq!(titles(&view), vec!["Weekly Sync"]);
            assert_eq!(view.rejected.len(), 1);
            assert_eq!(view.rejected[0].index, 0);
            assert_eq!(view.rejected[0].error, NormalizeError::MissingStart);
        }

        #[test]
        fn render_is_repeatable() {
            let dashboard = Dashboard::new(FilterConfig::default());
            let first = dashboard.render(&raw_events(), SavedFilters::Absent, &session());
            let second = dashboard.render(&raw_events(), SavedFilters::Absent, &session());
            assert_eq!(first, second);
        }
    }

    mod saved_filters {
        use super::*;

        #[test]
        fn save_then_load_round_trip() {
            let mut store = MemoryExclusionStore::new();
            let dashboard = Dashboard::new(FilterConfig::default()).with_expression("-Sync, -demo");
            let saved = dashboard.save_filters(&mut store, &session()).unwrap();
            assert_eq!(saved.tokens(), ["sync", "demo"]);

            let mut fresh = Dashboard::new(FilterConfig::default());
            let loaded = fresh.load_saved_filters(&store, &session()).unwrap();
            assert_eq!(loaded, saved);
            assert_eq!(fresh.input().expression(), "-sync,-demo");
        }

        #[test]
        fn status_is_reported_in_view() {
            let mut store = MemoryExclusionStore::new();
            store.save("u1", &["sync".to_string()]).unwrap();

            let dashboard = Dashboard::new(FilterConfig::default());
            let view = dashboard.render_with_store(&raw_events(), &store, &session());
            assert!(view.saved_filters.is_present());
            assert_eq!(titles(&view), vec!["Weekly Sync"]);
        }

        #[test]
        fn loading_nothing_keeps_input() {
            let store = MemoryExclusionStore::new();
            let mut dashboard = Dashboard::new(FilterConfig::default()).with_expression("-lunch");
            let loaded = dashboard.load_saved_filters(&store, &session()).unwrap();
            assert!(loaded.is_empty());
            assert_eq!(dashboard.input().expression(), "-lunch");
        }

        #[test]
        fn unavailable_store_does_not_block_render() {
            let dashboard = Dashboard::new(FilterConfig::default()).with_expression("-sync");
            let view = dashboard.render_with_store(&raw_events(), &BrokenStore, &session());

            match view.saved_filters {
                SavedFilters::Unavailable(ref reason) => assert!(reason.contains("disk on fire")),
                ref other => panic!("unexpected status: {other:?}"),
            }
            assert!(view.events.is_empty());
        }

        #[test]
        fn explicit_actions_surface_store_errors() {
            let mut dashboard = Dashboard::new(FilterConfig::default());
            assert!(dashboard.load_saved_filters(&BrokenStore, &session()).is_err());
            assert!(dashboard.save_filters(&mut BrokenStore, &session()).is_err());
        }
    }

    mod link_mirror {
        use super::*;

        #[test]
        fn loaded_filters_update_the_link() {
            let mut store = MemoryExclusionStore::new();
            store.save("u1", &["demo".to_string()]).unwrap();

            let url = url::Url::parse("http://localhost:8501/?hide=-sync").unwrap();
            let mirror = Rc::new(RefCell::new(QueryParamMirror::new(url.clone())));

            let mut dashboard = Dashboard::new(FilterConfig::default())
                .with_expression(QueryParamMirror::initial_expression(&url));
            dashboard.input_mut().register(Box::new(Rc::clone(&mirror)));
            assert_eq!(mirror.borrow().url().as_str(), "http://localhost:8501/?hide=-sync");

            dashboard.load_saved_filters(&store, &session()).unwrap();
            assert_eq!(mirror.borrow().url().as_str(), "http://localhost:8501/?hide=-demo");
        }
    }
}
