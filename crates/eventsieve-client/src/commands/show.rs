//! `eventsieve show`: run the dashboard over an events file.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use chrono::Utc;
use eventsieve_core::{FilterConfig, OutputFormatter, QueryParamMirror, parse_start};
use eventsieve_providers::{EventSource, JsonFileSource};
use eventsieve_store::{ExclusionStore, StoreResult};
use tracing::debug;
use url::Url;

use crate::cli::ShowArgs;
use crate::config::ClientConfig;
use crate::dashboard::{Dashboard, SavedFilters};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Runs `show` against the configured store, printing to stdout.
pub fn run(args: &ShowArgs, config: &ClientConfig, user_id: &str) -> ClientResult<()> {
    let store = super::open_configured_store(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args, config, user_id, store, &mut out)
}

/// Runs `show` with an already-opened (or failed) store.
///
/// A store that failed to open only disables saved filters, unless
/// `--saved` asked for them.
pub fn execute<W: Write>(
    args: &ShowArgs,
    config: &ClientConfig,
    user_id: &str,
    store: StoreResult<Box<dyn ExclusionStore>>,
    out: &mut W,
) -> ClientResult<()> {
    let session = session_for(args, user_id)?;
    let raw = JsonFileSource::new(&args.events).fetch_events()?;

    let link = args
        .link
        .as_deref()
        .map(Url::parse)
        .transpose()
        .map_err(|e| ClientError::InvalidArgument(format!("invalid --link: {e}")))?;
    let initial = args
        .hide
        .clone()
        .or_else(|| link.as_ref().map(QueryParamMirror::initial_expression))
        .unwrap_or_default();

    let mut dashboard = Dashboard::new(filter_config(args, config)).with_expression(initial);
    let mirror = link.map(|url| {
        let mirror = Rc::new(RefCell::new(QueryParamMirror::new(url)));
        dashboard.input_mut().register(Box::new(Rc::clone(&mirror)));
        mirror
    });

    let saved_filters = match store {
        Ok(ref store) => {
            if args.saved {
                dashboard.load_saved_filters(store.as_ref(), &session)?;
            }
            SavedFilters::check(store.as_ref(), &session.user_id)
        }
        Err(err) if args.saved => return Err(err.into()),
        Err(err) => SavedFilters::unavailable(&err),
    };

    let view = dashboard.render(&raw, saved_filters, &session);
    if args.strict {
        if let Some(first) = view.rejected.first() {
            return Err(ClientError::Normalize {
                index: first.index,
                id: first.id.clone(),
                source: first.error.clone(),
            });
        }
    }

    let formatter = OutputFormatter::new(config.display.to_format_options());
    if args.json {
        let output = formatter.format_json(&view.events, &view.exclusions);
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| ClientError::Serialize(e.to_string()))?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(out, "{}", formatter.format_table(&view.events))?;
    if let SavedFilters::Present(ref saved) = view.saved_filters {
        if !args.saved && *saved != view.exclusions {
            writeln!(out)?;
            writeln!(out, "Saved filters: {} (use --saved)", saved.to_expression())?;
        }
    }
    if let Some(mirror) = mirror {
        writeln!(out)?;
        writeln!(out, "Link: {}", mirror.borrow().url())?;
    }
    Ok(())
}

fn session_for(args: &ShowArgs, user_id: &str) -> ClientResult<Session> {
    match args.now {
        Some(ref value) => {
            let now = parse_start(value)
                .map_err(|e| ClientError::InvalidArgument(format!("invalid --now: {e}")))?;
            debug!(%now, "using fixed reference time");
            Ok(Session::new(user_id, now.with_timezone(&Utc)))
        }
        None => Ok(Session::start(user_id)),
    }
}

/// Config file values with command-line overrides applied.
fn filter_config(args: &ShowArgs, config: &ClientConfig) -> FilterConfig {
    let mut settings = config.filters.clone();
    if let Some(range) = args.range {
        settings.range = range;
    }
    if args.keep_no_attendees {
        settings.exclude_no_attendees = false;
    }
    if args.skip_recurring {
        settings.exclude_recurring = true;
    }
    settings.to_filter_config()
}
