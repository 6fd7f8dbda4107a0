//! `eventsieve filters`: save, load and inspect saved exclusions.

use std::io::{self, Write};

use eventsieve_store::ExclusionStore;

use crate::cli::FiltersAction;
use crate::config::ClientConfig;
use crate::dashboard::Dashboard;
use crate::error::ClientResult;
use crate::session::Session;

/// Runs a filters action against the configured store. Store errors are
/// returned, not swallowed.
pub fn run(action: &FiltersAction, config: &ClientConfig, user_id: &str) -> ClientResult<()> {
    let mut store = super::open_configured_store(config)?;
    let session = Session::start(user_id);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match action {
        FiltersAction::Save { hide } => save(hide, config, store.as_mut(), &session, &mut out),
        FiltersAction::Load => load(store.as_ref(), &session, &mut out),
        FiltersAction::Show => show(config, store.as_ref(), &session, &mut out),
    }
}

/// Saves the tokens parsed from `hide`. An expression without tokens
/// clears the saved list.
pub fn save<W: Write>(
    hide: &str,
    config: &ClientConfig,
    store: &mut dyn ExclusionStore,
    session: &Session,
    out: &mut W,
) -> ClientResult<()> {
    let dashboard = Dashboard::new(config.filters.to_filter_config()).with_expression(hide);
    let saved = dashboard.save_filters(store, session)?;
    if saved.is_empty() {
        writeln!(out, "Cleared saved filters for {}", session.user_id)?;
    } else {
        writeln!(
            out,
            "Saved {} exclusion(s) for {}: {}",
            saved.len(),
            session.user_id,
            saved.to_expression()
        )?;
    }
    Ok(())
}

/// Prints the saved list as an expression ready for `--hide`.
pub fn load<W: Write>(
    store: &dyn ExclusionStore,
    session: &Session,
    out: &mut W,
) -> ClientResult<()> {
    let mut dashboard = Dashboard::default();
    let saved = dashboard.load_saved_filters(store, session)?;
    if saved.is_empty() {
        writeln!(out, "No saved filters for {}", session.user_id)?;
    } else {
        writeln!(out, "{}", dashboard.input().expression())?;
    }
    Ok(())
}

/// Prints the saved tokens, one per line, with the store location.
pub fn show<W: Write>(
    config: &ClientConfig,
    store: &dyn ExclusionStore,
    session: &Session,
    out: &mut W,
) -> ClientResult<()> {
    let tokens = store.load(&session.user_id)?;

    writeln!(out, "user: {}", session.user_id)?;
    match store.backend() {
        "memory" => writeln!(out, "store: memory")?,
        backend => writeln!(
            out,
            "store: {backend} ({})",
            config.store.resolved_path().display()
        )?,
    }
    if tokens.is_empty() {
        writeln!(out, "exclusions: none")?;
    } else {
        writeln!(out, "exclusions:")?;
        for token in &tokens {
            writeln!(out, "  {token}")?;
        }
    }
    Ok(())
}
