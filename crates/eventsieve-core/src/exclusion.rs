//! Keyword negation.
//!
//! A negation expression is a comma-separated list such as
//! `"-standup, -lunch"`. Only entries starting with `-` become exclusion
//! tokens; anything else is ignored rather than treated as a positive
//! filter. An event is hidden when any token is a plain, case-insensitive
//! substring of its title or description.
//!
//! [`NegationInput`] holds the live expression text and notifies registered
//! [`ExpressionObserver`]s whenever it changes, e.g. [`QueryParamMirror`]
//! which keeps a `hide=` URL query parameter in sync.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::event::CanonicalEvent;

/// Query parameter that mirrors the negation expression.
pub const HIDE_PARAM: &str = "hide";

/// An ordered, de-duplicated set of lowercase exclusion tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    tokens: Vec<String>,
}

impl ExclusionSet {
    /// Parses a negation expression.
    ///
    /// Each comma-separated piece is trimmed; pieces that do not start with
    /// `-` are discarded. Exactly one leading `-` is stripped, then the rest
    /// is trimmed and lowercased. A bare `-` yields the empty token, which
    /// matches every event.
    pub fn parse(expression: &str) -> Self {
        let mut set = Self::default();
        for piece in expression.split(',').map(str::trim) {
            if let Some(rest) = piece.strip_prefix('-') {
                set.insert(rest.trim().to_lowercase());
            }
        }
        set
    }

    /// Builds a set from already-extracted tokens (no `-` prefix expected).
    /// Empty tokens are skipped.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for token in tokens {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() {
                set.insert(token);
            }
        }
        set
    }

    fn insert(&mut self, token: String) {
        if !self.tokens.contains(&token) {
            self.tokens.push(token);
        }
    }

    /// The tokens in first-seen order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Returns the first token hiding this event, if any.
    pub fn matching_token(&self, event: &CanonicalEvent) -> Option<&str> {
        if self.tokens.is_empty() {
            return None;
        }
        let title = event.title.to_lowercase();
        let description = event.description.to_lowercase();
        self.tokens
            .iter()
            .find(|token| title.contains(token.as_str()) || description.contains(token.as_str()))
            .map(String::as_str)
    }

    /// Returns true if any token hides this event.
    pub fn matches(&self, event: &CanonicalEvent) -> bool {
        self.matching_token(event).is_some()
    }

    /// Keeps the events no token matches, preserving input order.
    pub fn apply<I>(&self, events: I) -> Vec<CanonicalEvent>
    where
        I: IntoIterator<Item = CanonicalEvent>,
    {
        events
            .into_iter()
            .filter(|event| match self.matching_token(event) {
                Some(token) => {
                    trace!(title = %event.title, token, "hidden by exclusion");
                    false
                }
                None => true,
            })
            .collect()
    }

    /// Renders the set back into expression form, e.g. `-sync,-demo`.
    pub fn to_expression(&self) -> String {
        self.tokens
            .iter()
            .map(|t| format!("-{t}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Receives the negation expression whenever it changes.
pub trait ExpressionObserver {
    fn expression_changed(&mut self, expression: &str);
}

impl<T: ExpressionObserver> ExpressionObserver for Rc<RefCell<T>> {
    fn expression_changed(&mut self, expression: &str) {
        self.borrow_mut().expression_changed(expression);
    }
}

/// The live negation expression and its observers.
#[derive(Default)]
pub struct NegationInput {
    expression: String,
    observers: Vec<Box<dyn ExpressionObserver>>,
}

impl std::fmt::Debug for NegationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NegationInput")
            .field("expression", &self.expression)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl NegationInput {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            observers: Vec::new(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The tokens currently in effect.
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::parse(&self.expression)
    }

    /// Registers an observer and immediately syncs it with the current text.
    pub fn register(&mut self, mut observer: Box<dyn ExpressionObserver>) {
        observer.expression_changed(&self.expression);
        self.observers.push(observer);
    }

    /// Replaces the expression, notifying observers if it changed.
    pub fn set_expression(&mut self, expression: impl Into<String>) {
        let expression = expression.into();
        if expression == self.expression {
            return;
        }
        debug!(%expression, "negation expression changed");
        self.expression = expression;
        for observer in &mut self.observers {
            observer.expression_changed(&self.expression);
        }
    }

    /// Replaces the expression with a previously saved set.
    pub fn load_saved(&mut self, saved: &ExclusionSet) {
        self.set_expression(saved.to_expression());
    }
}

/// Mirrors the negation expression into a URL query parameter.
#[derive(Debug, Clone)]
pub struct QueryParamMirror {
    url: Url,
}

impl QueryParamMirror {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Reads the `hide` parameter, empty when absent.
    pub fn initial_expression(url: &Url) -> String {
        url.query_pairs()
            .find(|(key, _)| key == HIDE_PARAM)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ExpressionObserver for QueryParamMirror {
    fn expression_changed(&mut self, expression: &str) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != HIDE_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &others {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(HIDE_PARAM, expression);
    }
}
