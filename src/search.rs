//! Debounced search-as-you-type selection.
//!
//! [`SearchSelector`] owns no clock: callers pass `Instant`s to
//! [`SearchSelector::input`] and [`SearchSelector::poll`], which keeps the
//! debounce deterministic under test and lets the TUI drive it from its
//! event-poll loop.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub debounce_ms: u64,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            max_results: 50,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

type FilterFn<T> = Box<dyn Fn(&str) -> Vec<T>>;
type SelectFn<T> = Box<dyn FnMut(&T)>;

pub struct SearchSelector<T> {
    filter: FilterFn<T>,
    on_select: Option<SelectFn<T>>,
    options: SearchOptions,
    query: String,
    pending_since: Option<Instant>,
    candidates: Vec<T>,
    highlighted: Option<usize>,
    selected: Option<T>,
    visible: bool,
}

impl<T: Clone> SearchSelector<T> {
    /// `filter` returns candidates already ranked; the selector only truncates.
    pub fn new(options: SearchOptions, filter: impl Fn(&str) -> Vec<T> + 'static) -> Self {
        Self {
            filter: Box::new(filter),
            on_select: None,
            options,
            query: String::new(),
            pending_since: None,
            candidates: Vec::new(),
            highlighted: None,
            selected: None,
            visible: false,
        }
    }

    #[must_use]
    pub fn on_select(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Record new input text and restart the quiet period.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.query = text.trim().to_string();
        self.pending_since = Some(now);
    }

    /// Run the filter if input has been quiet for the debounce delay.
    /// Returns whether the filter ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.options.debounce() => {
                self.search();
                true
            }
            _ => false,
        }
    }

    /// Run any pending search immediately.
    pub fn flush(&mut self) -> bool {
        if self.pending_since.is_some() {
            self.search();
            true
        } else {
            false
        }
    }

    fn search(&mut self) {
        self.pending_since = None;
        self.highlighted = None;
        if self.query.is_empty() {
            self.candidates.clear();
            self.visible = false;
            return;
        }

        let mut found = (self.filter)(&self.query);
        found.truncate(self.options.max_results);
        self.candidates = found;
        self.visible = !self.candidates.is_empty();
    }

    pub fn move_down(&mut self) {
        if !self.visible || self.candidates.is_empty() {
            return;
        }
        let last = self.candidates.len() - 1;
        self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1).min(last)));
    }

    pub fn move_up(&mut self) {
        if !self.visible || self.candidates.is_empty() {
            return;
        }
        self.highlighted = self.highlighted.and_then(|i| i.checked_sub(1));
    }

    /// Select the highlighted candidate, if any.
    pub fn confirm(&mut self) -> Option<T> {
        if !self.visible {
            return None;
        }
        self.select(self.highlighted?)
    }

    /// Select a candidate by position, clearing the list and notifying the callback.
    pub fn select(&mut self, index: usize) -> Option<T> {
        let item = self.candidates.get(index)?.clone();
        self.candidates.clear();
        self.pending_since = None;
        self.hide();
        if let Some(callback) = self.on_select.as_mut() {
            callback(&item);
        }
        self.selected = Some(item.clone());
        Some(item)
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.pending_since = None;
        self.candidates.clear();
        self.selected = None;
        self.hide();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}
