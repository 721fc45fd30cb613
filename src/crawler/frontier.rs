//! Frontier and visited-set bookkeeping
//!
//! The frontier owns the state of every internal page discovered during a
//! crawl. A URL is admitted once; it then moves Pending -> Fetching ->
//! Visited and is never admitted again.
//!
//! Pages are handed out in discovery order, but callers must not rely on any
//! particular order: with several fetches in flight, completions interleave.

use crate::state::PageState;
use crate::SieveError;
use std::collections::{HashMap, VecDeque};

/// Discovered internal pages and their crawl states
#[derive(Debug, Default)]
pub struct Frontier {
    /// State of every discovered URL
    states: HashMap<String, PageState>,

    /// Pending URLs, waiting to be fetched
    pending: VecDeque<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the seed
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed);
        frontier
    }

    /// Admits a URL unless it was already discovered
    ///
    /// Returns true if the URL is new.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.states.contains_key(&url) {
            return false;
        }

        self.states.insert(url.clone(), PageState::Pending);
        self.pending.push_back(url);
        true
    }

    /// Takes the next pending URL and marks it Fetching
    pub fn next(&mut self) -> Option<String> {
        let url = self.pending.pop_front()?;
        self.states.insert(url.clone(), PageState::Fetching);
        Some(url)
    }

    /// Marks a fetched URL as Visited
    pub fn complete(&mut self, url: &str) -> Result<(), SieveError> {
        self.transition(url, PageState::Visited)
    }

    /// Number of URLs waiting to be fetched
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of URLs already visited
    pub fn visited_len(&self) -> usize {
        self.states.values().filter(|s| s.is_terminal()).count()
    }

    fn transition(&mut self, url: &str, to: PageState) -> Result<(), SieveError> {
        let Some(current) = self.states.get_mut(url) else {
            return Err(SieveError::InvalidTransition {
                url: url.to_string(),
                from: PageState::Pending,
                to,
            });
        };

        if !current.can_transition_to(to) {
            return Err(SieveError::InvalidTransition {
                url: url.to_string(),
                from: *current,
                to,
            });
        }

        *current = to;
        Ok(())
    }
}
