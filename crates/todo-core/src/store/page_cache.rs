//! Remote page cache.
//!
//! Holds the last fetch outcome for every page number that has been
//! resolved this session, keyed by page. Entries are replaced, never edited:
//! a settled fetch swaps in a new item list or records a failure.
//!
//! # Staleness
//! A loaded page younger than `stale_after` is served as-is. Once it ages
//! out, resolving it again schedules a background refresh while the old
//! items stay visible until the refresh lands.
//!
//! # Ordering
//! Every fetch carries a ticket from a session-wide counter. A result whose
//! ticket is older than the newest result already applied to that page is
//! dropped, so an out-of-order response can never roll a page back.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::models::Todo;

pub type Ticket = u64;

/// A fetch the host should perform on behalf of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: u32,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Never resolved
    Absent,
    /// Resolved, first result not in yet
    Pending,
    Loaded,
    Failed,
}

/// Snapshot of what the cache holds for one page.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResult {
    Absent,
    Pending,
    Loaded(Vec<Todo>),
    Failed(FetchError),
}

#[derive(Debug, Clone, Default)]
struct PageEntry {
    /// Items from the newest successful fetch
    todos: Option<Vec<Todo>>,
    loaded_at: Option<Instant>,
    /// Newest failure; cleared by a later success or by a retry with no data
    error: Option<FetchError>,
    /// Newest ticket issued and not yet settled
    in_flight: Option<Ticket>,
    /// Newest ticket whose result was stored
    applied: Option<Ticket>,
}

impl PageEntry {
    fn status(&self) -> PageStatus {
        if self.todos.is_some() {
            PageStatus::Loaded
        } else if self.error.is_some() {
            PageStatus::Failed
        } else {
            PageStatus::Pending
        }
    }

    fn is_stale(&self, now: Instant, stale_after: Duration) -> bool {
        match self.loaded_at {
            Some(loaded_at) => now.saturating_duration_since(loaded_at) >= stale_after,
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemotePageCache {
    entries: HashMap<u32, PageEntry>,
    stale_after: Duration,
    next_ticket: Ticket,
}

impl RemotePageCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            next_ticket: 1,
        }
    }

    fn issue(&mut self, page: u32) -> FetchRequest {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let entry = self.entries.entry(page).or_default();
        entry.in_flight = Some(ticket);
        FetchRequest { page, ticket }
    }

    /// Fetch-or-serve for `page`. Returns the request to run, if any.
    ///
    /// Fresh loaded pages, pages with a fetch in flight and failed pages
    /// yield `None`; failed pages only refetch through [`Self::retry`].
    pub fn resolve(&mut self, page: u32, now: Instant) -> Option<FetchRequest> {
        let (status, stale, in_flight) = match self.entries.get(&page) {
            Some(entry) => (
                entry.status(),
                entry.is_stale(now, self.stale_after),
                entry.in_flight.is_some(),
            ),
            None => {
                tracing::debug!(page, "cache miss");
                return Some(self.issue(page));
            }
        };

        if in_flight {
            return None;
        }

        match status {
            PageStatus::Loaded if stale => {
                tracing::debug!(page, "stale page, revalidating");
                Some(self.issue(page))
            }
            PageStatus::Loaded | PageStatus::Failed => None,
            // Pending with nothing in flight: the last request was superseded
            PageStatus::Pending | PageStatus::Absent => Some(self.issue(page)),
        }
    }

    /// Force a new fetch for `page` regardless of staleness.
    pub fn retry(&mut self, page: u32) -> FetchRequest {
        let entry = self.entries.entry(page).or_default();
        if entry.todos.is_none() {
            entry.error = None;
        }
        tracing::debug!(page, "retry requested");
        self.issue(page)
    }

    /// Store the outcome of a fetch. Returns false when the result was
    /// superseded by a newer one and dropped.
    pub fn settle(
        &mut self,
        page: u32,
        ticket: Ticket,
        result: Result<Vec<Todo>, FetchError>,
        now: Instant,
    ) -> bool {
        let entry = self.entries.entry(page).or_default();

        if entry.applied.is_some_and(|applied| ticket < applied) {
            tracing::debug!(page, ticket, "dropping out-of-order result");
            return false;
        }

        entry.applied = Some(ticket);
        if entry.in_flight.is_some_and(|pending| pending <= ticket) {
            entry.in_flight = None;
        }

        match result {
            Ok(todos) => {
                tracing::debug!(page, ticket, count = todos.len(), "page loaded");
                entry.todos = Some(todos);
                entry.loaded_at = Some(now);
                entry.error = None;
            }
            Err(err) => {
                // Previously loaded items stay visible; the failure is kept
                // alongside them as a refresh error.
                tracing::warn!(page, ticket, error = %err, "page fetch failed");
                entry.error = Some(err);
            }
        }
        true
    }

    /// Items from the newest successful fetch of `page`, if any.
    pub fn currently_visible(&self, page: u32) -> Option<&[Todo]> {
        self.entries.get(&page)?.todos.as_deref()
    }

    pub fn status(&self, page: u32) -> PageStatus {
        self.entries
            .get(&page)
            .map(PageEntry::status)
            .unwrap_or(PageStatus::Absent)
    }

    pub fn result(&self, page: u32) -> RemoteResult {
        let Some(entry) = self.entries.get(&page) else {
            return RemoteResult::Absent;
        };
        match (&entry.todos, &entry.error) {
            (Some(todos), _) => RemoteResult::Loaded(todos.clone()),
            (None, Some(err)) => RemoteResult::Failed(err.clone()),
            (None, None) => RemoteResult::Pending,
        }
    }

    pub fn is_fetching(&self, page: u32) -> bool {
        self.entries
            .get(&page)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Failure of the newest attempt when no data is available for `page`.
    pub fn error(&self, page: u32) -> Option<&FetchError> {
        let entry = self.entries.get(&page)?;
        match entry.todos {
            Some(_) => None,
            None => entry.error.as_ref(),
        }
    }

    /// Failure of a refresh while older data is still being shown.
    pub fn refresh_error(&self, page: u32) -> Option<&FetchError> {
        let entry = self.entries.get(&page)?;
        entry.todos.as_ref().and(entry.error.as_ref())
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }
}

impl Default for RemotePageCache {
    fn default() -> Self {
        Self::new(crate::constants::STALE_AFTER)
    }
}
