//! View projection: what the dashboard shows for the active page.
//!
//! The base list is the page's override when one exists, otherwise the
//! remote cache's newest loaded items, otherwise empty. Because every view
//! is re-derived from current state, a late fetch result for a page that
//! now has an override can never leak into the display.

use crate::constants::{GENERIC_HEADLINE, OFFLINE_HEADLINE};
use crate::error::FetchError;
use crate::models::{Filter, Todo};
use crate::store::{OverrideStore, PageStatus, RemotePageCache};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageView {
    pub displayed: Vec<Todo>,
    /// Size of the base list before filtering ("records on this page")
    pub total_for_page: usize,
}

pub fn base_list<'a>(
    cache: &'a RemotePageCache,
    overrides: &'a OverrideStore,
    page: u32,
) -> &'a [Todo] {
    overrides
        .get(page)
        .or_else(|| cache.currently_visible(page))
        .unwrap_or_default()
}

pub fn project(
    cache: &RemotePageCache,
    overrides: &OverrideStore,
    page: u32,
    filter: Filter,
) -> PageView {
    let base = base_list(cache, overrides, page);
    PageView {
        displayed: filter.apply(base),
        total_for_page: base.len(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No data yet for the active page
    Loading,
    Ready,
    Failed { headline: String, detail: String },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }
}

pub fn failure_headline(offline: bool) -> &'static str {
    if offline {
        OFFLINE_HEADLINE
    } else {
        GENERIC_HEADLINE
    }
}

fn failed(err: &FetchError, offline: bool) -> LoadState {
    LoadState::Failed {
        headline: failure_headline(offline || err.is_offline()).to_string(),
        detail: err.to_string(),
    }
}

/// Load state comes from the remote cache alone. A local override changes
/// what is listed, never whether the page is loading or failed.
pub fn load_state(cache: &RemotePageCache, page: u32, offline: bool) -> LoadState {
    match cache.status(page) {
        PageStatus::Loaded => LoadState::Ready,
        PageStatus::Failed => match cache.error(page) {
            Some(err) => failed(err, offline),
            None => LoadState::Loading,
        },
        PageStatus::Pending | PageStatus::Absent => LoadState::Loading,
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub page: u32,
    pub total_pages: u32,
    pub filter: Filter,
    pub todos: PageView,
    pub load: LoadState,
    /// A fetch for the active page is in flight
    pub syncing: bool,
    pub can_prev: bool,
    pub can_next: bool,
    pub can_retry: bool,
    pub has_override: bool,
    pub refresh_error: Option<String>,
    pub draft: String,
    pub input_error: Option<String>,
    pub adding: bool,
    pub can_submit: bool,
}
