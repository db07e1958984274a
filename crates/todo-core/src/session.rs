//! Dashboard session: the single owned aggregate of page cache, overrides,
//! navigation, filter and add-form state, driven by [`DashboardSession::reduce`].
//!
//! The reducer never performs I/O. Fetches come back as [`Effect`]s for the
//! host to run; their results re-enter as [`Action::PageFetched`].

use std::time::Instant;

use crate::config::CoreConfig;
use crate::constants::ADDING_FLASH;
use crate::error::{FetchError, ValidationError};
use crate::models::{Filter, Todo};
use crate::mutations::{self, IdGenerator};
use crate::navigation::Navigator;
use crate::projection::{self, DashboardView, PageView};
use crate::store::{FetchRequest, OverrideStore, RemotePageCache, Ticket};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GoTo(u32),
    NextPage,
    PrevPage,
    SetFilter(Filter),
    CycleFilter,
    /// Force a refetch of the active page
    Retry,
    /// Re-resolve the active page; refetches only if it went stale
    Revalidate,
    Toggle(u64),
    /// Add-form text changed
    EditDraft(String),
    /// Add the current draft as a new todo
    SubmitDraft,
    AddItem(String),
    PageFetched {
        page: u32,
        ticket: Ticket,
        result: Result<Vec<Todo>, FetchError>,
    },
    Connectivity {
        offline: bool,
    },
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    cache: RemotePageCache,
    overrides: OverrideStore,
    nav: Navigator,
    filter: Filter,
    offline: bool,
    ids: IdGenerator,
    draft: String,
    input_error: Option<ValidationError>,
    adding_until: Option<Instant>,
}

impl DashboardSession {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            cache: RemotePageCache::new(config.stale_after),
            overrides: OverrideStore::new(),
            nav: Navigator::new(),
            filter: Filter::default(),
            offline: false,
            ids: IdGenerator::new(),
            draft: String::new(),
            input_error: None,
            adding_until: None,
        }
    }

    /// Resolve the initial page.
    pub fn start(&mut self, now: Instant) -> Vec<Effect> {
        self.resolve_active(now)
    }

    pub fn reduce(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        match action {
            Action::GoTo(target) => self.navigate(|nav| nav.go_to(target), now),
            Action::NextPage => self.navigate(Navigator::next, now),
            Action::PrevPage => self.navigate(Navigator::prev, now),
            Action::SetFilter(filter) => {
                self.filter = filter;
                Vec::new()
            }
            Action::CycleFilter => {
                self.filter = self.filter.next();
                Vec::new()
            }
            Action::Retry => {
                let request = self.cache.retry(self.nav.page());
                vec![Effect::Fetch(request)]
            }
            Action::Revalidate => self.resolve_active(now),
            Action::Toggle(id) => {
                mutations::toggle_completion(&mut self.overrides, &self.cache, self.nav.page(), id);
                Vec::new()
            }
            Action::EditDraft(text) => {
                if self.input_error.is_some() && !text.trim().is_empty() {
                    self.input_error = None;
                }
                self.draft = text;
                Vec::new()
            }
            Action::SubmitDraft => {
                if self.is_adding(now) {
                    return Vec::new();
                }
                let title = std::mem::take(&mut self.draft);
                if self.add_item(&title, now).is_err() {
                    self.draft = title;
                }
                Vec::new()
            }
            Action::AddItem(title) => {
                if let Err(err) = self.add_item(&title, now) {
                    tracing::debug!(%err, "add rejected");
                }
                Vec::new()
            }
            Action::PageFetched {
                page,
                ticket,
                result,
            } => {
                self.cache.settle(page, ticket, result, now);
                Vec::new()
            }
            Action::Connectivity { offline } => {
                if self.offline != offline {
                    tracing::info!(offline, "connectivity changed");
                }
                self.offline = offline;
                Vec::new()
            }
            Action::Tick => {
                if self.adding_until.is_some_and(|until| now >= until) {
                    self.adding_until = None;
                }
                Vec::new()
            }
        }
    }

    /// Add a todo to the active page, recording any validation error for
    /// the add form.
    pub fn add_item(&mut self, title: &str, now: Instant) -> Result<Todo, ValidationError> {
        let page = self.nav.page();
        match mutations::add_item(&mut self.overrides, &self.cache, &mut self.ids, page, title) {
            Ok(todo) => {
                self.input_error = None;
                self.adding_until = Some(now + ADDING_FLASH);
                Ok(todo)
            }
            Err(err) => {
                self.input_error = Some(err);
                Err(err)
            }
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Navigator) -> bool, now: Instant) -> Vec<Effect> {
        if !step(&mut self.nav) {
            return Vec::new();
        }
        tracing::debug!(page = self.nav.page(), "navigated");
        self.resolve_active(now)
    }

    fn resolve_active(&mut self, now: Instant) -> Vec<Effect> {
        self.cache
            .resolve(self.nav.page(), now)
            .map(Effect::Fetch)
            .into_iter()
            .collect()
    }

    pub fn active_page(&self) -> u32 {
        self.nav.page()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn is_adding(&self, now: Instant) -> bool {
        self.adding_until.is_some_and(|until| now < until)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn input_error(&self) -> Option<ValidationError> {
        self.input_error
    }

    pub fn cache(&self) -> &RemotePageCache {
        &self.cache
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Projection of `page` under `filter`, independent of the active page.
    pub fn project(&self, page: u32, filter: Filter) -> PageView {
        projection::project(&self.cache, &self.overrides, page, filter)
    }

    pub fn view(&self, now: Instant) -> DashboardView {
        let page = self.nav.page();
        let load = projection::load_state(&self.cache, page, self.offline);
        let syncing = self.cache.is_fetching(page);
        let adding = self.is_adding(now);

        DashboardView {
            page,
            total_pages: self.nav.total_pages(),
            filter: self.filter,
            todos: self.project(page, self.filter),
            can_prev: self.nav.can_go_prev() && !load.is_loading(),
            can_next: self.nav.can_go_next() && !load.is_loading(),
            can_retry: load.is_failed() && !syncing,
            load,
            syncing,
            has_override: self.overrides.contains(page),
            refresh_error: self.cache.refresh_error(page).map(ToString::to_string),
            draft: self.draft.clone(),
            input_error: self.input_error.map(|err| err.to_string()),
            adding,
            can_submit: !self.draft.trim().is_empty() && !adding,
        }
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(&CoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_PAGES;
    use crate::projection::LoadState;
    use std::time::Duration;

    fn remote_page(page: u32) -> Vec<Todo> {
        let first = (page as u64 - 1) * 10 + 1;
        (first..first + 10)
            .map(|id| Todo {
                owner_id: 1,
                id,
                title: format!("remote {}", id),
                completed: false,
            })
            .collect()
    }

    fn fetch_of(effects: &[Effect]) -> FetchRequest {
        match effects {
            [Effect::Fetch(request)] => *request,
            other => panic!("expected a single fetch, got {:?}", other),
        }
    }

    fn deliver(session: &mut DashboardSession, request: FetchRequest, now: Instant) {
        session.reduce(
            Action::PageFetched {
                page: request.page,
                ticket: request.ticket,
                result: Ok(remote_page(request.page)),
            },
            now,
        );
    }

    fn started() -> (DashboardSession, Instant) {
        let mut session = DashboardSession::default();
        let now = Instant::now();
        let request = fetch_of(&session.start(now));
        assert_eq!(request.page, 1);
        deliver(&mut session, request, now);
        (session, now)
    }

    #[test]
    fn test_out_of_bounds_navigation_is_ignored() {
        let (mut session, now) = started();

        assert!(session.reduce(Action::GoTo(0), now).is_empty());
        assert_eq!(session.active_page(), 1);
        assert!(session.reduce(Action::GoTo(TOTAL_PAGES + 1), now).is_empty());
        assert_eq!(session.active_page(), 1);
        assert!(session.reduce(Action::PrevPage, now).is_empty());
        assert_eq!(session.active_page(), 1);
    }

    #[test]
    fn test_navigation_resolves_new_page_once() {
        let (mut session, now) = started();

        let request = fetch_of(&session.reduce(Action::NextPage, now));
        assert_eq!(request.page, 2);
        assert!(session.view(now).load.is_loading());
        assert!(session.view(now).syncing);

        deliver(&mut session, request, now);
        session.reduce(Action::PrevPage, now);
        // Page 2 is fresh, so coming back to it does not refetch
        assert!(session.reduce(Action::NextPage, now).is_empty());
        assert_eq!(session.view(now).todos.total_for_page, 10);
    }

    #[test]
    fn test_toggle_then_completed_filter() {
        let (mut session, now) = started();
        let first = session.view(now).todos.displayed[0].clone();
        assert!(!first.completed);

        session.reduce(Action::Toggle(first.id), now);
        session.reduce(Action::SetFilter(Filter::Completed), now);

        let view = session.view(now);
        assert_eq!(
            view.todos.displayed,
            vec![Todo {
                completed: true,
                ..first
            }]
        );
        assert_eq!(view.todos.total_for_page, 10);
    }

    #[test]
    fn test_add_buy_milk() {
        let (mut session, now) = started();

        session.reduce(Action::AddItem("Buy milk".to_string()), now);

        let page = session.overrides().get(1).unwrap();
        assert_eq!(page.len(), 11);
        assert_eq!(page[0].title, "Buy milk");
        assert!(!page[0].completed);
    }

    #[test]
    fn test_blank_add_creates_no_override() {
        let (mut session, now) = started();

        session.reduce(Action::AddItem(String::new()), now);
        session.reduce(Action::AddItem("   ".to_string()), now);

        assert!(!session.overrides().contains(1));
        assert_eq!(session.input_error(), Some(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_input_error_clears_on_non_blank_draft() {
        let (mut session, now) = started();

        session.reduce(Action::EditDraft("  ".to_string()), now);
        session.reduce(Action::SubmitDraft, now);
        assert_eq!(
            session.view(now).input_error.as_deref(),
            Some("Title cannot be empty")
        );

        session.reduce(Action::EditDraft("   ".to_string()), now);
        assert!(session.input_error().is_some());

        session.reduce(Action::EditDraft("Walk dog".to_string()), now);
        assert!(session.input_error().is_none());

        session.reduce(Action::SubmitDraft, now);
        assert_eq!(session.draft(), "");
        assert_eq!(session.overrides().get(1).unwrap()[0].title, "Walk dog");
    }

    #[test]
    fn test_adding_flag_expires() {
        let (mut session, now) = started();

        session.reduce(Action::EditDraft("one".to_string()), now);
        session.reduce(Action::SubmitDraft, now);
        assert!(session.view(now).adding);

        // Submissions are held back while the flag is up
        session.reduce(Action::EditDraft("two".to_string()), now);
        assert!(!session.view(now).can_submit);
        session.reduce(Action::SubmitDraft, now + Duration::from_millis(100));
        assert_eq!(session.overrides().get(1).unwrap().len(), 11);

        let later = now + Duration::from_millis(250);
        session.reduce(Action::Tick, later);
        assert!(!session.view(later).adding);
        session.reduce(Action::SubmitDraft, later);
        assert_eq!(session.overrides().get(1).unwrap().len(), 12);
    }

    #[test]
    fn test_late_result_never_overrides_local_edits() {
        let mut session = DashboardSession::default();
        let now = Instant::now();
        let request = fetch_of(&session.start(now));

        // Edit before the first fetch lands: seeded from nothing
        session.reduce(Action::AddItem("early".to_string()), now);
        deliver(&mut session, request, now);

        let view = session.view(now);
        assert_eq!(view.todos.total_for_page, 1);
        assert_eq!(view.todos.displayed[0].title, "early");
        assert_eq!(session.cache().currently_visible(1).map(|t| t.len()), Some(10));
    }

    #[test]
    fn test_result_for_inactive_page_is_cached_but_not_shown() {
        let (mut session, now) = started();

        let request = fetch_of(&session.reduce(Action::GoTo(5), now));
        session.reduce(Action::GoTo(1), now);
        deliver(&mut session, request, now);

        assert_eq!(session.view(now).page, 1);
        assert_eq!(session.view(now).todos.displayed[0].id, 1);
        assert_eq!(session.project(5, Filter::All).displayed[0].id, 41);
    }

    #[test]
    fn test_failure_exposes_retry() {
        let mut session = DashboardSession::default();
        let now = Instant::now();
        let request = fetch_of(&session.start(now));

        session.reduce(
            Action::PageFetched {
                page: 1,
                ticket: request.ticket,
                result: Err(FetchError::status(500)),
            },
            now,
        );

        let view = session.view(now);
        assert_eq!(view.todos, PageView::default());
        assert!(view.load.is_failed());
        assert!(view.can_retry);

        let retry = fetch_of(&session.reduce(Action::Retry, now));
        assert!(session.view(now).load.is_loading());
        deliver(&mut session, retry, now);
        assert_eq!(session.view(now).load, LoadState::Ready);
    }

    #[test]
    fn test_add_on_failed_page_keeps_retry() {
        let mut session = DashboardSession::default();
        let now = Instant::now();
        let request = fetch_of(&session.start(now));
        session.reduce(
            Action::PageFetched {
                page: 1,
                ticket: request.ticket,
                result: Err(FetchError::status(500)),
            },
            now,
        );

        session.reduce(Action::AddItem("note".to_string()), now);

        let view = session.view(now);
        assert!(view.has_override);
        assert_eq!(view.todos.total_for_page, 1);
        assert!(view.load.is_failed());
        assert!(view.can_retry);

        let retry = fetch_of(&session.reduce(Action::Retry, now));
        deliver(&mut session, retry, now);
        let view = session.view(now);
        assert_eq!(view.load, LoadState::Ready);
        assert_eq!(view.todos.displayed[0].title, "note");
        assert_eq!(view.todos.total_for_page, 1);
    }

    #[test]
    fn test_add_while_pending_keeps_loading() {
        let mut session = DashboardSession::default();
        let now = Instant::now();
        let request = fetch_of(&session.start(now));

        session.reduce(Action::AddItem("early".to_string()), now);

        let view = session.view(now);
        assert!(view.has_override);
        assert!(view.load.is_loading());
        assert!(!view.can_next);
        assert!(!view.can_prev);

        deliver(&mut session, request, now);
        let view = session.view(now);
        assert_eq!(view.load, LoadState::Ready);
        assert!(view.can_next);
        assert_eq!(view.todos.displayed[0].title, "early");
    }

    #[test]
    fn test_offline_signal_changes_headline() {
        let mut session = DashboardSession::default();
        let now = Instant::now();
        let request = fetch_of(&session.start(now));
        session.reduce(Action::Connectivity { offline: true }, now);
        session.reduce(
            Action::PageFetched {
                page: 1,
                ticket: request.ticket,
                result: Err(FetchError::status(503)),
            },
            now,
        );

        match session.view(now).load {
            LoadState::Failed { headline, detail } => {
                assert!(headline.starts_with("You appear to be offline"));
                assert_eq!(detail, "Failed to fetch todos");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_page_revalidates_on_return() {
        let (mut session, now) = started();

        assert!(session.reduce(Action::Revalidate, now).is_empty());
        let later = now + Duration::from_secs(31);
        let refresh = fetch_of(&session.reduce(Action::Revalidate, later));
        assert_eq!(refresh.page, 1);

        let view = session.view(later);
        assert_eq!(view.load, LoadState::Ready);
        assert!(view.syncing);
        assert_eq!(view.todos.total_for_page, 10);
    }

    #[test]
    fn test_filter_does_not_touch_overrides() {
        let (mut session, now) = started();

        session.reduce(Action::CycleFilter, now);
        assert_eq!(session.filter(), Filter::Open);
        assert!(session.overrides().is_empty());
    }
}
