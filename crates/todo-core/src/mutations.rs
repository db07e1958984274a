//! Local edit commands.
//!
//! Both commands read the page's base list (override if present, otherwise
//! whatever the remote cache currently shows), derive a new list and commit
//! it as the page's override before returning. Nothing goes over the wire.

use crate::error::ValidationError;
use crate::models::Todo;
use crate::store::{OverrideStore, RemotePageCache};

/// Hands out ids for locally created todos: Unix milliseconds, bumped so
/// that two adds in the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_id_at(now_ms)
    }

    pub(crate) fn next_id_at(&mut self, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last + 1);
        self.last = id;
        id
    }
}

fn base_for(overrides: &OverrideStore, cache: &RemotePageCache, page: u32) -> Vec<Todo> {
    let fallback = cache.currently_visible(page).unwrap_or_default();
    overrides.ensure_seeded(page, fallback)
}

/// Flip `completed` on the todo with `id`. Commits an unchanged copy when
/// no todo on the page matches.
pub fn toggle_completion(
    overrides: &mut OverrideStore,
    cache: &RemotePageCache,
    page: u32,
    id: u64,
) {
    let updated = base_for(overrides, cache, page)
        .into_iter()
        .map(|todo| if todo.id == id { todo.toggled() } else { todo })
        .collect();
    overrides.set(page, updated);
}

/// Prepend a new local todo to `page`. Blank titles are rejected without
/// touching any state.
pub fn add_item(
    overrides: &mut OverrideStore,
    cache: &RemotePageCache,
    ids: &mut IdGenerator,
    page: u32,
    title: &str,
) -> Result<Todo, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let todo = Todo::local(ids.next_id(), title);
    let mut updated = vec![todo.clone()];
    updated.extend(base_for(overrides, cache, page));
    overrides.set(page, updated);

    tracing::info!(page, id = todo.id, "added local todo");
    Ok(todo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn loaded_cache(page: u32, todos: Vec<Todo>) -> RemotePageCache {
        let mut cache = RemotePageCache::default();
        let now = Instant::now();
        let req = cache.resolve(page, now).unwrap();
        cache.settle(page, req.ticket, Ok(todos), now);
        cache
    }

    fn remote_page() -> Vec<Todo> {
        (1..=10)
            .map(|id| Todo {
                owner_id: 1,
                id,
                title: format!("remote {}", id),
                completed: false,
            })
            .collect()
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let cache = loaded_cache(1, remote_page());
        let mut overrides = OverrideStore::new();

        toggle_completion(&mut overrides, &cache, 1, 3);
        let once = overrides.get(1).unwrap().to_vec();
        assert!(once[2].completed);
        assert!(once.iter().filter(|t| t.id != 3).all(|t| !t.completed));

        toggle_completion(&mut overrides, &cache, 1, 3);
        assert_eq!(overrides.get(1).unwrap(), remote_page().as_slice());
    }

    #[test]
    fn test_toggle_unknown_id_commits_copy() {
        let cache = loaded_cache(1, remote_page());
        let mut overrides = OverrideStore::new();

        toggle_completion(&mut overrides, &cache, 1, 999);
        assert!(overrides.contains(1));
        assert_eq!(overrides.get(1).unwrap(), remote_page().as_slice());
    }

    #[test]
    fn test_toggle_without_remote_data_commits_empty() {
        let cache = RemotePageCache::default();
        let mut overrides = OverrideStore::new();

        toggle_completion(&mut overrides, &cache, 5, 1);
        assert_eq!(overrides.get(5), Some(&[][..]));
    }

    #[test]
    fn test_add_prepends() {
        let cache = loaded_cache(1, remote_page());
        let mut overrides = OverrideStore::new();
        let mut ids = IdGenerator::new();

        let added = add_item(&mut overrides, &cache, &mut ids, 1, "  Buy milk ").unwrap();
        let page = overrides.get(1).unwrap();
        assert_eq!(page.len(), 11);
        assert_eq!(page[0], added);
        assert_eq!(page[0].title, "Buy milk");
        assert!(!page[0].completed);
        assert_eq!(page[0].owner_id, 0);
        assert_eq!(&page[1..], remote_page().as_slice());
    }

    #[test]
    fn test_add_blank_title_is_rejected() {
        let cache = loaded_cache(1, remote_page());
        let mut overrides = OverrideStore::new();
        let mut ids = IdGenerator::new();

        assert_eq!(
            add_item(&mut overrides, &cache, &mut ids, 1, ""),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            add_item(&mut overrides, &cache, &mut ids, 1, "   "),
            Err(ValidationError::EmptyTitle)
        );
        assert!(!overrides.contains(1));
    }

    #[test]
    fn test_add_blank_title_keeps_existing_override() {
        let cache = loaded_cache(1, remote_page());
        let mut overrides = OverrideStore::new();
        let mut ids = IdGenerator::new();
        toggle_completion(&mut overrides, &cache, 1, 1);
        let before = overrides.get(1).unwrap().to_vec();

        assert!(add_item(&mut overrides, &cache, &mut ids, 1, "\t").is_err());
        assert_eq!(overrides.get(1).unwrap(), before.as_slice());
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(1_000), 1_000);
        assert_eq!(ids.next_id_at(1_000), 1_001);
        assert_eq!(ids.next_id_at(999), 1_002);
        assert_eq!(ids.next_id_at(5_000), 5_000);
    }
}
