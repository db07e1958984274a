use std::collections::HashMap;

use crate::models::Todo;

/// Per-page local replacements for remote data.
///
/// Once a page has an override it shadows the remote cache for the rest of
/// the session. There is no removal.
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    pages: HashMap<u32, Vec<Todo>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: u32) -> Option<&[Todo]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Replace the override for `page` wholesale.
    pub fn set(&mut self, page: u32, todos: Vec<Todo>) {
        tracing::debug!(page, count = todos.len(), "override committed");
        self.pages.insert(page, todos);
    }

    /// Base list for the next mutation on `page`: the existing override, or
    /// a copy of `fallback`. Nothing is committed until [`Self::set`].
    pub fn ensure_seeded(&self, page: u32, fallback: &[Todo]) -> Vec<Todo> {
        match self.pages.get(&page) {
            Some(existing) => existing.clone(),
            None => fallback.to_vec(),
        }
    }

    /// Number of pages carrying an override
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
