use crate::constants::{FIRST_PAGE, TOTAL_PAGES};

/// Active page selection, bounded to `[1, TOTAL_PAGES]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    page: u32,
    total_pages: u32,
}

impl Navigator {
    pub fn new() -> Self {
        Self::with_total_pages(TOTAL_PAGES)
    }

    pub fn with_total_pages(total_pages: u32) -> Self {
        Self {
            page: FIRST_PAGE,
            total_pages: total_pages.max(FIRST_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn in_bounds(&self, target: u32) -> bool {
        (FIRST_PAGE..=self.total_pages).contains(&target)
    }

    /// Move to `target`. Out-of-range targets are ignored.
    /// Returns true when the active page changed.
    pub fn go_to(&mut self, target: u32) -> bool {
        if !self.in_bounds(target) || target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > FIRST_PAGE
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
