//! Shared query parameter types for list handlers.

use pethaven_core::pagination::Page;
use serde::Deserialize;

/// `?limit=&offset=&sort=field:direction`.
///
/// Entity filters are a separate `Query<...Filter>` extractor on the same
/// handler.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Clamped page window.
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }
}

/// Pagination only, for lists without a sort key.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}
