// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Repository layer: in-memory filter/sort/paginate over the JSON store.
//!
//! Repositories load the full collection, apply filters and ordering in
//! memory, and page the result. They never cache between calls; every
//! operation sees the file as it currently is.

mod modules;
mod prompts;
mod users;

pub use modules::{ModuleFilter, ModuleRepository, ModuleSort};
pub use prompts::{PromptFilter, PromptRepository, PromptSort};
pub use users::UserRepository;

use serde::Serialize;

use crate::config::consts::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination request. Page numbers are 1-based; out-of-range values are
/// clamped rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl Page {
    fn resolve(&self) -> (usize, usize) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }
}

/// One page of a filtered listing, plus the total match count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> ListResult<T> {
    /// Project the items into another shape, keeping the page envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

fn paginate<T>(sorted: Vec<T>, page: Page) -> ListResult<T> {
    let total = sorted.len();
    let (page, page_size) = page.resolve();
    let start = (page - 1) * page_size;
    let items = sorted.into_iter().skip(start).take(page_size).collect();
    ListResult {
        items,
        total,
        page,
        page_size,
    }
}

/// Case-insensitive substring match over a haystack of fields and tags.
fn matches_search(needle: &str, fields: &[&str], tags: &[String]) -> bool {
    let needle = needle.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
        || tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Tag filters are conjunctive: every requested tag must be present.
fn has_all_tags(requested: &[String], present: &[String]) -> bool {
    requested.iter().all(|tag| present.contains(tag))
}
