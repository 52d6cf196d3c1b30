//! # Prefix Cursor
//!
//! Page-by-page traversal of a key namespace.
//!
//! ## Termination Rule
//!
//! A page holding fewer keys than the page size is the last page. An exactly
//! full final page is followed by one empty page, which also ends the walk.
//! After the last page the cursor yields `None` without touching the store.

use crate::domain::errors::MappingStoreError;
use crate::ports::outbound::MappingStore;

/// Page size used by batch jobs over the mapping store.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// One page of keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page index.
    pub index: usize,
    /// Keys on this page, ascending.
    pub keys: Vec<String>,
    /// True when this is the final page.
    pub done: bool,
}

/// Cursor over all keys sharing a prefix.
pub struct PrefixCursor<'a, S: MappingStore + ?Sized> {
    store: &'a S,
    prefix: &'a str,
    page_size: usize,
    next_index: usize,
    exhausted: bool,
}

impl<'a, S: MappingStore + ?Sized> PrefixCursor<'a, S> {
    pub fn new(store: &'a S, prefix: &'a str, page_size: usize) -> Self {
        Self {
            store,
            prefix,
            page_size,
            next_index: 0,
            exhausted: false,
        }
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    ///
    /// A listing error is returned as-is; the cursor does not advance, so
    /// callers that abort on error never observe a partially skipped page.
    pub fn next_page(&mut self) -> Result<Option<Page>, MappingStoreError> {
        if self.exhausted {
            return Ok(None);
        }

        let keys = self
            .store
            .list_keys_with_prefix(self.prefix, self.next_index, self.page_size)?;
        let done = keys.len() < self.page_size;
        let page = Page {
            index: self.next_index,
            keys,
            done,
        };

        self.next_index += 1;
        self.exhausted = done;
        Ok(Some(page))
    }

    /// Drain the cursor into a single key list.
    ///
    /// Used by batch jobs that delete the keys they visit: deleting while
    /// paging by offset would shift later keys into already-read pages.
    pub fn collect_keys(mut self) -> Result<Vec<String>, MappingStoreError> {
        let mut keys = Vec::new();
        while let Some(page) = self.next_page()? {
            keys.extend(page.keys);
        }
        Ok(keys)
    }

    pub fn prefix(&self) -> &str {
        self.prefix
    }
}
