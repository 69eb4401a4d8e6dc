//! History port: Trait for the session-scoped assessment ledger.
//!
//! The ledger is append-only and lives exactly as long as the session that
//! owns it. There is intentionally no delete operation.

use crate::domain::HistoryEntry;

/// A page of history entries, most recent first.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    /// Entries in this page
    pub items: Vec<HistoryEntry>,
    /// Total count of all entries (for UI pagination)
    pub total_count: usize,
    /// Current page offset
    pub offset: usize,
    /// Page size limit
    pub limit: usize,
    /// Whether there are more pages
    pub has_more: bool,
}

impl HistoryPage {
    /// Create a new history page.
    #[must_use]
    pub fn new(items: Vec<HistoryEntry>, total_count: usize, offset: usize, limit: usize) -> Self {
        let has_more = offset + items.len() < total_count;
        Self {
            items,
            total_count,
            offset,
            limit,
            has_more,
        }
    }

    /// Get the next page offset.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        if self.has_more {
            Some(self.offset + self.limit)
        } else {
            None
        }
    }

    /// Get the previous page offset.
    #[must_use]
    pub fn prev_offset(&self) -> Option<usize> {
        if self.offset > 0 {
            Some(self.offset.saturating_sub(self.limit))
        } else {
            None
        }
    }
}

/// Append-only store of past assessments.
pub trait HistoryStore {
    /// Append an entry. Entries are never mutated afterwards.
    fn append(&mut self, entry: HistoryEntry);

    /// All entries, most recent first.
    fn list_all(&self) -> Vec<HistoryEntry>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether nothing has been stored yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recently appended entry.
    fn latest(&self) -> Option<HistoryEntry> {
        self.list_all().into_iter().next()
    }

    /// Load a window over the most-recent-first ordering.
    ///
    /// # Arguments
    /// * `offset` - Starting position (0-indexed, 0 = newest)
    /// * `limit` - Maximum number of items to return
    fn page(&self, offset: usize, limit: usize) -> HistoryPage {
        let total = self.len();
        let items = self.list_all().into_iter().skip(offset).take(limit).collect();
        HistoryPage::new(items, total, offset, limit)
    }
}
