//! In-memory session history.
//!
//! Entries live in a `Vec` in submission order and are handed out newest
//! first. Nothing is written to disk: dropping the store ends the history.

use crate::domain::HistoryEntry;
use crate::ports::HistoryStore;

/// Session-lifetime history store.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for SessionHistory {
    fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    fn list_all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn latest(&self) -> Option<HistoryEntry> {
        self.entries.last().cloned()
    }

    fn page(&self, offset: usize, limit: usize) -> crate::ports::HistoryPage {
        let items = self
            .entries
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        crate::ports::HistoryPage::new(items, self.entries.len(), offset, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientRecord, RiskAssessment};

    fn entry(sequence: usize, age: u8) -> HistoryEntry {
        let record = PatientRecord {
            age,
            ..Default::default()
        };
        HistoryEntry::new(sequence, record, RiskAssessment::new(0, Vec::new(), 90.0))
    }

    fn filled(n: usize) -> SessionHistory {
        let mut history = SessionHistory::new();
        for i in 1..=n {
            history.append(entry(i, i as u8));
        }
        history
    }

    #[test]
    fn test_starts_empty() {
        let history = SessionHistory::new();
        assert!(history.is_empty());
        assert!(history.list_all().is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_list_all_is_most_recent_first() {
        let history = filled(5);
        let listed = history.list_all();

        assert_eq!(listed.len(), 5);
        let sequences: Vec<usize> = listed.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![5, 4, 3, 2, 1]);
        assert_eq!(history.latest().map(|e| e.sequence), Some(5));
    }

    #[test]
    fn test_pagination() {
        let history = filled(7);

        let first = history.page(0, 3);
        assert_eq!(first.items.len(), 3);
        assert_eq!(first.items[0].sequence, 7);
        assert_eq!(first.total_count, 7);
        assert!(first.has_more);
        assert_eq!(first.next_offset(), Some(3));
        assert_eq!(first.prev_offset(), None);

        let last = history.page(6, 3);
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].sequence, 1);
        assert!(!last.has_more);
        assert_eq!(last.next_offset(), None);
        assert_eq!(last.prev_offset(), Some(3));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let history = filled(2);
        let page = history.page(10, 5);
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }
}
