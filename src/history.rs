//! Bounded undo history.
//!
//! Each entry is a reverse diff: the window one edit wrote to, plus the
//! overlay records that lived inside that window just before the write.
//! Positions of the window without a record were unedited at the time.
//!
//! The history is a FIFO with a hard capacity. Pushing past the limit drops
//! the oldest entry, so memory stays bounded no matter how long a session
//! runs. Entries are never merged or compacted.

use std::collections::VecDeque;

use crate::interval::{Extent, Window};
use crate::overlay::ChangeRecord;
use crate::span::Element;

/// The overlay content displaced by one historized edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoEntry<T: Element> {
    /// Window the edit wrote to.
    pub window: Window,
    /// Records inside `window` before the edit, clipped and ascending.
    pub records: Vec<ChangeRecord<T>>,
}

impl<T: Element> UndoEntry<T> {
    pub fn new(window: Window, records: Vec<ChangeRecord<T>>) -> UndoEntry<T> {
        debug_assert!(records.iter().all(|r| r.offset >= window.offset && r.end() <= window.end()));
        return UndoEntry { window, records };
    }

    /// Lowest position this entry restores.
    #[inline]
    pub fn offset(&self) -> u64 {
        return self.window.offset;
    }
}

/// Capacity-bounded stack of undo entries with oldest-first eviction.
#[derive(Clone, Debug)]
pub struct UndoHistory<T: Element> {
    entries: VecDeque<UndoEntry<T>>,
    limit: usize,
}

impl<T: Element> UndoHistory<T> {
    /// Create an empty history holding at most `limit` entries.
    pub fn new(limit: usize) -> UndoHistory<T> {
        return UndoHistory {
            entries: VecDeque::with_capacity(limit.min(1024)),
            limit,
        };
    }

    /// Maximum number of retained entries.
    #[inline]
    pub fn limit(&self) -> usize {
        return self.limit;
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Record an entry, returning the entry evicted to make room, if any.
    ///
    /// With a limit of zero the pushed entry itself is returned.
    pub fn push(&mut self, entry: UndoEntry<T>) -> Option<UndoEntry<T>> {
        if self.limit == 0 {
            return Some(entry);
        }
        let evicted = if self.entries.len() >= self.limit {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        debug_assert!(self.entries.len() <= self.limit);
        return evicted;
    }

    /// Remove and return the most recent entry.
    pub fn pop_last(&mut self) -> Option<UndoEntry<T>> {
        return self.entries.pop_back();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::ByteSpan;

    fn entry(offset: u64) -> UndoEntry<u8> {
        return UndoEntry::new(Window::new(offset, 1), Vec::new());
    }

    #[test]
    fn push_and_pop_is_lifo() {
        let mut history = UndoHistory::new(10);
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop_last().map(|e| e.offset()), Some(2));
        assert_eq!(history.pop_last().map(|e| e.offset()), Some(1));
        assert_eq!(history.pop_last(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn eviction_drops_oldest() {
        let mut history = UndoHistory::new(3);
        assert_eq!(history.push(entry(1)), None);
        assert_eq!(history.push(entry(2)), None);
        assert_eq!(history.push(entry(3)), None);
        assert_eq!(history.push(entry(4)).map(|e| e.offset()), Some(1));
        assert_eq!(history.push(entry(5)).map(|e| e.offset()), Some(2));
        assert_eq!(history.len(), 3);

        let drained: Vec<u64> = std::iter::from_fn(|| history.pop_last())
            .map(|e| e.offset())
            .collect();
        assert_eq!(drained, vec![5, 4, 3]);
    }

    #[test]
    fn pop_does_not_reorder_eviction() {
        // Popping frees a slot; the next push must not evict anything.
        let mut history = UndoHistory::new(2);
        history.push(entry(1));
        history.push(entry(2));
        history.pop_last();
        assert_eq!(history.push(entry(3)), None);
        assert_eq!(history.push(entry(4)).map(|e| e.offset()), Some(1));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = UndoHistory::new(0);
        assert_eq!(history.push(entry(7)).map(|e| e.offset()), Some(7));
        assert!(history.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut history = UndoHistory::new(4);
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.limit(), 4);
    }

    #[test]
    fn entry_keeps_records() {
        let record = ChangeRecord::new(3, ByteSpan::from([1u8, 2]));
        let entry = UndoEntry::new(Window::new(2, 4), vec![record.clone()]);
        assert_eq!(entry.offset(), 2);
        assert_eq!(entry.records, vec![record]);
    }
}
