//! The change overlay: pending edits keyed by start offset.
//!
//! Structure:
//! - A `BTreeMap` from offset to span, so iteration is in address order
//! - Stored records never overlap and are never empty
//! - Touching records stay separate; nothing is coalesced on insert
//!
//! Every operation that resolves overlap starts from the predecessor (the
//! last record starting at or before the window), then walks forward while
//! records start inside the window. That single scan covers a window inside
//! one record, a window spanning many records, and partial overlap at
//! either edge.
//!
//! Operations:
//! - insert: O(log n + k) where k is the number of records overwritten
//! - query_range: O(log n + k)
//! - point_value / is_covered: O(log n)
//! - pop_min / pop_touching: O(log n)

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::interval::{self, Extent, Window};
use crate::span::{ByteSpan, Element};

/// One contiguous pending edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeRecord<T: Element> {
    /// Position of the first element.
    pub offset: u64,
    /// The new values, starting at `offset`.
    pub data: ByteSpan<T>,
}

impl<T: Element> ChangeRecord<T> {
    pub fn new(offset: u64, data: ByteSpan<T>) -> ChangeRecord<T> {
        return ChangeRecord { offset, data };
    }

}

impl<T: Element> Extent for ChangeRecord<T> {
    #[inline]
    fn offset(&self) -> u64 {
        return self.offset;
    }

    #[inline]
    fn len(&self) -> u64 {
        return self.data.len() as u64;
    }

    fn slice(&self, start: u64, end: u64) -> ChangeRecord<T> {
        debug_assert!(self.offset <= start && start <= end && end <= self.end());
        let from = (start - self.offset) as usize;
        let to = (end - self.offset) as usize;
        return ChangeRecord {
            offset: start,
            data: self.data.slice(from, to),
        };
    }
}

/// Ordered, non-overlapping set of pending edits.
#[derive(Clone, Debug, Default)]
pub struct Overlay<T: Element> {
    records: BTreeMap<u64, ByteSpan<T>>,
}

impl<T: Element> Overlay<T> {
    /// Create an empty overlay.
    pub fn new() -> Overlay<T> {
        return Overlay {
            records: BTreeMap::new(),
        };
    }

    /// Number of stored records.
    #[inline]
    pub fn len(&self) -> usize {
        return self.records.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.records.is_empty();
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Iterate over stored records in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = ChangeRecord<T>> + '_ {
        return self
            .records
            .iter()
            .map(|(&offset, data)| ChangeRecord::new(offset, data.clone()));
    }

    /// The record covering `pos`, if any.
    fn covering(&self, pos: u64) -> Option<(u64, &ByteSpan<T>)> {
        let (&offset, data) = self.records.range(..=pos).next_back()?;
        if pos - offset < data.len() as u64 {
            return Some((offset, data));
        }
        return None;
    }

    /// Offsets of every record intersecting `window`, ascending.
    fn keys_within(&self, window: &Window) -> SmallVec<[u64; 8]> {
        let mut keys = SmallVec::new();
        if window.is_empty() {
            return keys;
        }

        // The predecessor may start before the window and reach into it.
        if let Some((&offset, data)) = self.records.range(..window.offset).next_back() {
            if interval::overlaps(&Window::new(offset, data.len() as u64), window) {
                keys.push(offset);
            }
        }
        keys.extend(self.records.range(window.offset..window.end()).map(|(&k, _)| k));
        return keys;
    }

    /// Value stored at `pos`, or `None` if no record covers it.
    pub fn point_value(&self, pos: u64) -> Option<T> {
        let (offset, data) = self.covering(pos)?;
        return Some(data[(pos - offset) as usize]);
    }

    /// Check if some record covers `pos`.
    pub fn is_covered(&self, pos: u64) -> bool {
        return self.covering(pos).is_some();
    }

    /// Copies of every record intersecting `[pos, pos + size)`, each clipped
    /// to the window.
    pub fn query_range(&self, pos: u64, size: u64) -> Vec<ChangeRecord<T>> {
        let window = Window::new(pos, size);
        let mut found = Vec::new();
        for key in self.keys_within(&window) {
            let record = ChangeRecord::new(key, self.records[&key].clone());
            if let Some(clipped) = interval::clip(&record, &window) {
                found.push(clipped);
            }
        }
        return found;
    }

    /// Drop every stored element inside `[pos, pos + size)`.
    ///
    /// Records straddling an edge keep their outside parts.
    pub fn remove(&mut self, pos: u64, size: u64) {
        let window = Window::new(pos, size);
        for key in self.keys_within(&window) {
            let Some(data) = self.records.remove(&key) else {
                continue;
            };
            let record = ChangeRecord::new(key, data);
            let (before, after) = interval::carve(&record, &window);
            for piece in [before, after].into_iter().flatten() {
                self.records.insert(piece.offset, piece.data);
            }
        }
    }

    /// Write `data` over `[pos, pos + len)`, replacing whatever was there.
    pub fn insert(&mut self, pos: u64, data: ByteSpan<T>) {
        if data.is_empty() {
            return;
        }
        self.remove(pos, data.len() as u64);
        self.records.insert(pos, data);
    }

    /// Remove and return the record with the smallest offset.
    pub fn pop_min(&mut self) -> Option<ChangeRecord<T>> {
        let (offset, data) = self.records.pop_first()?;
        return Some(ChangeRecord::new(offset, data));
    }

    /// Remove and return the first record if it starts right where `prev`
    /// ends.
    ///
    /// Nothing is copied; the stored span is moved out.
    pub fn pop_touching<E: Extent>(&mut self, prev: &E) -> Option<ByteSpan<T>> {
        let (&offset, data) = self.records.first_key_value()?;
        if !interval::touches(prev, &Window::new(offset, data.len() as u64)) {
            return None;
        }
        let (_, data) = self.records.pop_first()?;
        return Some(data);
    }

    /// Check the structural invariant: no empty records and no overlap.
    #[cfg(test)]
    pub(crate) fn is_well_formed(&self) -> bool {
        let mut last_end = None;
        for record in self.iter() {
            if record.is_empty() {
                return false;
            }
            if let Some(end) = last_end {
                if record.offset < end {
                    return false;
                }
            }
            last_end = Some(record.end());
        }
        return true;
    }
}
