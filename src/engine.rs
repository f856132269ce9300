//! The edit engine: pending edits plus undo, behind one facade.
//!
//! The engine never sees the data being edited. Hosts hand it changes as
//! they happen and later ask for them back, either projected onto a buffer
//! of base values (for display) or drained in address order (for commit).
//!
//! Every historized change first snapshots the overlay region it is about
//! to overwrite. Undo removes that region again and replays the snapshot,
//! so positions that were unedited before the change read as unedited
//! afterwards.

use crate::config::EngineConfig;
use crate::error::EditError;
use crate::history::{UndoEntry, UndoHistory};
use crate::interval::Window;
use crate::overlay::{ChangeRecord, Overlay};
use crate::span::{ByteSpan, Element};

/// How many elements of a target buffer `apply_changes` may touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Limit {
    /// At most this many elements, never more than the buffer holds.
    Elements(usize),
    /// The whole target buffer.
    Unbounded,
}

impl Limit {
    /// Number of elements to project into a buffer of `available` elements.
    #[inline]
    fn resolve(self, available: usize) -> usize {
        return match self {
            Limit::Elements(n) => n.min(available),
            Limit::Unbounded => available,
        };
    }
}

/// Undoable overlay of pending edits over elements of type `T`.
#[derive(Clone, Debug)]
pub struct EditEngine<T: Element> {
    overlay: Overlay<T>,
    history: UndoHistory<T>,
    config: EngineConfig,
}

impl<T: Element> Default for EditEngine<T> {
    fn default() -> Self {
        return Self::new(EngineConfig::default());
    }
}

impl<T: Element> EditEngine<T> {
    /// Create an empty engine.
    pub fn new(config: EngineConfig) -> EditEngine<T> {
        return EditEngine {
            overlay: Overlay::new(),
            history: UndoHistory::new(config.edit_stack_limit),
            config,
        };
    }

    /// Create an empty engine keeping at most `limit` undo entries.
    pub fn with_edit_stack_limit(limit: usize) -> EditEngine<T> {
        return Self::new(EngineConfig::default().with_edit_stack_limit(limit));
    }

    pub fn config(&self) -> &EngineConfig {
        return &self.config;
    }

    /// Record a change to `[pos, pos + new.len())` and make it undoable.
    ///
    /// `old` is what the caller believes the region held; it must match
    /// `new` in length. The undo snapshot comes from the overlay itself.
    pub fn change_bytes(&mut self, pos: u64, new: &[T], old: &[T]) -> Result<(), EditError> {
        return self.change_bytes_with(pos, new, old, true);
    }

    /// Record a change, optionally without an undo entry.
    pub fn change_bytes_with(
        &mut self,
        pos: u64,
        new: &[T],
        old: &[T],
        add_to_history: bool,
    ) -> Result<(), EditError> {
        if new.len() != old.len() {
            return Err(EditError::LengthMismatch {
                new: new.len(),
                old: old.len(),
            });
        }
        let len = new.len() as u64;
        if pos.checked_add(len).is_none() {
            return Err(EditError::OffsetOverflow {
                offset: pos,
                len: new.len(),
            });
        }

        if add_to_history {
            let snapshot = self.overlay.query_range(pos, len);
            self.check_stale(pos, old, &snapshot);
            let entry = UndoEntry::new(Window::new(pos, len), snapshot);
            if let Some(evicted) = self.history.push(entry) {
                tracing::trace!(
                    offset = evicted.offset(),
                    limit = self.history.limit(),
                    "evicted oldest undo entry"
                );
            }
        }

        tracing::trace!(offset = pos, len, bits = T::BITS, historized = add_to_history, "change");
        self.overlay.insert(pos, ByteSpan::from_slice(new));
        return Ok(());
    }

    /// Note when the caller's idea of the old data disagrees with ours.
    fn check_stale(&self, pos: u64, old: &[T], snapshot: &[ChangeRecord<T>]) {
        let stale = snapshot.iter().any(|record| {
            let start = (record.offset - pos) as usize;
            return old[start..start + record.data.len()] != *record.data;
        });
        if stale {
            tracing::debug!(offset = pos, len = old.len(), "caller old data differs from pending edits");
        }
    }

    /// Revert the most recent historized change.
    ///
    /// Returns the lowest offset the undo touched, or `None` if there was
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<u64> {
        let entry = self.history.pop_last()?;
        tracing::debug!(
            offset = entry.window.offset,
            len = entry.window.len,
            records = entry.records.len(),
            "undo"
        );

        self.overlay.remove(entry.window.offset, entry.window.len);
        for record in entry.records {
            self.overlay.insert(record.offset, record.data);
        }
        return Some(entry.window.offset);
    }

    /// Check if there is anything to undo.
    pub fn has_undo(&self) -> bool {
        return !self.history.is_empty();
    }

    /// Number of undo entries currently retained.
    pub fn undo_depth(&self) -> usize {
        return self.history.len();
    }

    /// Overwrite `target` with pending edits.
    ///
    /// `target[i]` holds the base value at position `offset + i`. Positions
    /// without a pending edit are left alone, so projecting twice gives the
    /// same result as projecting once.
    pub fn apply_changes(&self, target: &mut [T], offset: u64, limit: Limit) {
        let count = limit.resolve(target.len());
        if count == 0 {
            return;
        }
        let view = Window::new(offset, count as u64);
        for record in self.overlay.query_range(view.offset, view.len) {
            let start = (record.offset - offset) as usize;
            target[start..start + record.data.len()].copy_from_slice(&record.data);
        }
    }

    /// Remove and return the lowest pending change.
    ///
    /// Records that follow each other without a gap are returned as one
    /// run, so a contiguous edited region drains in a single call.
    pub fn pop_first_change(&mut self) -> Option<ChangeRecord<T>> {
        let head = self.overlay.pop_min()?;
        let mut covered = Window::new(head.offset, head.data.len() as u64);
        let Some(next) = self.overlay.pop_touching(&covered) else {
            return Some(head);
        };

        // Gather the rest of the run into one buffer and build the span once.
        let mut items: Vec<T> = Vec::with_capacity(head.data.len() + next.len());
        items.extend_from_slice(&head.data);
        items.extend_from_slice(&next);
        covered.len += next.len() as u64;
        while let Some(next) = self.overlay.pop_touching(&covered) {
            items.extend_from_slice(&next);
            covered.len += next.len() as u64;
        }
        return Some(ChangeRecord::new(head.offset, ByteSpan::from(items)));
    }

    /// Check if `pos` has a pending edit.
    pub fn is_changed(&self, pos: u64) -> bool {
        return self.overlay.is_covered(pos);
    }

    /// Pending value at `pos`, or zero when `pos` is unedited.
    pub fn byte_value(&self, pos: u64) -> T {
        return self.overlay.point_value(pos).unwrap_or_default();
    }

    /// Check if any edit is pending.
    pub fn has_changes(&self) -> bool {
        return !self.overlay.is_empty();
    }

    /// Pending edits in ascending offset order, as stored.
    pub fn changes(&self) -> impl Iterator<Item = ChangeRecord<T>> + '_ {
        return self.overlay.iter();
    }

    /// Number of stored change records.
    pub fn change_count(&self) -> usize {
        return self.overlay.len();
    }

    /// Drop all pending edits and all undo history.
    pub fn clear(&mut self) {
        tracing::debug!(
            records = self.overlay.len(),
            undo = self.history.len(),
            "clearing edits"
        );
        self.overlay.clear();
        self.history.clear();
    }
}
