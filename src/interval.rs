//! Interval arithmetic over half-open `[offset, offset + len)` extents.
//!
//! Everything here is pure: no function touches the overlay, they only
//! cut records into pieces. The overlay composes them as follows:
//!
//! - `clip`: keep the part of a record inside a query window
//! - `carve`: keep the parts of a record outside a window being overwritten
//! - `split`: cut a record in two at an absolute position
//! - `touches`: decide whether two records can be joined end to start
//!
//! End positions saturate at `u64::MAX`, so a window reaching past the end
//! of the address space simply covers everything after its offset.

/// Anything occupying a contiguous range of offsets.
pub trait Extent: Sized {
    /// First position covered.
    fn offset(&self) -> u64;

    /// Number of positions covered.
    fn len(&self) -> u64;

    /// One past the last position covered.
    #[inline]
    fn end(&self) -> u64 {
        return self.offset().saturating_add(self.len());
    }

    #[inline]
    fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// Check if `pos` lies inside the extent.
    #[inline]
    fn contains(&self, pos: u64) -> bool {
        return pos >= self.offset() && pos < self.end();
    }

    /// The sub-extent covering absolute `[start, end)`.
    ///
    /// Callers guarantee `offset() <= start <= end <= self.end()`.
    fn slice(&self, start: u64, end: u64) -> Self;
}

/// A bare range with no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub offset: u64,
    pub len: u64,
}

impl Window {
    pub fn new(offset: u64, len: u64) -> Window {
        return Window { offset, len };
    }

    /// Build a window from absolute bounds.
    pub fn between(start: u64, end: u64) -> Window {
        debug_assert!(start <= end);
        return Window {
            offset: start,
            len: end - start,
        };
    }
}

impl Extent for Window {
    #[inline]
    fn offset(&self) -> u64 {
        return self.offset;
    }

    #[inline]
    fn len(&self) -> u64 {
        return self.len;
    }

    fn slice(&self, start: u64, end: u64) -> Window {
        return Window::between(start, end);
    }
}

/// Check if two extents share at least one position.
#[inline]
pub fn overlaps<A: Extent, B: Extent>(a: &A, b: &B) -> bool {
    return a.offset() < b.end() && b.offset() < a.end();
}

/// Check if `b` starts exactly where `a` ends.
#[inline]
pub fn touches<A: Extent, B: Extent>(a: &A, b: &B) -> bool {
    return !a.is_empty() && a.end() == b.offset();
}

/// The positions shared by both extents, if any.
pub fn intersection<A: Extent, B: Extent>(a: &A, b: &B) -> Option<Window> {
    let start = a.offset().max(b.offset());
    let end = a.end().min(b.end());
    if start >= end {
        return None;
    }
    return Some(Window::between(start, end));
}

/// The part of `item` that lies inside `window`.
pub fn clip<T: Extent, W: Extent>(item: &T, window: &W) -> Option<T> {
    let shared = intersection(item, window)?;
    return Some(item.slice(shared.offset, shared.end()));
}

/// Cut `item` at the absolute position `at`.
///
/// Returns the parts before and after `at`. A side that would be empty is
/// `None`, so splitting outside the item yields the item itself on one
/// side.
pub fn split<T: Extent>(item: &T, at: u64) -> (Option<T>, Option<T>) {
    let start = item.offset();
    let end = item.end();
    let at = at.clamp(start, end);

    let before = if at > start { Some(item.slice(start, at)) } else { None };
    let after = if at < end { Some(item.slice(at, end)) } else { None };
    return (before, after);
}

/// The parts of `item` strictly before and strictly after `window`.
///
/// This is what survives when `window` is overwritten: the overlapping
/// middle is dropped.
pub fn carve<T: Extent, W: Extent>(item: &T, window: &W) -> (Option<T>, Option<T>) {
    let (before, _) = split(item, window.offset());
    let (_, after) = split(item, window.end());
    return (before, after);
}
