//! Element types and owned runs of elements.
//!
//! An engine edits data in fixed-width units. The width is picked once,
//! through the element type parameter, and never changes afterwards:
//!
//! - `u8`: plain byte editing
//! - `u16`, `u32`, `u64`: word views of the same data
//!
//! A `ByteSpan` is an immutable run of such elements. Short runs (the
//! common case when a user types into a hex view) live inline.

use std::fmt::Debug;
use std::ops::Deref;

use smallvec::SmallVec;

/// Number of elements a span stores inline before spilling to the heap.
const INLINE: usize = 16;

/// A fixed-width unsigned value an engine can edit.
///
/// `Default` must be zero; it is what uncovered positions read as.
pub trait Element: Copy + Default + Eq + Debug + 'static {
    /// Width of one element in bits.
    const BITS: u32;
}

macro_rules! element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                const BITS: u32 = (std::mem::size_of::<$ty>() * 8) as u32;
            }
        )*
    };
}

element!(u8, u16, u32, u64);

/// An immutable, fixed-length run of elements.
///
/// Spans are always copied in, never borrowed, so the caller's buffer can
/// change freely after handing data to the engine.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ByteSpan<T: Element> {
    items: SmallVec<[T; INLINE]>,
}

impl<T: Element> ByteSpan<T> {
    /// Copy a slice into a new span.
    pub fn from_slice(items: &[T]) -> ByteSpan<T> {
        return ByteSpan {
            items: SmallVec::from_slice(items),
        };
    }

    /// Number of elements in the span.
    #[inline]
    pub fn len(&self) -> usize {
        return self.items.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.items.is_empty();
    }

    /// Borrow the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        return &self.items;
    }

    /// Copy out the elements in `[start, end)`, relative to the span.
    pub fn slice(&self, start: usize, end: usize) -> ByteSpan<T> {
        debug_assert!(start <= end && end <= self.len());
        return ByteSpan::from_slice(&self.items[start..end]);
    }

    pub fn to_vec(&self) -> Vec<T> {
        return self.items.to_vec();
    }
}

impl<T: Element> Deref for ByteSpan<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        return &self.items;
    }
}

impl<T: Element> From<&[T]> for ByteSpan<T> {
    fn from(items: &[T]) -> ByteSpan<T> {
        return ByteSpan::from_slice(items);
    }
}

impl<T: Element> From<Vec<T>> for ByteSpan<T> {
    fn from(items: Vec<T>) -> ByteSpan<T> {
        return ByteSpan {
            items: SmallVec::from_vec(items),
        };
    }
}

impl<T: Element, const N: usize> From<[T; N]> for ByteSpan<T> {
    fn from(items: [T; N]) -> ByteSpan<T> {
        return ByteSpan::from_slice(&items);
    }
}

impl<T: Element> Debug for ByteSpan<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return f.debug_list().entries(self.items.iter()).finish();
    }
}
