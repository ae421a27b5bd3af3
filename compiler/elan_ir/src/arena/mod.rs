//! Bump-style arena allocation.
//!
//! The teacher workspace's own doc comment states the design philosophy
//! this mirrors: "Flatten Everything: No Box<Expr>, use ExprId(u32)
//! indices." We lean on that instead of raw bump-pointer allocation,
//! since the workspace denies `unsafe_code` and a self-referential
//! pointer arena cannot be built soundly without it. An `Id<T>` plays the
//! role of the stable pointer the original `support::Arena::allocate`
//! returns; deallocation is still all-at-once, when the `Arena<T>` is
//! dropped.

use std::fmt;
use std::marker::PhantomData;

/// A stable reference into an [`Arena<T>`]. Never invalidated by further
/// allocation, only by dropping the arena itself.
pub struct Id<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Raw zero-based index into the arena's backing storage.
    #[must_use]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}
impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl<T> Eq for Id<T> {}
impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index)
    }
}

/// A contiguous run of arena-allocated values, as produced by
/// [`Arena::alloc_slice_copy`]. Mirrors `support::Arena::copyOf` in the
/// original, which is used for sorted-member lists and type-parameter
/// lists that must outlive the AST that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdRange<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> IdRange<T> {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.len as usize
    }
}

/// Appends values of a single type `T`; never shrinks, never moves
/// previously allocated elements, drops everything at once when the
/// arena itself is dropped.
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena { items: Vec::new() }
    }
}

impl<T> Arena<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place-construct a single value, returning a stable [`Id`].
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX` elements.
    pub fn alloc(&mut self, value: T) -> Id<T> {
        let index = self.items.len();
        assert!(
            index < u32::MAX as usize,
            "elan_ir::Arena capacity exceeded ({} elements)",
            u32::MAX
        );
        self.items.push(value);
        Id {
            index: index as u32,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.items[id.index()]
    }

    pub fn get_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.items[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn range(&self, range: IdRange<T>) -> &[T] {
        let start = range.start as usize;
        let end = start + range.len as usize;
        &self.items[start..end]
    }
}

impl<T: Copy> Arena<T> {
    /// Copy a slice into the arena as one contiguous run, returning a
    /// range that can later be re-sliced with [`Arena::range`]. Mirrors
    /// `support::Arena::copyOf` call sites such as
    /// `typestore.cpp`'s `arena.copyOf(sortedMembers)`.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX` elements.
    pub fn alloc_slice_copy(&mut self, values: &[T]) -> IdRange<T> {
        let start = self.items.len();
        let end = start + values.len();
        assert!(
            end < u32::MAX as usize,
            "elan_ir::Arena capacity exceeded ({} elements)",
            u32::MAX
        );
        self.items.extend_from_slice(values);
        IdRange {
            start: start as u32,
            len: values.len() as u32,
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_returns_distinct_stable_ids() {
        let mut arena: Arena<&'static str> = Arena::new();
        let a = arena.alloc("alpha");
        let b = arena.alloc("beta");
        assert_ne!(a, b);
        assert_eq!(*arena.get(a), "alpha");
        assert_eq!(*arena.get(b), "beta");
    }

    #[test]
    fn alloc_slice_copy_round_trips() {
        let mut arena: Arena<u32> = Arena::new();
        let range = arena.alloc_slice_copy(&[1, 2, 3]);
        assert_eq!(arena.range(range), &[1, 2, 3]);
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
    }

    #[test]
    fn previously_allocated_ids_survive_further_allocation() {
        let mut arena: Arena<u32> = Arena::new();
        let first = arena.alloc(10);
        for i in 0..100 {
            arena.alloc(i);
        }
        assert_eq!(*arena.get(first), 10);
    }
}
