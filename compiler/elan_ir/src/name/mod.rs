//! Interned identifiers.
//!
//! The teacher's `ori_ir::name` shards a 32-bit id across threads so many
//! lexer workers can intern concurrently without a single shared lock.
//! This workspace is single-threaded (`spec.md` §5), so `NameInterner` is
//! one flat `FxHashMap`; `Name` keeps the same `u32` newtype shape so the
//! rest of the crate can treat it like the teacher's version (`Copy`,
//! `Eq`, cheap to pass by value, comparable without touching the string
//! table).

use rustc_hash::FxHashMap;
use std::fmt;

/// An interned string. Equality and hashing are O(1) regardless of the
/// underlying string's length.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(u32);

impl Name {
    /// The interned empty string. Every `NameInterner` interns `""` at
    /// construction so this id is always valid.
    pub const EMPTY: Name = Name(0);

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Owns the backing strings for every [`Name`] handed out. Interning is
/// append-only: once a string is interned it keeps the same id for the
/// life of the interner.
pub struct NameInterner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, u32>,
}

impl Default for NameInterner {
    fn default() -> Self {
        let mut interner = NameInterner {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }
}

impl NameInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning its stable id. Interning the same string
    /// twice returns the same id.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&id) = self.lookup.get(s) {
            return Name(id);
        }
        let id = self.strings.len() as u32;
        let boxed: Box<str> = s.into();
        self.lookup.insert(boxed.clone(), id);
        self.strings.push(boxed);
        Name(id)
    }

    #[must_use]
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }

    /// Looks up an already-interned string without interning it.
    /// `None` if `s` was never passed to [`NameInterner::intern`].
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Name> {
        self.lookup.get(s).copied().map(Name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
