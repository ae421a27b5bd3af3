//! Source locations.
//!
//! `spec.md`'s testable properties describe locations as `(line, col)`
//! pairs (`Location(1,10..1,15)`), unlike the teacher's byte-offset
//! `Span`. We keep both: `Span` is the byte-offset pair the teacher's
//! `ori_ir::span` module uses (handy for arena-backed source slicing),
//! and `Location` is the line/column pair the diagnostics layer and the
//! testable properties are phrased in terms of. A `Location` also carries
//! the interned path of the file it belongs to, since a compiler with
//! more than one input file cannot report a useful error without one.
use crate::name::Name;
use std::fmt;

/// Byte-offset span within a single file's source text. 8 bytes, `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A `(line, column)` range within a named file. Lines and columns are
/// both 1-based, matching `spec.md`'s `Location(1,10..1,15)` notation
/// (line 1, columns 10 through 15).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Location {
    pub file: Name,
    pub line_start: u32,
    pub col_start: u32,
    pub line_end: u32,
    pub col_end: u32,
}

impl Location {
    #[must_use]
    pub const fn new(file: Name, line_start: u32, col_start: u32, line_end: u32, col_end: u32) -> Self {
        Location {
            file,
            line_start,
            col_start,
            line_end,
            col_end,
        }
    }

    /// A single-line location, the common case: `Location(1, 10..15)`.
    #[must_use]
    pub const fn on_line(file: Name, line: u32, col_start: u32, col_end: u32) -> Self {
        Self::new(file, line, col_start, line, col_end)
    }

    /// Union of two locations in the same file: the smallest location
    /// containing both. Commutative. `spec.md` §8.3: `Location(1,10..1,15)
    /// ∪ Location(1,20..1,25) == Location(1,10..1,25)`.
    ///
    /// # Panics
    /// Panics (debug only) if the two locations are not in the same file;
    /// unioning locations across files is a caller error, not a value
    /// this type can meaningfully represent.
    #[must_use]
    pub fn union(self, other: Location) -> Location {
        debug_assert_eq!(self.file, other.file, "cannot union locations from different files");
        let (start_line, start_col) = if (self.line_start, self.col_start) <= (other.line_start, other.col_start) {
            (self.line_start, self.col_start)
        } else {
            (other.line_start, other.col_start)
        };
        let (end_line, end_col) = if (self.line_end, self.col_end) >= (other.line_end, other.col_end) {
            (self.line_end, self.col_end)
        } else {
            (other.line_end, other.col_end)
        };
        Location {
            file: self.file,
            line_start: start_line,
            col_start: start_col,
            line_end: end_line,
            col_end: end_col,
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}..{},{}",
            self.line_start, self.col_start, self.line_end, self.col_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::NameInterner;

    #[test]
    fn union_of_disjoint_same_line_ranges() {
        let mut interner = NameInterner::new();
        let file = interner.intern("main.sp");
        let a = Location::on_line(file, 1, 10, 15);
        let b = Location::on_line(file, 1, 20, 25);
        let expected = Location::on_line(file, 1, 10, 25);
        assert_eq!(a.union(b), expected);
        assert_eq!(b.union(a), expected, "union must be commutative");
    }
}
