//! `Visibility` and modifier bits, carried on every [`crate::MemberData`].
//!
//! Grounded on `semgraph/defn.h`'s `Visibility` enum and `Defn`'s bitfield
//! modifiers (`_static`, `_final`, `_override`, `_abstract`, `_undef`),
//! whose formatting order is preserved by `defn.cpp`'s `formatModifiers`.

use bitflags::bitflags;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
    pub struct Modifiers: u8 {
        const STATIC = 1 << 0;
        const FINAL = 1 << 1;
        const OVERRIDE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const UNDEF = 1 << 4;
    }
}
