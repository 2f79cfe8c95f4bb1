//! Modifier flags for types and members.
//!
//! The bit layout is whatever the loading collaborator hands over; the named
//! flags below are only the ones hierarchy queries and predicates look at.
//! Unknown bits are retained so a round trip through `bits()` is lossless.

use bitflags::bitflags;

bitflags! {
    /// Opaque modifier set of a type, field or method.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        /// Static member, or a nested type without an enclosing instance.
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;

        // Retain every bit the collaborator sets.
        const _ = !0;
    }
}

impl Modifiers {
    /// Wrap a raw flag word exactly as supplied.
    #[inline]
    pub const fn from_raw(bits: u16) -> Self {
        Self::from_bits_retain(bits)
    }

    #[inline]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    pub const fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    #[inline]
    pub const fn is_interface(self) -> bool {
        self.contains(Self::INTERFACE)
    }

    #[inline]
    pub const fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.contains(Self::SYNTHETIC)
    }
}
