//! Stable arena handle for type nodes.

use std::fmt;

/// A 32-bit index into a [`ClassHierarchy`](crate::ClassHierarchy).
///
/// Handles are assigned in insertion order and never reused, so they stay
/// valid for the lifetime of the hierarchy that issued them. Identity
/// comparison between type nodes is index comparison.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ClassIdx(u32);

impl ClassIdx {
    /// Sentinel carried by member descriptors until their declaring type is
    /// inserted into a hierarchy.
    pub const UNASSIGNED: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position in the hierarchy's node storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_assigned(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ClassIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_assigned() {
            write!(f, "ClassIdx({})", self.0)
        } else {
            write!(f, "ClassIdx::UNASSIGNED")
        }
    }
}
