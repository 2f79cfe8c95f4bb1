//! Handles for interned strings.
//!
//! Every type name, member name, descriptor and loader namespace in a
//! hierarchy is a [`Name`]. Equality and hashing work on the handle, so
//! member tables and identity maps never touch string contents.

use std::fmt;

/// Handle to a string owned by a [`StringInterner`](crate::StringInterner).
///
/// The top bits pick the interner shard the string lives in; the rest index
/// into that shard. Handles are only meaningful for the interner that
/// issued them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string; interned by every interner at a fixed slot.
    pub const EMPTY: Name = Name(0);

    const SHARD_BITS: u32 = 4;
    const LOCAL_BITS: u32 = u32::BITS - Self::SHARD_BITS;

    pub(crate) const NUM_SHARDS: usize = 1 << Self::SHARD_BITS;
    pub(crate) const MAX_LOCAL: u32 = (1 << Self::LOCAL_BITS) - 1;

    #[inline]
    pub(crate) const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << Self::LOCAL_BITS) | local)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> Self::LOCAL_BITS) as usize
    }

    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// Whether this names the empty string, e.g. an unnamed member.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}
