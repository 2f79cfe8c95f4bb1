//! CHA IR - identity primitives for class hierarchy analysis.
//!
//! This crate holds the small, copyable values every analysis phase uses to
//! talk about types and members without owning them:
//! - `Name` for interned identifiers, backed by `StringInterner`
//! - `LoaderRef` + `TypeRef` for namespace-qualified type identity
//! - `Selector` for method signatures
//! - `Span` + `Position` for opaque source provenance
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become `Name(u32)`, so identity checks are
//!   integer comparisons
//! - **Copy Everything**: identity values are `Copy` and hashable, so they can
//!   key maps and caches directly

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod identity;
mod interner;
mod name;
mod position;

pub use identity::{LoaderRef, Selector, TypeRef, TypeRefDisplay};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use position::{Position, Span};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, Selector, Span, TypeRef};
    static_assert_size!(Name, 4);
    static_assert_size!(TypeRef, 8);
    static_assert_size!(Selector, 8);
    static_assert_size!(Span, 8);
}
