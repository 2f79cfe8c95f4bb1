//! Type and member identity.
//!
//! A type is identified by the namespace (loader) that defined it plus its
//! qualified name. Two types with the same name in different loaders are
//! different types. Methods are identified within a type by their
//! [`Selector`]: name plus descriptor.

use std::fmt;

use crate::{Name, StringInterner, StringLookup};

/// A loading namespace.
///
/// Loaders themselves are managed outside this crate; here a loader is only
/// the first half of a type's identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LoaderRef(Name);

impl LoaderRef {
    /// Create a loader reference from its interned name.
    #[inline]
    pub const fn new(name: Name) -> Self {
        LoaderRef(name)
    }

    /// The loader's interned name.
    #[inline]
    pub const fn name(self) -> Name {
        self.0
    }

    /// The loader for platform types.
    pub fn primordial(interner: &StringInterner) -> Self {
        LoaderRef(interner.intern("Primordial"))
    }

    /// The loader for application types.
    pub fn application(interner: &StringInterner) -> Self {
        LoaderRef(interner.intern("Application"))
    }

    /// The loader for types declared in parsed source.
    pub fn source(interner: &StringInterner) -> Self {
        LoaderRef(interner.intern("Source"))
    }

    /// The loader for types fabricated by an analysis.
    pub fn synthetic(interner: &StringInterner) -> Self {
        LoaderRef(interner.intern("Synthetic"))
    }
}

/// Namespace-qualified type identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    /// The namespace that defined the type.
    pub loader: LoaderRef,
    /// The qualified type name, e.g. `Lcom/example/Leaf`.
    pub name: Name,
}

impl TypeRef {
    #[inline]
    pub const fn new(loader: LoaderRef, name: Name) -> Self {
        TypeRef { loader, name }
    }

    /// Intern `name` and pair it with `loader`.
    pub fn named(interner: &StringInterner, loader: LoaderRef, name: &str) -> Self {
        TypeRef::new(loader, interner.intern(name))
    }

    /// Render as `<Loader,Name>` with names resolved through `lookup`.
    pub fn display<'a, L: StringLookup + ?Sized>(&self, lookup: &'a L) -> TypeRefDisplay<'a> {
        TypeRefDisplay {
            loader: lookup.lookup(self.loader.name()),
            name: lookup.lookup(self.name),
        }
    }
}

/// Resolved rendering of a [`TypeRef`].
#[derive(Copy, Clone, Debug)]
pub struct TypeRefDisplay<'a> {
    loader: &'a str,
    name: &'a str,
}

impl fmt::Display for TypeRefDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.loader, self.name)
    }
}

/// Method signature identity within a type: name plus descriptor.
///
/// Two methods with the same name but different descriptors are different
/// members (overloads); the same selector in a subtype overrides.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector {
    pub name: Name,
    pub descriptor: Name,
}

impl Selector {
    #[inline]
    pub const fn new(name: Name, descriptor: Name) -> Self {
        Selector { name, descriptor }
    }

    /// Intern both halves of a selector.
    pub fn parse(interner: &StringInterner, name: &str, descriptor: &str) -> Self {
        Selector::new(interner.intern(name), interner.intern(descriptor))
    }

    /// `<clinit>()V`, the static initializer of a type.
    pub fn class_initializer(interner: &StringInterner) -> Self {
        Selector::parse(interner, "<clinit>", "()V")
    }

    /// `<init>()V`, the no-argument constructor.
    pub fn constructor(interner: &StringInterner) -> Self {
        Selector::parse(interner, "<init>", "()V")
    }

    /// Render as `name descriptor`, e.g. `tick()V`.
    pub fn render<L: StringLookup + ?Sized>(&self, lookup: &L) -> String {
        format!(
            "{}{}",
            lookup.lookup(self.name),
            lookup.lookup(self.descriptor)
        )
    }
}
