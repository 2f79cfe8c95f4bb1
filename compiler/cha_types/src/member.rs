//! Field and method descriptors.
//!
//! Descriptors record their declaring type. The handle is stamped by
//! [`ClassHierarchy::add`](crate::ClassHierarchy::add), so two
//! declarations of the same name in different types are always different
//! values, even when every other attribute matches.

use cha_ir::{Name, Position, Selector};

use crate::{ClassIdx, Modifiers};

/// A declared field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDef {
    /// Field name, unique within its declaring type.
    pub name: Name,

    /// Opaque type descriptor, e.g. `I` or `Ljava/lang/String;`.
    pub descriptor: Name,

    pub modifiers: Modifiers,

    /// The type that declares this field.
    pub declaring: ClassIdx,

    pub position: Option<Position>,
}

impl FieldDef {
    /// An instance field.
    pub fn instance(name: Name, descriptor: Name) -> Self {
        Self::with_modifiers(name, descriptor, Modifiers::empty())
    }

    /// A static field.
    pub fn static_field(name: Name, descriptor: Name) -> Self {
        Self::with_modifiers(name, descriptor, Modifiers::STATIC)
    }

    pub fn with_modifiers(name: Name, descriptor: Name, modifiers: Modifiers) -> Self {
        Self {
            name,
            descriptor,
            modifiers,
            declaring: ClassIdx::UNASSIGNED,
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// A field is either static or instance, never both.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[inline]
    pub fn is_instance(&self) -> bool {
        !self.is_static()
    }
}

/// A declared method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDef {
    /// Signature, unique within its declaring type.
    pub selector: Selector,

    pub modifiers: Modifiers,

    /// The type that declares this method.
    pub declaring: ClassIdx,

    pub position: Option<Position>,
}

impl MethodDef {
    pub fn new(selector: Selector) -> Self {
        Self::with_modifiers(selector, Modifiers::empty())
    }

    pub fn with_modifiers(selector: Selector, modifiers: Modifiers) -> Self {
        Self {
            selector,
            modifiers,
            declaring: ClassIdx::UNASSIGNED,
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.selector.name
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    /// Whether this is the `<clinit>()V` initializer named by `clinit`.
    #[inline]
    pub fn is_class_initializer(&self, clinit: Selector) -> bool {
        self.selector == clinit
    }
}
