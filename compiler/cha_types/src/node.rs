//! Type nodes.
//!
//! A [`ClassNode`] is one class or interface: identity, modifiers,
//! provenance, its own member table, and the origin that records its direct
//! ancestors. Nodes are assembled with [`ClassBuilder`] and become read-only
//! once [`ClassHierarchy::add`](crate::ClassHierarchy::add) accepts them.

use cha_ir::{LoaderRef, Position, StringLookup, TypeRef};

use crate::{ClassIdx, ClassOrigin, DeclarationError, FieldDef, MemberTable, MethodDef, Modifiers};

/// Staging area for a type before it enters a hierarchy.
#[derive(Clone, Debug)]
pub struct ClassBuilder {
    reference: TypeRef,
    modifiers: Modifiers,
    position: Option<Position>,
    members: MemberTable,
    origin: ClassOrigin,
}

impl ClassBuilder {
    pub fn new(reference: TypeRef, origin: ClassOrigin) -> Self {
        Self {
            reference,
            modifiers: Modifiers::empty(),
            position: None,
            members: MemberTable::new(),
            origin,
        }
    }

    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Declare a field. Field names are unique per type regardless of the
    /// static flag.
    pub fn field(mut self, field: FieldDef) -> Result<Self, DeclarationError> {
        self.members
            .insert_field(field)
            .map_err(|dup| DeclarationError::DuplicateField {
                class: self.reference,
                name: dup.name,
            })?;
        Ok(self)
    }

    /// Declare a method. Selectors are unique per type.
    pub fn method(mut self, method: MethodDef) -> Result<Self, DeclarationError> {
        self.members
            .insert_method(method)
            .map_err(|dup| DeclarationError::DuplicateMethod {
                class: self.reference,
                selector: dup.selector,
            })?;
        Ok(self)
    }

    #[inline]
    pub fn reference(&self) -> TypeRef {
        self.reference
    }

    #[inline]
    pub(crate) fn origin(&self) -> &ClassOrigin {
        &self.origin
    }

    /// Freeze into a node owned by the hierarchy at `idx`.
    pub(crate) fn finish(mut self, idx: ClassIdx) -> ClassNode {
        self.members.stamp(idx);
        ClassNode {
            idx,
            reference: self.reference,
            modifiers: self.modifiers,
            position: self.position,
            members: self.members,
            origin: self.origin,
        }
    }
}

/// A class or interface in a hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNode {
    idx: ClassIdx,
    reference: TypeRef,
    modifiers: Modifiers,
    position: Option<Position>,
    members: MemberTable,
    origin: ClassOrigin,
}

impl ClassNode {
    /// This node's handle in its hierarchy.
    #[inline]
    pub fn idx(&self) -> ClassIdx {
        self.idx
    }

    /// Namespace-qualified identity.
    #[inline]
    pub fn reference(&self) -> TypeRef {
        self.reference
    }

    #[inline]
    pub fn loader(&self) -> LoaderRef {
        self.reference.loader
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The modifier word exactly as supplied at construction.
    #[inline]
    pub fn raw_modifiers(&self) -> u16 {
        self.modifiers.bits()
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.modifiers.is_interface()
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.modifiers.is_private()
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    #[inline]
    pub fn is_synthetic(&self) -> bool {
        self.modifiers.is_synthetic()
    }

    /// Type nodes always describe reference types.
    #[inline]
    pub fn is_reference_type(&self) -> bool {
        true
    }

    /// Array types are not modelled as nodes.
    #[inline]
    pub fn is_array_class(&self) -> bool {
        false
    }

    #[inline]
    pub fn source_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn source_url<'a, L: StringLookup + ?Sized>(&self, lookup: &'a L) -> Option<&'a str> {
        self.position.map(|p| p.source_url(lookup))
    }

    pub fn source_file<'a, L: StringLookup + ?Sized>(&self, lookup: &'a L) -> Option<&'a str> {
        self.position.map(|p| p.source_file(lookup))
    }

    /// Own member table; no inherited members.
    #[inline]
    pub fn members(&self) -> &MemberTable {
        &self.members
    }

    #[inline]
    pub fn origin(&self) -> &ClassOrigin {
        &self.origin
    }

    pub fn declared_instance_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.members.instance_fields()
    }

    pub fn declared_static_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.members.static_fields()
    }

    pub fn declared_methods(&self) -> &[MethodDef] {
        self.members.methods()
    }
}
