//! Per-type member table.
//!
//! A `MemberTable` holds the fields and methods one type declares itself,
//! independent of inheritance. It is filled by
//! [`ClassBuilder`](crate::ClassBuilder) and frozen when the type is added
//! to a hierarchy.
//!
//! # Design
//!
//! - Members stored once in a `Vec`, in declaration order
//! - `FxHashMap` side indices from name / selector to position
//! - Iteration is deterministic (declaration order), lookups are O(1)

use cha_ir::{Name, Selector};
use rustc_hash::FxHashMap;

use crate::{ClassIdx, FieldDef, MethodDef};

/// Declared fields and methods of a single type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberTable {
    fields: Vec<FieldDef>,

    /// Field name -> position in `fields`.
    fields_by_name: FxHashMap<Name, usize>,

    methods: Vec<MethodDef>,

    /// Selector -> position in `methods`.
    methods_by_selector: FxHashMap<Selector, usize>,
}

impl MemberTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Hands the field back if its name is already declared.
    pub(crate) fn insert_field(&mut self, field: FieldDef) -> Result<(), FieldDef> {
        if self.fields_by_name.contains_key(&field.name) {
            return Err(field);
        }
        self.fields_by_name.insert(field.name, self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    /// Add a method. Hands the method back if its selector is already declared.
    pub(crate) fn insert_method(&mut self, method: MethodDef) -> Result<(), MethodDef> {
        if self.methods_by_selector.contains_key(&method.selector) {
            return Err(method);
        }
        self.methods_by_selector
            .insert(method.selector, self.methods.len());
        self.methods.push(method);
        Ok(())
    }

    /// Record `owner` as the declaring type of every member.
    pub(crate) fn stamp(&mut self, owner: ClassIdx) {
        for field in &mut self.fields {
            field.declaring = owner;
        }
        for method in &mut self.methods {
            method.declaring = owner;
        }
    }

    // === Lookup ===

    /// The field declared under `name`, if any.
    #[inline]
    pub fn field(&self, name: Name) -> Option<&FieldDef> {
        self.fields_by_name
            .get(&name)
            .and_then(|&i| self.fields.get(i))
    }

    /// The method declared with `selector`, if any.
    #[inline]
    pub fn method(&self, selector: &Selector) -> Option<&MethodDef> {
        self.methods_by_selector
            .get(selector)
            .and_then(|&i| self.methods.get(i))
    }

    #[inline]
    pub fn declares_field(&self, name: Name) -> bool {
        self.fields_by_name.contains_key(&name)
    }

    #[inline]
    pub fn declares_method(&self, selector: &Selector) -> bool {
        self.methods_by_selector.contains_key(selector)
    }

    // === Iteration ===

    /// All declared fields, instance and static.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Declared fields without the static flag.
    pub fn instance_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_instance())
    }

    /// Declared fields with the static flag.
    pub fn static_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_static())
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty()
    }
}
