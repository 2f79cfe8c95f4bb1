//! Arena of type nodes.
//!
//! The `ClassHierarchy` owns every node of one loading scope and hands out
//! stable [`ClassIdx`] handles. Edges between nodes are not stored here;
//! each node's [`ClassOrigin`](crate::ClassOrigin) records its direct
//! ancestors and the [`HierarchyResolver`] follows them on demand.
//!
//! # Design
//!
//! - Nodes stored once in a `Vec`, addressed by insertion index
//! - `FxHashMap<TypeRef, ClassIdx>` for identity lookup
//! - Memo cache owned here, so its lifetime is the loading scope's

use cha_ir::TypeRef;
use rustc_hash::FxHashMap;

use crate::{
    CacheStats, ClassBuilder, ClassIdx, ClassNode, DeclarationError, HierarchyCache,
    HierarchyResolver,
};

/// Behaviour switches for a hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyOptions {
    /// Type that source-declared types without an `extends` clause inherit
    /// from (the `Object` of the source language). `None` makes such types
    /// roots.
    pub implicit_root: Option<TypeRef>,

    /// Memoize superclass chains and interface sets.
    pub memoize: bool,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            implicit_root: None,
            memoize: true,
        }
    }
}

/// All type nodes of one loading scope.
#[derive(Debug, Default)]
pub struct ClassHierarchy {
    classes: Vec<ClassNode>,

    /// Identity -> handle.
    by_ref: FxHashMap<TypeRef, ClassIdx>,

    options: HierarchyOptions,

    cache: HierarchyCache,
}

impl ClassHierarchy {
    pub fn new(options: HierarchyOptions) -> Self {
        let cache = HierarchyCache::new(options.memoize);
        Self {
            classes: Vec::new(),
            by_ref: FxHashMap::default(),
            options,
            cache,
        }
    }

    // === Registration ===

    /// Freeze `builder` into a node and return its handle.
    ///
    /// Ancestors named by source or binary origins do not have to exist yet;
    /// a missing one surfaces as a [`HierarchyError`](crate::HierarchyError)
    /// when a query needs it. Synthetic origins must only use handles this
    /// hierarchy has already issued.
    pub fn add(&mut self, builder: ClassBuilder) -> Result<ClassIdx, DeclarationError> {
        let reference = builder.reference();
        if let Some(&existing) = self.by_ref.get(&reference) {
            return Err(DeclarationError::DuplicateClass {
                class: reference,
                existing,
            });
        }

        let raw = u32::try_from(self.classes.len())
            .ok()
            .filter(|&raw| raw != ClassIdx::UNASSIGNED.raw())
            .ok_or(DeclarationError::TooManyClasses)?;
        let idx = ClassIdx::from_raw(raw);

        if let Some(ancestor) = builder
            .origin()
            .direct_handles()
            .find(|a| a.index() >= self.classes.len())
        {
            return Err(DeclarationError::UnknownAncestor {
                class: reference,
                ancestor,
            });
        }

        tracing::trace!(?idx, ?reference, origin = builder.origin().kind(), "add type");
        self.classes.push(builder.finish(idx));
        self.by_ref.insert(reference, idx);
        self.cache.clear();
        Ok(idx)
    }

    // === Lookup ===

    /// The node behind `idx`.
    ///
    /// # Panics
    /// Panics if `idx` was issued by another hierarchy. Use `try_get` when
    /// the handle's provenance is unknown.
    #[inline]
    #[track_caller]
    pub fn get(&self, idx: ClassIdx) -> &ClassNode {
        &self.classes[idx.index()]
    }

    #[inline]
    pub fn try_get(&self, idx: ClassIdx) -> Option<&ClassNode> {
        self.classes.get(idx.index())
    }

    /// Handle of the type with identity `reference`.
    #[inline]
    pub fn lookup(&self, reference: &TypeRef) -> Option<ClassIdx> {
        self.by_ref.get(reference).copied()
    }

    #[inline]
    pub fn contains(&self, reference: &TypeRef) -> bool {
        self.by_ref.contains_key(reference)
    }

    /// The implicit root type, if configured and present.
    pub fn root(&self) -> Option<ClassIdx> {
        self.options
            .implicit_root
            .as_ref()
            .and_then(|r| self.lookup(r))
    }

    #[inline]
    pub fn options(&self) -> &HierarchyOptions {
        &self.options
    }

    // === Queries ===

    /// Query interface over this hierarchy.
    #[inline]
    pub fn resolver(&self) -> HierarchyResolver<'_> {
        HierarchyResolver::new(self)
    }

    #[inline]
    pub(crate) fn cache(&self) -> &HierarchyCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // === Iteration ===

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
