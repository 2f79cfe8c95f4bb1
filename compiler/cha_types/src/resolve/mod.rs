//! Hierarchy queries.
//!
//! [`HierarchyResolver`] answers "what members does this type have" and
//! "which declaration answers this access" for nodes of one
//! [`ClassHierarchy`].
//!
//! # Semantics
//!
//! - Superclass edges form a single chain per type; the nearest declaration
//!   of a field name or method selector shadows every ancestor declaration.
//! - Interfaces accumulate along the chain without duplicates.
//! - Every walk is iterative with a visited set, so a cyclic hierarchy
//!   yields [`HierarchyError::Cycle`] instead of looping.
//! - Resolution failures propagate as errors from every query that needs an
//!   ancestor, single-member lookups included. Absence of a member is
//!   `Ok(None)`.

use cha_ir::{Name, Selector, StringInterner, TypeRef};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cache::QueryKind;
use crate::{
    ClassHierarchy, ClassIdx, ClassNode, ClassOrigin, FieldDef, HierarchyError, MethodDef,
};

/// Read-only query interface over a [`ClassHierarchy`].
#[derive(Copy, Clone, Debug)]
pub struct HierarchyResolver<'h> {
    hierarchy: &'h ClassHierarchy,
}

impl<'h> HierarchyResolver<'h> {
    pub fn new(hierarchy: &'h ClassHierarchy) -> Self {
        Self { hierarchy }
    }

    fn node(&self, class: ClassIdx) -> Result<&'h ClassNode, HierarchyError> {
        self.hierarchy
            .try_get(class)
            .ok_or(HierarchyError::UnknownClass { class })
    }

    // === Direct edges ===

    /// The direct superclass of `class`; `None` only for a hierarchy root.
    pub fn superclass_of(&self, class: ClassIdx) -> Result<Option<ClassIdx>, HierarchyError> {
        let node = self.node(class)?;
        let named = match node.origin() {
            ClassOrigin::Synthetic { superclass, .. } => return Ok(*superclass),
            ClassOrigin::Binary { superclass, .. } => *superclass,
            ClassOrigin::Source { superclass, .. } => superclass.or_else(|| {
                self.hierarchy
                    .options()
                    .implicit_root
                    .filter(|root| *root != node.reference())
            }),
        };

        let Some(missing) = named else {
            return Ok(None);
        };
        match self.hierarchy.lookup(&missing) {
            Some(parent) => Ok(Some(parent)),
            None => {
                tracing::debug!(?class, ?missing, "unresolved superclass");
                Err(HierarchyError::MissingSuperclass { class, missing })
            }
        }
    }

    /// Interfaces `class` declares directly, deduplicated, in declaration
    /// order.
    pub fn direct_interfaces_of(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<ClassIdx>, HierarchyError> {
        let node = self.node(class)?;
        let resolved: SmallVec<[ClassIdx; 4]> = match node.origin() {
            ClassOrigin::Synthetic { interfaces, .. } => interfaces.clone(),
            ClassOrigin::Source { interfaces, .. } | ClassOrigin::Binary { interfaces, .. } => {
                interfaces
                    .iter()
                    .map(|r| self.resolve_interface(class, r))
                    .collect::<Result<_, _>>()?
            }
        };

        let mut seen = FxHashSet::default();
        Ok(resolved.into_iter().filter(|i| seen.insert(*i)).collect())
    }

    fn resolve_interface(
        &self,
        class: ClassIdx,
        missing: &TypeRef,
    ) -> Result<ClassIdx, HierarchyError> {
        self.hierarchy.lookup(missing).ok_or_else(|| {
            tracing::debug!(?class, ?missing, "unresolved interface");
            HierarchyError::MissingInterface {
                class,
                missing: *missing,
            }
        })
    }

    // === Chains ===

    /// Lazy walk from `class` up its superclass chain.
    pub fn walk_superclasses(&self, class: ClassIdx) -> SuperclassWalk<'h> {
        SuperclassWalk {
            resolver: *self,
            next: Some(class),
            pending: None,
            seen: FxHashSet::default(),
        }
    }

    /// `class` followed by each superclass up to the root.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn superclass_chain(&self, class: ClassIdx) -> Result<Vec<ClassIdx>, HierarchyError> {
        self.hierarchy
            .cache()
            .get_or_compute(class, QueryKind::SuperclassChain, || {
                self.walk_superclasses(class).collect()
            })
    }

    /// Whether `ancestor` is on the superclass chain of `class`. A type is
    /// on its own chain.
    pub fn is_subclass_of(
        &self,
        class: ClassIdx,
        ancestor: ClassIdx,
    ) -> Result<bool, HierarchyError> {
        for step in self.walk_superclasses(class) {
            if step? == ancestor {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // === Interfaces ===

    /// Direct interfaces of `class` and of every superclass, deduplicated,
    /// nearest first. Interfaces extended by those interfaces are not
    /// included; see [`super_interface_closure`](Self::super_interface_closure).
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn all_interfaces_of(&self, class: ClassIdx) -> Result<Vec<ClassIdx>, HierarchyError> {
        self.hierarchy
            .cache()
            .get_or_compute(class, QueryKind::AllInterfaces, || {
                let mut seen = FxHashSet::default();
                let mut result = Vec::new();
                for ty in self.superclass_chain(class)? {
                    for iface in self.direct_interfaces_of(ty)? {
                        if seen.insert(iface) {
                            result.push(iface);
                        }
                    }
                }
                Ok(result)
            })
    }

    /// `all_interfaces_of(class)` extended breadth-first with every
    /// interface those interfaces extend.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn super_interface_closure(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<ClassIdx>, HierarchyError> {
        self.hierarchy
            .cache()
            .get_or_compute(class, QueryKind::InterfaceClosure, || {
                let mut result = self.all_interfaces_of(class)?;
                let mut seen: FxHashSet<ClassIdx> = result.iter().copied().collect();
                let mut cursor = 0;
                while let Some(&iface) = result.get(cursor) {
                    cursor += 1;
                    for parent in self.direct_interfaces_of(iface)? {
                        if seen.insert(parent) {
                            result.push(parent);
                        }
                    }
                }
                Ok(result)
            })
    }

    /// Whether `iface` is implemented by `class`, directly or through any
    /// superclass or super-interface.
    pub fn implements(&self, class: ClassIdx, iface: ClassIdx) -> Result<bool, HierarchyError> {
        Ok(self.super_interface_closure(class)?.contains(&iface))
    }

    // === Single-member lookup ===

    /// The nearest declaration of field `name`, starting at `class`.
    ///
    /// A declaration in a subtype shadows any ancestor declaration of the
    /// same name, whatever its static flag or descriptor.
    pub fn lookup_field(
        &self,
        class: ClassIdx,
        name: Name,
    ) -> Result<Option<&'h FieldDef>, HierarchyError> {
        for step in self.walk_superclasses(class) {
            if let Some(field) = self.node(step?)?.members().field(name) {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    /// The nearest declaration of `selector`, starting at `class`.
    pub fn lookup_method(
        &self,
        class: ClassIdx,
        selector: &Selector,
    ) -> Result<Option<&'h MethodDef>, HierarchyError> {
        for step in self.walk_superclasses(class) {
            if let Some(method) = self.node(step?)?.members().method(selector) {
                return Ok(Some(method));
            }
        }
        Ok(None)
    }

    /// The static initializer that runs for `class`: its own `<clinit>()V`
    /// or the nearest inherited one.
    pub fn class_initializer(
        &self,
        class: ClassIdx,
        interner: &StringInterner,
    ) -> Result<Option<&'h MethodDef>, HierarchyError> {
        self.lookup_method(class, &Selector::class_initializer(interner))
    }

    // === Declared members ===

    pub fn declared_instance_fields(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<&'h FieldDef>, HierarchyError> {
        Ok(self.node(class)?.declared_instance_fields().collect())
    }

    pub fn declared_static_fields(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<&'h FieldDef>, HierarchyError> {
        Ok(self.node(class)?.declared_static_fields().collect())
    }

    pub fn declared_methods(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<&'h MethodDef>, HierarchyError> {
        Ok(self.node(class)?.declared_methods().iter().collect())
    }

    // === Transitive members ===

    /// Declared instance fields of every type on the chain, nearest first.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn all_instance_fields(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<&'h FieldDef>, HierarchyError> {
        self.collect_fields(class, FieldKind::Instance)
    }

    /// Declared static fields of every type on the chain, nearest first.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn all_static_fields(
        &self,
        class: ClassIdx,
    ) -> Result<Vec<&'h FieldDef>, HierarchyError> {
        self.collect_fields(class, FieldKind::Static)
    }

    /// All instance fields followed by all static fields.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn all_fields(&self, class: ClassIdx) -> Result<Vec<&'h FieldDef>, HierarchyError> {
        let mut fields = self.collect_fields(class, FieldKind::Instance)?;
        fields.extend(self.collect_fields(class, FieldKind::Static)?);
        Ok(fields)
    }

    fn collect_fields(
        &self,
        class: ClassIdx,
        kind: FieldKind,
    ) -> Result<Vec<&'h FieldDef>, HierarchyError> {
        let mut fields = Vec::new();
        for ty in self.superclass_chain(class)? {
            let node = self.node(ty)?;
            match kind {
                FieldKind::Instance => fields.extend(node.declared_instance_fields()),
                FieldKind::Static => fields.extend(node.declared_static_fields()),
            }
        }
        Ok(fields)
    }

    /// Declared methods of every type on the chain, nearest first.
    ///
    /// This is the raw union: an overridden ancestor method is listed next
    /// to the declaration that overrides it. Use
    /// [`visible_methods`](Self::visible_methods) for the override view.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn all_methods(&self, class: ClassIdx) -> Result<Vec<&'h MethodDef>, HierarchyError> {
        let mut methods = Vec::new();
        for ty in self.superclass_chain(class)? {
            methods.extend(self.node(ty)?.declared_methods());
        }
        Ok(methods)
    }

    /// One method per selector, the nearest declaration winning. Agrees
    /// with [`lookup_method`](Self::lookup_method) for every selector.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn visible_methods(&self, class: ClassIdx) -> Result<Vec<&'h MethodDef>, HierarchyError> {
        let mut seen = FxHashSet::default();
        Ok(self
            .all_methods(class)?
            .into_iter()
            .filter(|m| seen.insert(m.selector))
            .collect())
    }
}

#[derive(Copy, Clone)]
enum FieldKind {
    Instance,
    Static,
}

/// Iterator over a superclass chain, produced by
/// [`HierarchyResolver::walk_superclasses`].
///
/// Yields the starting type first. Each superclass is resolved one step
/// ahead; a failure is reported after the last type that did resolve, and
/// the walk ends after the first error.
pub struct SuperclassWalk<'h> {
    resolver: HierarchyResolver<'h>,
    next: Option<ClassIdx>,
    pending: Option<HierarchyError>,
    seen: FxHashSet<ClassIdx>,
}

impl Iterator for SuperclassWalk<'_> {
    type Item = Result<ClassIdx, HierarchyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }

        let current = self.next.take()?;
        if !self.seen.insert(current) {
            tracing::debug!(class = ?current, "inheritance cycle");
            return Some(Err(HierarchyError::Cycle { class: current }));
        }

        match self.resolver.superclass_of(current) {
            Ok(parent) => self.next = parent,
            Err(HierarchyError::UnknownClass { class }) if class == current => {
                return Some(Err(HierarchyError::UnknownClass { class }));
            }
            Err(err) => self.pending = Some(err),
        }
        Some(Ok(current))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
