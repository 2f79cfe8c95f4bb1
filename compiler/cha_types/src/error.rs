//! Hierarchy errors.
//!
//! Two families:
//! - [`HierarchyError`]: an ancestor of a type could not be determined while
//!   answering a query. Returned by every resolver query that looks past the
//!   type's own member table.
//! - [`DeclarationError`]: a type could not be added to a hierarchy.
//!
//! A member that is simply not declared anywhere on the chain is not an
//! error; lookups return `Ok(None)`.

use cha_ir::{Name, Selector, StringLookup, TypeRef};

use crate::{ClassHierarchy, ClassIdx};

/// Failure to resolve part of a type's hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// The named superclass is not present in the hierarchy.
    #[error("superclass {missing:?} of {class:?} is not in the hierarchy")]
    MissingSuperclass { class: ClassIdx, missing: TypeRef },

    /// A named direct interface is not present in the hierarchy.
    #[error("interface {missing:?} of {class:?} is not in the hierarchy")]
    MissingInterface { class: ClassIdx, missing: TypeRef },

    /// Following ancestors from the queried type reached `class` twice.
    #[error("inheritance cycle through {class:?}")]
    Cycle { class: ClassIdx },

    /// The handle was not issued by the hierarchy being queried.
    #[error("{class:?} does not belong to this hierarchy")]
    UnknownClass { class: ClassIdx },
}

impl HierarchyError {
    /// The type node at which resolution failed.
    pub fn class(&self) -> ClassIdx {
        match self {
            Self::MissingSuperclass { class, .. }
            | Self::MissingInterface { class, .. }
            | Self::Cycle { class }
            | Self::UnknownClass { class } => *class,
        }
    }

    /// Human-readable message with type names resolved.
    pub fn describe<L: StringLookup + ?Sized>(
        &self,
        hierarchy: &ClassHierarchy,
        lookup: &L,
    ) -> String {
        let name = |idx: ClassIdx| match hierarchy.try_get(idx) {
            Some(node) => node.reference().display(lookup).to_string(),
            None => format!("{idx:?}"),
        };
        match self {
            Self::MissingSuperclass { class, missing } => format!(
                "cannot resolve superclass {} of {}",
                missing.display(lookup),
                name(*class)
            ),
            Self::MissingInterface { class, missing } => format!(
                "cannot resolve interface {} of {}",
                missing.display(lookup),
                name(*class)
            ),
            Self::Cycle { class } => {
                format!("{} is its own ancestor", name(*class))
            }
            Self::UnknownClass { class } => {
                format!("{class:?} does not belong to this hierarchy")
            }
        }
    }
}

/// Failure to add a type to a hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("type {class:?} is already declared as {existing:?}")]
    DuplicateClass { class: TypeRef, existing: ClassIdx },

    #[error("field {name:?} is declared twice in {class:?}")]
    DuplicateField { class: TypeRef, name: Name },

    #[error("method {selector:?} is declared twice in {class:?}")]
    DuplicateMethod { class: TypeRef, selector: Selector },

    /// A synthetic origin names a handle the hierarchy has not issued.
    #[error("{class:?} refers to unknown ancestor {ancestor:?}")]
    UnknownAncestor { class: TypeRef, ancestor: ClassIdx },

    #[error("hierarchy cannot hold more than {max} types", max = u32::MAX - 1)]
    TooManyClasses,
}
