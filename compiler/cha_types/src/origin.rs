//! How a type node obtains its ancestors.
//!
//! Every node carries a [`ClassOrigin`] describing the representation it was
//! built from. The set of representations is closed: a node was declared in
//! parsed source, loaded from a compiled artifact, or fabricated by an
//! analysis. Resolution of the recorded ancestors happens in
//! [`HierarchyResolver`](crate::HierarchyResolver).

use cha_ir::TypeRef;
use smallvec::SmallVec;

use crate::ClassIdx;

/// Inline capacity for direct interface lists; most types implement few.
pub type InterfaceRefs = SmallVec<[TypeRef; 4]>;

/// Direct ancestors as recorded by the representation a node came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassOrigin {
    /// Declared in parsed source.
    ///
    /// Ancestors are named and looked up by identity. A source type without
    /// an `extends` clause implicitly extends the hierarchy's configured
    /// root type.
    Source {
        superclass: Option<TypeRef>,
        interfaces: InterfaceRefs,
    },

    /// Loaded from a compiled artifact.
    ///
    /// Ancestors are named and looked up by identity. The superclass is
    /// recorded explicitly, so `None` makes the type a hierarchy root.
    Binary {
        superclass: Option<TypeRef>,
        interfaces: InterfaceRefs,
    },

    /// Fabricated by an analysis from nodes that already exist.
    ///
    /// Ancestors are arena handles and cannot fail to resolve.
    Synthetic {
        superclass: Option<ClassIdx>,
        interfaces: SmallVec<[ClassIdx; 4]>,
    },
}

impl ClassOrigin {
    pub fn source(
        superclass: Option<TypeRef>,
        interfaces: impl IntoIterator<Item = TypeRef>,
    ) -> Self {
        Self::Source {
            superclass,
            interfaces: interfaces.into_iter().collect(),
        }
    }

    pub fn binary(
        superclass: Option<TypeRef>,
        interfaces: impl IntoIterator<Item = TypeRef>,
    ) -> Self {
        Self::Binary {
            superclass,
            interfaces: interfaces.into_iter().collect(),
        }
    }

    pub fn synthetic(
        superclass: Option<ClassIdx>,
        interfaces: impl IntoIterator<Item = ClassIdx>,
    ) -> Self {
        Self::Synthetic {
            superclass,
            interfaces: interfaces.into_iter().collect(),
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Source { .. } => "source",
            Self::Binary { .. } => "binary",
            Self::Synthetic { .. } => "synthetic",
        }
    }

    /// Arena handles referenced directly by a synthetic origin.
    pub(crate) fn direct_handles(&self) -> impl Iterator<Item = ClassIdx> + '_ {
        let handles: &[ClassIdx] = match self {
            Self::Synthetic { interfaces, .. } => interfaces,
            Self::Source { .. } | Self::Binary { .. } => &[],
        };
        let superclass = match self {
            Self::Synthetic { superclass, .. } => *superclass,
            Self::Source { .. } | Self::Binary { .. } => None,
        };
        superclass.into_iter().chain(handles.iter().copied())
    }
}
