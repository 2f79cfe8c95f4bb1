//! Type nodes and hierarchy resolution for class hierarchy analysis.
//!
//! A [`ClassHierarchy`] is an arena of [`ClassNode`]s, one per class or
//! interface of a loading scope. Each node owns an immutable
//! [`MemberTable`] and a [`ClassOrigin`] naming its direct ancestors. The
//! [`HierarchyResolver`] walks those ancestors to answer:
//!
//! - transitive interface sets (`all_interfaces_of`)
//! - transitive field and method sets (`all_instance_fields`, `all_methods`)
//! - member lookup with shadowing (`lookup_field`, `lookup_method`)
//!
//! # Design
//!
//! - Nodes addressed by stable `ClassIdx` handles; no `Rc` graph
//! - Ancestor walks are iterative with visited sets, so malformed (cyclic)
//!   input yields [`HierarchyError::Cycle`]
//! - Failures to resolve an ancestor propagate uniformly as
//!   [`HierarchyError`]; missing members are `Ok(None)`
//! - Nodes never change after [`ClassHierarchy::add`], so a hierarchy is
//!   freely shared across threads

mod cache;
mod error;
mod hierarchy;
mod idx;
mod member;
mod member_table;
mod modifiers;
mod node;
mod origin;
mod resolve;

pub use cache::{CacheStats, HierarchyCache, QueryKind};
pub use error::{DeclarationError, HierarchyError};
pub use hierarchy::{ClassHierarchy, HierarchyOptions};
pub use idx::ClassIdx;
pub use member::{FieldDef, MethodDef};
pub use member_table::MemberTable;
pub use modifiers::Modifiers;
pub use node::{ClassBuilder, ClassNode};
pub use origin::{ClassOrigin, InterfaceRefs};
pub use resolve::{HierarchyResolver, SuperclassWalk};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=cha_types=trace` to follow every hierarchy query.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::ClassIdx;
    cha_ir::static_assert_size!(ClassIdx, 4);
    cha_ir::static_assert_size!(Option<ClassIdx>, 8);
}
