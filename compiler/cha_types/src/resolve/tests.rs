use super::*;
use crate::{ClassBuilder, HierarchyOptions, Modifiers};
use cha_ir::{LoaderRef, StringInterner, TypeRef};
use pretty_assertions::assert_eq;

struct Fixture {
    interner: StringInterner,
    hierarchy: ClassHierarchy,
}

impl Fixture {
    fn new() -> Self {
        Self::with_options(HierarchyOptions::default())
    }

    fn with_options(options: HierarchyOptions) -> Self {
        Self {
            interner: StringInterner::new(),
            hierarchy: ClassHierarchy::new(options),
        }
    }

    fn ty(&self, name: &str) -> TypeRef {
        TypeRef::named(&self.interner, LoaderRef::application(&self.interner), name)
    }

    fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn sel(&self, name: &str) -> Selector {
        Selector::parse(&self.interner, name, "()V")
    }

    /// Binary class `name` extending `superclass`, implementing `interfaces`.
    fn class(&mut self, name: &str, superclass: Option<&str>, interfaces: &[&str]) -> ClassIdx {
        let builder = ClassBuilder::new(
            self.ty(name),
            ClassOrigin::binary(
                superclass.map(|s| self.ty(s)),
                interfaces.iter().map(|i| self.ty(i)),
            ),
        );
        self.hierarchy.add(builder).expect("fresh type")
    }

    fn class_with(&mut self, builder: ClassBuilder) -> ClassIdx {
        self.hierarchy.add(builder).expect("fresh type")
    }

    fn resolver(&self) -> HierarchyResolver<'_> {
        self.hierarchy.resolver()
    }
}

/// Root { count } <- Mid { tick() } <- Leaf { name, tick() }
fn root_mid_leaf(fx: &mut Fixture) -> (ClassIdx, ClassIdx, ClassIdx) {
    let int = fx.name("I");
    let root = fx.class_with(
        ClassBuilder::new(fx.ty("LRoot"), ClassOrigin::binary(None, []))
            .field(FieldDef::instance(fx.name("count"), int))
            .expect("distinct"),
    );
    let mid = fx.class_with(
        ClassBuilder::new(fx.ty("LMid"), ClassOrigin::binary(Some(fx.ty("LRoot")), []))
            .method(MethodDef::new(fx.sel("tick")))
            .expect("distinct"),
    );
    let leaf = fx.class_with(
        ClassBuilder::new(fx.ty("LLeaf"), ClassOrigin::binary(Some(fx.ty("LMid")), []))
            .field(FieldDef::instance(fx.name("name"), int))
            .and_then(|b| b.method(MethodDef::new(fx.sel("tick"))))
            .expect("distinct"),
    );
    (root, mid, leaf)
}

fn names<'a>(fields: impl IntoIterator<Item = &'a FieldDef>) -> Vec<Name> {
    fields.into_iter().map(|f| f.name).collect()
}

// === Direct edges ===

#[test]
fn binary_root_has_no_superclass() {
    let mut fx = Fixture::new();
    let (root, mid, _) = root_mid_leaf(&mut fx);

    assert_eq!(fx.resolver().superclass_of(root), Ok(None));
    assert_eq!(fx.resolver().superclass_of(mid), Ok(Some(root)));
}

#[test]
fn source_type_implicitly_extends_configured_root() {
    let mut fx = Fixture::new();
    let object = fx.ty("LObject");
    fx.hierarchy = ClassHierarchy::new(HierarchyOptions {
        implicit_root: Some(object),
        memoize: true,
    });

    let object_idx = fx.class_with(ClassBuilder::new(object, ClassOrigin::source(None, [])));
    let plain = fx.class_with(ClassBuilder::new(fx.ty("LPlain"), ClassOrigin::source(None, [])));

    assert_eq!(fx.resolver().superclass_of(object_idx), Ok(None));
    assert_eq!(fx.resolver().superclass_of(plain), Ok(Some(object_idx)));
}

#[test]
fn source_type_fails_when_implicit_root_is_missing() {
    let mut fx = Fixture::new();
    let object = fx.ty("LObject");
    fx.hierarchy = ClassHierarchy::new(HierarchyOptions {
        implicit_root: Some(object),
        memoize: false,
    });
    let plain = fx.class_with(ClassBuilder::new(fx.ty("LPlain"), ClassOrigin::source(None, [])));

    assert_eq!(
        fx.resolver().superclass_of(plain),
        Err(HierarchyError::MissingSuperclass {
            class: plain,
            missing: object
        })
    );
}

#[test]
fn synthetic_ancestors_resolve_without_lookup() {
    let mut fx = Fixture::new();
    let base = fx.class("LBase", None, &[]);
    let marker = fx.class("LMarker", None, &[]);
    let fake = fx.class_with(ClassBuilder::new(
        fx.ty("LFake"),
        ClassOrigin::synthetic(Some(base), [marker, marker]),
    ));

    assert_eq!(fx.resolver().superclass_of(fake), Ok(Some(base)));
    assert_eq!(fx.resolver().direct_interfaces_of(fake), Ok(vec![marker]));
}

#[test]
fn direct_interfaces_are_deduplicated_in_order() {
    let mut fx = Fixture::new();
    let i1 = fx.class("LI1", None, &[]);
    let i2 = fx.class("LI2", None, &[]);
    let c = fx.class("LC", None, &["LI2", "LI1", "LI2"]);

    assert_eq!(fx.resolver().direct_interfaces_of(c), Ok(vec![i2, i1]));
}

#[test]
fn missing_interface_is_reported_with_its_type() {
    let mut fx = Fixture::new();
    let c = fx.class("LC", None, &["LGone"]);

    assert_eq!(
        fx.resolver().direct_interfaces_of(c),
        Err(HierarchyError::MissingInterface {
            class: c,
            missing: fx.ty("LGone")
        })
    );
}

#[test]
fn foreign_handle_is_unknown_class() {
    let fx = Fixture::new();
    let foreign = ClassIdx::from_raw(42);

    assert_eq!(
        fx.resolver().superclass_chain(foreign),
        Err(HierarchyError::UnknownClass { class: foreign })
    );
    assert_eq!(
        fx.resolver().lookup_field(foreign, Name::EMPTY),
        Err(HierarchyError::UnknownClass { class: foreign })
    );
}

// === Chains ===

#[test]
fn chain_runs_from_type_to_root() {
    let mut fx = Fixture::new();
    let (root, mid, leaf) = root_mid_leaf(&mut fx);

    assert_eq!(fx.resolver().superclass_chain(leaf), Ok(vec![leaf, mid, root]));
    assert_eq!(fx.resolver().superclass_chain(root), Ok(vec![root]));
}

#[test]
fn cycle_is_reported_not_followed() {
    let mut fx = Fixture::new();
    let a = fx.class("LA", Some("LB"), &[]);
    let b = fx.class("LB", Some("LA"), &[]);

    assert_eq!(
        fx.resolver().superclass_chain(a),
        Err(HierarchyError::Cycle { class: a })
    );
    assert_eq!(
        fx.resolver().superclass_chain(b),
        Err(HierarchyError::Cycle { class: b })
    );
}

#[test]
fn cycle_above_the_queried_type_names_the_repeated_node() {
    let mut fx = Fixture::new();
    let leaf = fx.class("LLeaf", Some("LA"), &[]);
    let a = fx.class("LA", Some("LB"), &[]);
    fx.class("LB", Some("LA"), &[]);

    assert_eq!(
        fx.resolver().superclass_chain(leaf),
        Err(HierarchyError::Cycle { class: a })
    );
}

#[test]
fn self_extension_is_a_cycle() {
    let mut fx = Fixture::new();
    let ouroboros = fx.class("LSelf", Some("LSelf"), &[]);

    assert_eq!(
        fx.resolver().all_instance_fields(ouroboros),
        Err(HierarchyError::Cycle { class: ouroboros })
    );
}

#[test]
fn walk_reports_failure_after_resolved_prefix() {
    let mut fx = Fixture::new();
    let mid = fx.class("LMid", Some("LGone"), &[]);
    let leaf = fx.class("LLeaf", Some("LMid"), &[]);

    let steps: Vec<_> = fx.resolver().walk_superclasses(leaf).collect();
    assert_eq!(
        steps,
        vec![
            Ok(leaf),
            Ok(mid),
            Err(HierarchyError::MissingSuperclass {
                class: mid,
                missing: fx.ty("LGone")
            })
        ]
    );
}

#[test]
fn subclass_relation_follows_chain() {
    let mut fx = Fixture::new();
    let (root, mid, leaf) = root_mid_leaf(&mut fx);
    let other = fx.class("LOther", None, &[]);

    let r = fx.resolver();
    assert_eq!(r.is_subclass_of(leaf, root), Ok(true));
    assert_eq!(r.is_subclass_of(leaf, leaf), Ok(true));
    assert_eq!(r.is_subclass_of(mid, leaf), Ok(false));
    assert_eq!(r.is_subclass_of(leaf, other), Ok(false));
}

// === Interfaces ===

#[test]
fn interfaces_accumulate_along_the_chain() {
    let mut fx = Fixture::new();
    let i1 = fx.class("LI1", None, &[]);
    let i2 = fx.class("LI2", None, &[]);
    fx.class("LMid", None, &["LI2"]);
    let leaf = fx.class("LLeaf", Some("LMid"), &["LI1", "LI2"]);

    assert_eq!(fx.resolver().all_interfaces_of(leaf), Ok(vec![i1, i2]));
}

#[test]
fn all_interfaces_excludes_super_interfaces_but_closure_includes_them() {
    let mut fx = Fixture::new();
    let base = fx.class("LBaseIface", None, &[]);
    let sub = fx.class("LSubIface", None, &["LBaseIface"]);
    let c = fx.class("LC", None, &["LSubIface"]);

    let r = fx.resolver();
    assert_eq!(r.all_interfaces_of(c), Ok(vec![sub]));
    assert_eq!(r.super_interface_closure(c), Ok(vec![sub, base]));
    assert_eq!(r.implements(c, base), Ok(true));
    assert_eq!(r.implements(base, sub), Ok(false));
}

#[test]
fn interface_cycle_does_not_loop_the_closure() {
    let mut fx = Fixture::new();
    let i1 = fx.class("LI1", None, &["LI2"]);
    let i2 = fx.class("LI2", None, &["LI1"]);
    let c = fx.class("LC", None, &["LI1"]);

    assert_eq!(fx.resolver().super_interface_closure(c), Ok(vec![i1, i2]));
}

#[test]
fn interface_failure_propagates_from_ancestor() {
    let mut fx = Fixture::new();
    let mid = fx.class("LMid", None, &["LGone"]);
    let leaf = fx.class("LLeaf", Some("LMid"), &[]);

    let err = fx.resolver().all_interfaces_of(leaf).expect_err("LGone missing");
    assert_eq!(err.class(), mid);
}

// === Lookup ===

#[test]
fn lookup_prefers_nearest_declaration() {
    let mut fx = Fixture::new();
    let (root, mid, leaf) = root_mid_leaf(&mut fx);
    let r = fx.resolver();

    let tick = r
        .lookup_method(leaf, &fx.sel("tick"))
        .expect("resolvable")
        .expect("declared");
    assert_eq!(tick.declaring, leaf);

    let tick = r
        .lookup_method(mid, &fx.sel("tick"))
        .expect("resolvable")
        .expect("declared");
    assert_eq!(tick.declaring, mid);

    let count = r
        .lookup_field(leaf, fx.name("count"))
        .expect("resolvable")
        .expect("inherited");
    assert_eq!(count.declaring, root);

    assert_eq!(r.lookup_field(leaf, fx.name("missing")), Ok(None));
    assert_eq!(r.lookup_method(root, &fx.sel("tick")), Ok(None));
}

#[test]
fn shadowing_ignores_static_flag_and_descriptor() {
    let mut fx = Fixture::new();
    let base = fx.class_with(
        ClassBuilder::new(fx.ty("LBase"), ClassOrigin::binary(None, []))
            .field(FieldDef::instance(fx.name("x"), fx.name("I")))
            .expect("distinct"),
    );
    let derived = fx.class_with(
        ClassBuilder::new(fx.ty("LDerived"), ClassOrigin::binary(Some(fx.ty("LBase")), []))
            .field(FieldDef::static_field(fx.name("x"), fx.name("Ljava/lang/String;")))
            .expect("distinct"),
    );

    let r = fx.resolver();
    let x = r
        .lookup_field(derived, fx.name("x"))
        .expect("resolvable")
        .expect("declared");
    assert_eq!(x.declaring, derived);
    assert!(x.is_static());

    // Both declarations still show up in the partitioned unions.
    assert_eq!(r.all_instance_fields(derived).map(|f| f.len()), Ok(1));
    assert_eq!(r.all_static_fields(derived).map(|f| f.len()), Ok(1));
    assert_eq!(r.all_fields(derived).map(|f| f.len()), Ok(2));
    assert_eq!(
        r.all_instance_fields(derived).map(|f| f[0].declaring),
        Ok(base)
    );
}

#[test]
fn own_declaration_is_found_even_if_ancestor_is_missing() {
    let mut fx = Fixture::new();
    let leaf = fx.class_with(
        ClassBuilder::new(fx.ty("LLeaf"), ClassOrigin::binary(Some(fx.ty("LGone")), []))
            .field(FieldDef::instance(fx.name("name"), fx.name("I")))
            .expect("distinct"),
    );

    let r = fx.resolver();
    assert!(matches!(r.lookup_field(leaf, fx.name("name")), Ok(Some(_))));
    assert_eq!(
        r.lookup_field(leaf, fx.name("count")),
        Err(HierarchyError::MissingSuperclass {
            class: leaf,
            missing: fx.ty("LGone")
        })
    );
}

#[test]
fn lookup_terminates_on_cycle() {
    let mut fx = Fixture::new();
    let a = fx.class("LA", Some("LB"), &[]);
    fx.class("LB", Some("LA"), &[]);

    assert_eq!(
        fx.resolver().lookup_method(a, &fx.sel("nowhere")),
        Err(HierarchyError::Cycle { class: a })
    );
}

#[test]
fn class_initializer_is_inherited() {
    let mut fx = Fixture::new();
    let clinit = Selector::class_initializer(&fx.interner);
    let base = fx.class_with(
        ClassBuilder::new(fx.ty("LBase"), ClassOrigin::binary(None, []))
            .method(MethodDef::with_modifiers(clinit, Modifiers::STATIC))
            .expect("distinct"),
    );
    let derived = fx.class("LDerived", Some("LBase"), &[]);

    let init = fx
        .resolver()
        .class_initializer(derived, &fx.interner)
        .expect("resolvable")
        .expect("inherited");
    assert_eq!(init.declaring, base);
    assert!(init.is_static());
    assert!(init.is_class_initializer(clinit));
}

// === Aggregates ===

#[test]
fn declared_fields_do_not_walk_ancestors() {
    let mut fx = Fixture::new();
    let (_, mid, leaf) = root_mid_leaf(&mut fx);
    let r = fx.resolver();

    assert_eq!(
        r.declared_instance_fields(leaf).map(names),
        Ok(vec![fx.name("name")])
    );
    assert_eq!(r.declared_static_fields(leaf).map(|f| f.len()), Ok(0));
    assert_eq!(r.declared_instance_fields(mid).map(|f| f.len()), Ok(0));
    assert_eq!(r.declared_methods(mid).map(|m| m.len()), Ok(1));
}

#[test]
fn all_instance_fields_unions_the_chain() {
    let mut fx = Fixture::new();
    let (_, _, leaf) = root_mid_leaf(&mut fx);

    assert_eq!(
        fx.resolver().all_instance_fields(leaf).map(names),
        Ok(vec![fx.name("name"), fx.name("count")])
    );
}

#[test]
fn all_methods_keeps_overridden_declarations() {
    let mut fx = Fixture::new();
    let (_, mid, leaf) = root_mid_leaf(&mut fx);
    let r = fx.resolver();

    let raw: Vec<_> = r
        .all_methods(leaf)
        .expect("resolvable")
        .into_iter()
        .map(|m| (m.selector, m.declaring))
        .collect();
    assert_eq!(raw, vec![(fx.sel("tick"), leaf), (fx.sel("tick"), mid)]);

    let visible: Vec<_> = r
        .visible_methods(leaf)
        .expect("resolvable")
        .into_iter()
        .map(|m| m.declaring)
        .collect();
    assert_eq!(visible, vec![leaf]);
}

#[test]
fn aggregate_fails_instead_of_returning_partial_result() {
    let mut fx = Fixture::new();
    let mid = fx.class_with(
        ClassBuilder::new(fx.ty("LMid"), ClassOrigin::binary(Some(fx.ty("LGone")), []))
            .field(FieldDef::instance(fx.name("count"), fx.name("I")))
            .expect("distinct"),
    );
    let leaf = fx.class("LLeaf", Some("LMid"), &[]);

    let expected = HierarchyError::MissingSuperclass {
        class: mid,
        missing: fx.ty("LGone"),
    };
    let r = fx.resolver();
    assert_eq!(r.all_instance_fields(leaf).map(names), Err(expected.clone()));
    assert_eq!(r.all_static_fields(leaf).map(names), Err(expected.clone()));
    assert_eq!(r.all_methods(leaf).map(|m| m.len()), Err(expected));
}

#[test]
fn memoized_and_direct_answers_agree() {
    let mut cached = Fixture::new();
    let mut direct = Fixture::with_options(HierarchyOptions {
        implicit_root: None,
        memoize: false,
    });
    let (_, _, leaf_cached) = root_mid_leaf(&mut cached);
    let (_, _, leaf_direct) = root_mid_leaf(&mut direct);

    for _ in 0..2 {
        assert_eq!(
            cached.resolver().superclass_chain(leaf_cached),
            direct.resolver().superclass_chain(leaf_direct)
        );
        assert_eq!(
            cached.resolver().all_interfaces_of(leaf_cached),
            direct.resolver().all_interfaces_of(leaf_direct)
        );
    }
    assert!(cached.hierarchy.cache_stats().hits > 0);
    assert_eq!(direct.hierarchy.cache_stats().entries, 0);
}

#[test]
fn describe_resolves_names() {
    let mut fx = Fixture::new();
    let leaf = fx.class("LLeaf", Some("LGone"), &[]);

    let err = fx.resolver().superclass_of(leaf).expect_err("LGone missing");
    assert_eq!(
        err.describe(&fx.hierarchy, &fx.interner),
        "cannot resolve superclass <Application,LGone> of <Application,LLeaf>"
    );

    let a = fx.class("LA", Some("LA"), &[]);
    let err = fx.resolver().superclass_chain(a).expect_err("cycle");
    assert_eq!(
        err.describe(&fx.hierarchy, &fx.interner),
        "<Application,LA> is its own ancestor"
    );
}
