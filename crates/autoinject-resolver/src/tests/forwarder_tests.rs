use crate::descriptor::{DependencyDescriptor, DependencyKind, reindex};
use crate::forwarder::*;
use crate::options::ResolverOptions;
use crate::resolver::ResolvedTypeInfo;
use crate::test_fixtures::*;
use autoinject_common::{Diagnostic, DiagnosticKind};
use autoinject_decl::{
    Accessibility, ConstructorSignature, DeclarationStore, Parameter, TypeDeclaration,
};

fn ctor(accessibility: Accessibility, params: &[(&str, &str)]) -> ConstructorSignature {
    params.iter().fold(ConstructorSignature::new(accessibility), |c, (name, ty)| {
        c.with_parameter(Parameter::new(*name, *ty))
    })
}

#[test]
fn test_widest_constructor_is_selected() {
    let options = ResolverOptions::default();
    let ctors = vec![
        ctor(Accessibility::Public, &[("a", "int")]),
        ctor(Accessibility::Protected, &[("a", "int"), ("b", "int")]),
        ctor(Accessibility::Public, &[("c", "int"), ("d", "int")]),
    ];
    let chosen = select_base_constructor(&ctors, &options).unwrap();
    assert_eq!(chosen.parameters[0].name, "a");
    assert_eq!(chosen.parameters.len(), 2);
}

#[test]
fn test_marker_constructor_wins_over_wider_one() {
    let options = ResolverOptions::default();
    let ctors = vec![
        ctor(Accessibility::Public, &[("a", "int"), ("b", "int"), ("c", "int")]),
        ctor(
            Accessibility::Protected,
            &[("skipInitialize", "AutoInject.SkipInitialize"), ("a", "int")],
        ),
    ];
    let chosen = select_base_constructor(&ctors, &options).unwrap();
    assert_eq!(chosen.parameters.len(), 2);
    assert_eq!(chosen.parameters[0].ty, "AutoInject.SkipInitialize");
}

#[test]
fn test_private_constructors_are_not_callable() {
    let options = ResolverOptions::default();
    let ctors = vec![
        ctor(Accessibility::Private, &[("a", "int"), ("b", "int")]),
        ctor(Accessibility::Public, &[]),
    ];
    let chosen = select_base_constructor(&ctors, &options).unwrap();
    assert!(chosen.parameters.is_empty());

    let only_private = vec![ctor(Accessibility::Private, &[("a", "int")])];
    assert!(select_base_constructor(&only_private, &options).is_none());
    assert!(select_base_constructor(&[], &options).is_none());
}

#[test]
fn test_no_base_forwards_nothing() {
    let store = service_store();
    let derived = store.lookup("Demo.Service1").unwrap();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let forwarded = forward_base_dependencies(
        &store,
        derived,
        BaseState::NoBase,
        &ResolverOptions::default(),
        &mut diags,
    );
    assert_eq!(forwarded, Forwarding::Forwarded(Vec::new()));
}

#[test]
fn test_pending_base_is_not_ready() {
    let store = chain_store();
    let derived = store.lookup("Demo.C").unwrap();
    let base = store.lookup("Demo.B").unwrap();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let forwarded = forward_base_dependencies(
        &store,
        derived,
        BaseState::Pending(base),
        &ResolverOptions::default(),
        &mut diags,
    );
    assert_eq!(forwarded, Forwarding::NotReady(base.id));
    assert!(diags.is_empty());
}

#[test]
fn test_external_base_forwards_constructor_parameters() {
    let store = service_store();
    let derived = store.lookup("Demo.Service1").unwrap();
    let base = store.lookup("Demo.Service0").unwrap();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let Forwarding::Forwarded(deps) = forward_base_dependencies(
        &store,
        derived,
        BaseState::External(base),
        &ResolverOptions::default(),
        &mut diags,
    ) else {
        panic!("external base must be ready");
    };
    assert_eq!(names(&deps), ["i1", "i2"]);
    assert!(deps.iter().all(|d| d.is_base_constructor_argument));
    assert!(deps.iter().all(|d| d.kind == DependencyKind::Other));
    assert_eq!(deps[1].index, 1);
}

#[test]
fn test_external_marker_parameter_keeps_marker_kind() {
    let mut store = DeclarationStore::new();
    store
        .add(
            TypeDeclaration::new(NS, "Generated").with_constructor(ctor(
                Accessibility::Protected,
                &[("@skipInitialize", "AutoInject.SkipInitialize"), ("Value", "int")],
            )),
        )
        .unwrap();
    store.add(annotated("Derived").with_base("Generated")).unwrap();
    let derived = store.lookup("Demo.Derived").unwrap();
    let base = store.lookup("Demo.Generated").unwrap();
    let mut diags: Vec<Diagnostic> = Vec::new();

    let Forwarding::Forwarded(deps) = forward_base_dependencies(
        &store,
        derived,
        BaseState::External(base),
        &ResolverOptions::default(),
        &mut diags,
    ) else {
        panic!("external base must be ready");
    };
    assert_eq!(names(&deps), ["skipInitialize", "value"]);
    assert!(deps[0].is_control_marker());
}

#[test]
fn test_unusable_base_parameter_name_is_reported() {
    let mut store = DeclarationStore::new();
    store
        .add(TypeDeclaration::new(NS, "Odd").with_constructor(ctor(
            Accessibility::Public,
            &[("@", "int"), ("ok", "int")],
        )))
        .unwrap();
    store.add(annotated("Derived").with_base("Odd")).unwrap();
    let derived = store.lookup("Demo.Derived").unwrap();
    let base = store.lookup("Demo.Odd").unwrap();
    let mut diags: Vec<Diagnostic> = Vec::new();

    let forwarded = forward_base_dependencies(
        &store,
        derived,
        BaseState::External(base),
        &ResolverOptions::default(),
        &mut diags,
    );
    let Forwarding::Forwarded(deps) = forwarded else {
        panic!("external base must be ready");
    };
    assert_eq!(names(&deps), ["ok"]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::InvalidMemberName);
    assert_eq!(diags[0].type_name, "Demo.Derived");
}

#[test]
fn test_resolved_base_forwards_its_full_list() {
    let store = chain_store();
    let base = store.lookup("Demo.B").unwrap();
    let derived = store.lookup("Demo.C").unwrap();
    let base_deps = reindex(vec![
        DependencyDescriptor::new(
            None,
            "skipInitialize".to_string(),
            "AutoInject.SkipInitialize",
            DependencyKind::ControlMarker,
            false,
        ),
        DependencyDescriptor::new(
            Some("y".to_string()),
            "y".to_string(),
            "int",
            DependencyKind::PropertyOrField,
            false,
        ),
        DependencyDescriptor::new(
            Some("start".to_string()),
            "start".to_string(),
            "int",
            DependencyKind::InitializerArgument,
            false,
        )
        .as_initializer_argument(),
    ]);
    let info = ResolvedTypeInfo {
        declaration: base,
        base_declaration: None,
        base: None,
        is_sealed: false,
        is_abstract: false,
        dependencies: base_deps,
        initializer: None,
    };
    let mut diags: Vec<Diagnostic> = Vec::new();

    let Forwarding::Forwarded(deps) = forward_base_dependencies(
        &store,
        derived,
        BaseState::Resolved(base, &info),
        &ResolverOptions::default(),
        &mut diags,
    ) else {
        panic!("resolved base must be ready");
    };
    assert_eq!(names(&deps), ["skipInitialize", "y", "start"]);
    assert!(deps.iter().all(|d| d.is_base_constructor_argument));
    // The base's initializer is the base's business.
    assert!(deps.iter().all(|d| !d.is_initializer_argument));
    assert_eq!(deps[1].kind, DependencyKind::PropertyOrField);
    // The base's own record is untouched.
    assert!(!info.dependencies[1].is_base_constructor_argument);
}
