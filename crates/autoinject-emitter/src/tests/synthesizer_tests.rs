use crate::ir::*;
use crate::synthesizer::*;
use autoinject_decl::{Accessibility, MethodSignature, Parameter, TypeDeclaration, TypeModifiers};
use autoinject_resolver::{DependencyDescriptor, DependencyKind, ResolvedTypeInfo};

const MARKER_TYPE: &str = "global::AutoInject.SkipInitialize";

fn dep(name: &str, ty: &str, kind: DependencyKind, optional: bool) -> DependencyDescriptor {
    let variable_name = autoinject_resolver::normalize(name).unwrap();
    DependencyDescriptor::new(Some(name.to_string()), variable_name, ty, kind, optional)
}

fn marker() -> DependencyDescriptor {
    dep("@skipInitialize", MARKER_TYPE, DependencyKind::ControlMarker, false)
}

fn service1_dependencies() -> Vec<DependencyDescriptor> {
    let init = |name: &str, ty: &str| {
        dep(name, ty, DependencyKind::InitializerArgument, false).as_initializer_argument()
    };
    vec![
        marker(),
        dep("IntValue", "int", DependencyKind::PropertyOrField, false),
        init("i1", "int").as_base_argument(),
        init("i2", "int").as_base_argument(),
        init("obj", "string"),
        dep("BoolValue", "bool", DependencyKind::PropertyOrField, true),
        dep("_strValue", "string", DependencyKind::PropertyOrField, true),
    ]
}

fn initialize() -> MethodSignature {
    MethodSignature::new("Initialize", Accessibility::Protected)
        .with_parameter(Parameter::new("i1", "int"))
        .with_parameter(Parameter::new("i2", "int"))
        .with_parameter(Parameter::new("obj", "string"))
}

fn resolved<'a>(
    decl: &'a TypeDeclaration,
    dependencies: Vec<DependencyDescriptor>,
    initializer: Option<&'a MethodSignature>,
) -> ResolvedTypeInfo<'a> {
    ResolvedTypeInfo {
        declaration: decl,
        base_declaration: None,
        base: None,
        is_sealed: decl.is_sealed(),
        is_abstract: decl.is_abstract(),
        dependencies,
        initializer,
    }
}

fn param_names(ctor: &ConstructorSpec) -> Vec<&str> {
    ctor.parameters.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_full_constructor_hides_marker_and_calls_initializer() {
    let decl = TypeDeclaration::new("Demo", "Service1").with_modifiers(TypeModifiers::PARTIAL);
    let init = initialize();
    let info = resolved(&decl, service1_dependencies(), Some(&init));

    let ctors = synthesize_constructors(&info);
    let full = &ctors.full;

    assert_eq!(full.variant, ConstructorVariant::Full);
    assert_eq!(full.accessibility, Accessibility::Public);
    assert_eq!(
        param_names(full),
        ["intValue", "i1", "i2", "obj", "boolValue", "_strValue"]
    );
    assert_eq!(full.parameter("intValue").unwrap().default, None);
    assert_eq!(
        full.parameter("boolValue").unwrap().default,
        Some(Expr::Default("bool".to_string()))
    );
    assert_eq!(
        full.base_arguments,
        [NamedArgument::forward("i1"), NamedArgument::forward("i2")]
    );
    assert_eq!(
        full.body,
        [
            Statement::Assign {
                member: "IntValue".to_string(),
                parameter: "intValue".to_string(),
            },
            Statement::AssignIfNotDefault {
                member: "BoolValue".to_string(),
                parameter: "boolValue".to_string(),
                ty: "bool".to_string(),
            },
            Statement::AssignIfNotDefault {
                member: "_strValue".to_string(),
                parameter: "_strValue".to_string(),
                ty: "string".to_string(),
            },
            Statement::CallInitializer {
                method: "Initialize".to_string(),
                arguments: vec![
                    NamedArgument::forward("i1"),
                    NamedArgument::forward("i2"),
                    NamedArgument::forward("obj"),
                ],
            },
        ]
    );
}

#[test]
fn test_bypass_constructor_exposes_marker_and_skips_initializer() {
    let decl = TypeDeclaration::new("Demo", "Service1").with_modifiers(TypeModifiers::PARTIAL);
    let init = initialize();
    let info = resolved(&decl, service1_dependencies(), Some(&init));

    let ctors = synthesize_constructors(&info);
    let bypass = ctors.bypass.as_ref().expect("open types get a bypass constructor");

    assert_eq!(bypass.variant, ConstructorVariant::BypassInitializer);
    assert_eq!(bypass.accessibility, Accessibility::Protected);
    assert_eq!(bypass.parameters[0].name, "skipInitialize");
    assert_eq!(bypass.parameters[0].ty, MARKER_TYPE);
    assert_eq!(bypass.parameters.len(), ctors.full.parameters.len() + 1);
    assert_eq!(bypass.base_arguments, ctors.full.base_arguments);
    assert!(!bypass.calls_initializer());
    assert_eq!(bypass.body.len(), 3);
}

#[test]
fn test_sealed_type_has_no_bypass_constructor() {
    let decl = TypeDeclaration::new("Demo", "Service2")
        .with_modifiers(TypeModifiers::PARTIAL | TypeModifiers::SEALED);
    let info = resolved(&decl, vec![marker()], None);

    let ctors = synthesize_constructors(&info);

    assert!(ctors.bypass.is_none());
    assert_eq!(ctors.iter().count(), 1);
    assert_eq!(ctors.full.accessibility, Accessibility::Public);
    assert!(ctors.full.parameters.is_empty());
    assert!(ctors.full.body.is_empty());
}

#[test]
fn test_abstract_type_full_constructor_is_protected() {
    let decl = TypeDeclaration::new("Demo", "Base")
        .with_modifiers(TypeModifiers::PARTIAL | TypeModifiers::ABSTRACT);
    let info = resolved(&decl, vec![marker()], None);

    let ctors = synthesize_constructors(&info);

    assert_eq!(ctors.full.accessibility, Accessibility::Protected);
    assert_eq!(
        ctors.bypass.as_ref().map(|c| c.accessibility),
        Some(Accessibility::Protected)
    );
}

#[test]
fn test_forwarded_marker_is_passed_as_default() {
    let decl = TypeDeclaration::new("Demo", "Service3").with_modifiers(TypeModifiers::PARTIAL);
    let deps = vec![
        marker().as_base_argument(),
        dep("XValue", "int", DependencyKind::PropertyOrField, false),
        dep("v0", "string", DependencyKind::Other, false).as_base_argument(),
    ];
    let info = resolved(&decl, deps, None);

    let ctors = synthesize_constructors(&info);

    for ctor in ctors.iter() {
        assert_eq!(
            ctor.base_arguments,
            [
                NamedArgument {
                    name: "skipInitialize".to_string(),
                    value: Expr::Default(MARKER_TYPE.to_string()),
                },
                NamedArgument::forward("v0"),
            ]
        );
    }
    assert!(!ctors.full.calls_initializer());
}

#[test]
fn test_base_forwarded_members_are_not_assigned_locally() {
    let decl = TypeDeclaration::new("Demo", "Derived").with_modifiers(TypeModifiers::PARTIAL);
    let deps = vec![
        marker(),
        dep("Count", "int", DependencyKind::PropertyOrField, false).as_base_argument(),
        dep("Name", "string", DependencyKind::PropertyOrField, false),
    ];
    let info = resolved(&decl, deps, None);

    let ctors = synthesize_constructors(&info);

    assert_eq!(
        ctors.full.body,
        [Statement::Assign {
            member: "Name".to_string(),
            parameter: "name".to_string(),
        }]
    );
    assert_eq!(ctors.full.base_arguments, [NamedArgument::forward("count")]);
}

#[test]
fn test_initializer_without_parameters_is_still_called() {
    let decl = TypeDeclaration::new("Demo", "Plain").with_modifiers(TypeModifiers::PARTIAL);
    let init = MethodSignature::new("Initialize", Accessibility::Protected);
    let info = resolved(&decl, vec![marker()], Some(&init));

    let ctors = synthesize_constructors(&info);

    assert_eq!(
        ctors.full.body,
        [Statement::CallInitializer {
            method: "Initialize".to_string(),
            arguments: Vec::new(),
        }]
    );
}

#[test]
fn test_synthesis_is_deterministic() {
    let decl = TypeDeclaration::new("Demo", "Service1").with_modifiers(TypeModifiers::PARTIAL);
    let init = initialize();
    let info = resolved(&decl, service1_dependencies(), Some(&init));

    assert_eq!(synthesize_constructors(&info), synthesize_constructors(&info));
}
