use crate::model::*;
use crate::source::DeclarationSource;
use crate::store::{DeclarationStore, StoreError};

const SERVICES_JSON: &str = r#"{
  "types": [
    {
      "name": "Service0",
      "namespace": "Demo",
      "modifiers": ["public"],
      "constructors": [
        { "parameters": [ { "name": "i1", "type": "int" }, { "name": "i2", "type": "int" } ] }
      ]
    },
    {
      "name": "Service1",
      "namespace": "Demo",
      "modifiers": ["public", "partial"],
      "base": "Service0",
      "autoInject": true,
      "members": [
        { "kind": "property", "name": "IntValue", "type": "int", "injected": {} },
        { "kind": "property", "name": "BoolValue", "type": "bool", "injected": { "isOptional": true } },
        { "kind": "field", "name": "_strValue", "type": "string", "injected": { "isOptional": true } }
      ],
      "methods": [
        {
          "name": "Initialize",
          "accessibility": "protected",
          "parameters": [
            { "name": "i1", "type": "int" },
            { "name": "i2", "type": "int" },
            { "name": "obj", "type": "string" }
          ]
        }
      ]
    },
    {
      "name": "ExtService1",
      "namespace": "Demo.Dependencies",
      "modifiers": ["partial"],
      "autoInject": true,
      "external": true
    }
  ]
}"#;

#[test]
fn test_load_from_json() {
    let store = DeclarationStore::from_json_str(SERVICES_JSON).expect("valid json");
    assert_eq!(store.len(), 3);

    let service1 = store.lookup("Demo.Service1").expect("Service1");
    assert!(service1.is_partial());
    assert!(service1.auto_inject);
    assert_eq!(service1.members.len(), 3);
    assert_eq!(service1.members[1].injected, Some(InjectedAnnotation { is_optional: true }));
    assert_eq!(service1.methods[0].accessibility, Accessibility::Protected);
    assert_eq!(service1.id, TypeId(1));

    let service0 = store.lookup("Demo.Service0").expect("Service0");
    assert_eq!(service0.constructors[0].accessibility, Accessibility::Public);
    assert!(!service0.is_partial());
}

#[test]
fn test_annotated_types_exclude_external() {
    let store = DeclarationStore::from_json_str(SERVICES_JSON).expect("valid json");
    let names: Vec<String> = store
        .annotated_types()
        .iter()
        .map(|t| t.full_name())
        .collect();
    assert_eq!(names, vec!["Demo.Service1".to_string()]);
}

#[test]
fn test_base_type_resolves_namespace_relative_names() {
    let store = DeclarationStore::from_json_str(SERVICES_JSON).expect("valid json");
    let service1 = store.lookup("Demo.Service1").expect("Service1");
    let base = store.base_type(service1).expect("base");
    assert_eq!(base.full_name(), "Demo.Service0");
}

#[test]
fn test_base_type_unknown_is_none() {
    let mut store = DeclarationStore::new();
    let id = store
        .add(TypeDeclaration::new("Demo", "Orphan").with_base("System.Object"))
        .expect("added");
    let orphan = store.get(id).expect("orphan");
    assert!(store.base_type(orphan).is_none());
}

#[test]
fn test_duplicate_type_is_rejected() {
    let mut store = DeclarationStore::new();
    store.add(TypeDeclaration::new("Demo", "A")).expect("first");
    let err = store.add(TypeDeclaration::new("Demo", "A")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateType(ref name) if name == "Demo.A"));
}

#[test]
fn test_invalid_json_reports_error() {
    let err = DeclarationStore::from_json_str("{ \"types\": [ { } ] }").unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
    assert!(err.to_string().starts_with("invalid declaration file"));
}
