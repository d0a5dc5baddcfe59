/* Declaration file loading tests */

use mirror_gen::loader::load_decl_file;
use mirror_gen::{analyze, GenError};
use mirror_types::DeclKind;
use std::fs;
use tempfile::tempdir;

const STORE_YAML: &str = r#"
types:
  - name: Store
    kind: class
    members:
      - member: variable
        keyword: var
        bindings:
          - pattern: { kind: identifier, name: products }
            type-annotation: "RefCell<Vec<Product>>"
      - member: nested-type
        name: Inventory
      - member: variable
        keyword: var
        bindings:
          - pattern: { kind: identifier, name: summary }
            accessor-block:
              accessors:
                - kind: get
                  implementation: "Self::summary"
"#;

#[test]
fn yaml_declarations_load_and_analyze() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.yaml");
    fs::write(&path, STORE_YAML).unwrap();

    let file = load_decl_file(&path).expect("load yaml declarations");
    let store = &file.types[0];
    assert_eq!(store.kind, DeclKind::Class);

    let fields = analyze(&store.members).unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["products", "summary"]);
    assert!(!fields[0].is_readonly);
    assert!(fields[1].is_readonly);
}

#[test]
fn json_declarations_are_detected_by_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("point.JSON");
    fs::write(
        &path,
        r#"{"types":[{"name":"Point","kind":"struct","members":[]}]}"#,
    )
    .unwrap();

    let file = load_decl_file(&path).unwrap();
    assert_eq!(file.types[0].name, "Point");
    assert!(file.types[0].members.is_empty());
}

#[test]
fn load_errors_carry_the_path() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("missing.yaml");
    let err = load_decl_file(&missing).unwrap_err();
    assert!(matches!(err, GenError::Io { .. }));
    assert!(err.to_string().contains("missing.yaml"));

    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "types: [ { name: 3").unwrap();
    assert!(matches!(
        load_decl_file(&broken),
        Err(GenError::DeclFile { .. })
    ));
}
