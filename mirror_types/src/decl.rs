use serde_derive::{Deserialize, Serialize};

/// Kind of declaration that owns the inspected members.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    Struct,
    Enum,
    Class,
}

impl DeclKind {
    /// Structs and enums are copied by value; classes are shared by identity.
    pub fn semantics(self) -> OwnerSemantics {
        match self {
            DeclKind::Struct | DeclKind::Enum => OwnerSemantics::Value,
            DeclKind::Class => OwnerSemantics::Reference,
        }
    }
}

/// How instances of an owner type relate to their storage.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum OwnerSemantics {
    /// Copies are independent; writes need the specific storage location.
    Value,
    /// Instances have a stable identity; any reference observes the same writes.
    Reference,
}

impl OwnerSemantics {
    pub fn is_value(self) -> bool {
        matches!(self, OwnerSemantics::Value)
    }
}

/// Binding keyword of a variable declaration (`let` is immutable).
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum BindingKeyword {
    Let,
    Var,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BindingPattern {
    /// A simple name bound to a value.
    Identifier { name: String },
    /// Destructuring pattern such as `(a, b)`.
    Tuple { elements: Vec<BindingPattern> },
    /// `_`
    Wildcard,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AccessorDecl {
    pub kind: AccessorKind,
    /// Path of the function implementing this accessor, when the target
    /// language needs one (e.g. `Self::display_name`).
    #[serde(default)]
    pub implementation: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AccessorBlock {
    pub accessors: Vec<AccessorDecl>,
}

impl AccessorBlock {
    pub fn getter(&self) -> Option<&AccessorDecl> {
        self.accessors.iter().find(|a| a.kind == AccessorKind::Get)
    }

    pub fn setter(&self) -> Option<&AccessorDecl> {
        self.accessors.iter().find(|a| a.kind == AccessorKind::Set)
    }

    pub fn has_setter(&self) -> bool {
        self.setter().is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PatternBinding {
    pub pattern: BindingPattern,
    #[serde(default)]
    pub type_annotation: Option<String>,
    #[serde(default)]
    pub accessor_block: Option<AccessorBlock>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct VariableDecl {
    pub keyword: BindingKeyword,
    pub bindings: Vec<PatternBinding>,
}

impl VariableDecl {
    /* Single identifier binding with no accessor block */
    pub fn stored(keyword: BindingKeyword, name: &str, type_annotation: Option<&str>) -> Self {
        Self {
            keyword,
            bindings: vec![PatternBinding {
                pattern: BindingPattern::Identifier {
                    name: name.to_string(),
                },
                type_annotation: type_annotation.map(str::to_string),
                accessor_block: None,
            }],
        }
    }

    /* Single identifier binding backed by an accessor block */
    pub fn computed(name: &str, getter: Option<&str>, setter: Option<Option<&str>>) -> Self {
        let mut accessors = vec![AccessorDecl {
            kind: AccessorKind::Get,
            implementation: getter.map(str::to_string),
        }];
        if let Some(setter) = setter {
            accessors.push(AccessorDecl {
                kind: AccessorKind::Set,
                implementation: setter.map(str::to_string),
            });
        }
        Self {
            keyword: BindingKeyword::Var,
            bindings: vec![PatternBinding {
                pattern: BindingPattern::Identifier {
                    name: name.to_string(),
                },
                type_annotation: None,
                accessor_block: Some(AccessorBlock { accessors }),
            }],
        }
    }
}

/// One entry of a type's member list.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "member", rename_all = "kebab-case")]
pub enum MemberDecl {
    Variable(VariableDecl),
    Function { name: String },
    NestedType { name: String },
    EnumCase { name: String },
}

impl MemberDecl {
    /// Human-readable label used in diagnostics.
    pub fn label(&self) -> String {
        match self {
            MemberDecl::Variable(var) => match var.bindings.first().map(|b| &b.pattern) {
                Some(BindingPattern::Identifier { name }) => format!("variable '{}'", name),
                Some(_) => "variable with a destructuring pattern".to_string(),
                None => "variable without bindings".to_string(),
            },
            MemberDecl::Function { name } => format!("function '{}'", name),
            MemberDecl::NestedType { name } => format!("nested type '{}'", name),
            MemberDecl::EnumCase { name } => format!("enum case '{}'", name),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDecl {
    pub name: String,
    pub kind: DeclKind,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

/// Contents of a declaration file consumed by the CLI.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DeclFile {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_declarations_have_reference_semantics() {
        assert_eq!(DeclKind::Class.semantics(), OwnerSemantics::Reference);
        assert!(DeclKind::Struct.semantics().is_value());
        assert!(DeclKind::Enum.semantics().is_value());
    }

    #[test]
    fn accessor_block_reports_setter() {
        let readonly = VariableDecl::computed("bar", None, None);
        let block = readonly.bindings[0].accessor_block.as_ref().unwrap();
        assert!(block.getter().is_some());
        assert!(!block.has_setter());

        let writable = VariableDecl::computed("bar2", Some("Self::bar2"), Some(None));
        let block = writable.bindings[0].accessor_block.as_ref().unwrap();
        assert!(block.has_setter());
        assert_eq!(
            block.getter().and_then(|g| g.implementation.as_deref()),
            Some("Self::bar2")
        );
    }

    #[test]
    fn decl_file_parses_from_yaml() {
        let yaml = r#"
types:
  - name: Product
    kind: struct
    members:
      - member: variable
        keyword: let
        bindings:
          - pattern: { kind: identifier, name: model_name }
            type-annotation: String
      - member: variable
        keyword: var
        bindings:
          - pattern: { kind: identifier, name: price }
            type-annotation: i64
      - member: function
        name: introduce
"#;
        let file: DeclFile = serde_yml::from_str(yaml).expect("parse decl file");
        assert_eq!(file.types.len(), 1);
        let product = &file.types[0];
        assert_eq!(product.kind, DeclKind::Struct);
        assert_eq!(product.members.len(), 3);
        assert_eq!(
            product.members[0],
            MemberDecl::Variable(VariableDecl::stored(
                BindingKeyword::Let,
                "model_name",
                Some("String")
            ))
        );
        assert_eq!(product.members[2].label(), "function 'introduce'");
    }

    #[test]
    fn tuple_pattern_round_trips_through_json() {
        let member = MemberDecl::Variable(VariableDecl {
            keyword: BindingKeyword::Let,
            bindings: vec![PatternBinding {
                pattern: BindingPattern::Tuple {
                    elements: vec![
                        BindingPattern::Identifier { name: "x".into() },
                        BindingPattern::Wildcard,
                    ],
                },
                type_annotation: None,
                accessor_block: None,
            }],
        });
        let json = serde_json::to_string(&member).unwrap();
        let back: MemberDecl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
        assert_eq!(back.label(), "variable with a destructuring pattern");
    }
}
