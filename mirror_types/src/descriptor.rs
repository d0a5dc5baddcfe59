use serde_derive::{Deserialize, Serialize};

/// Where a field's value lives.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum FieldAccess {
    /// Plain storage inside the owner.
    Stored {
        #[serde(default)]
        type_annotation: Option<String>,
    },
    /// Computed property backed by accessor functions.
    Computed {
        #[serde(default)]
        getter: Option<String>,
        #[serde(default)]
        setter: Option<String>,
    },
}

/// Analyzer output for a single field member, in declaration order.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FieldDescriptor {
    pub name: String,
    pub is_readonly: bool,
    pub access: FieldAccess,
}

impl FieldDescriptor {
    pub fn is_computed(&self) -> bool {
        matches!(self.access, FieldAccess::Computed { .. })
    }
}
