//! Abstract accessor-table description shared by every emitter.
//!
//! The synthesizer produces one [`AccessorTable`] per owner type. Emitters
//! turn it into target-language source (the Rust token emitter) or into
//! directly callable closures (the dynamic runtime emitter); neither needs to
//! look at the original declaration list again.

use crate::decl::OwnerSemantics;
use crate::descriptor::FieldAccess;
use serde_derive::{Deserialize, Serialize};

/// Route a reader or writer takes to reach the field's storage.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum AccessPath {
    /// Through a scoped exclusive lease of the whole owner.
    Lease,
    /// Through a shared reference to an owner with stable identity.
    Shared,
}

impl AccessPath {
    pub fn for_semantics(semantics: OwnerSemantics) -> Self {
        match semantics {
            OwnerSemantics::Value => AccessPath::Lease,
            OwnerSemantics::Reference => AccessPath::Shared,
        }
    }
}

/// Synthesized plan for one field's accessor.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AccessorPlan {
    pub name: String,
    pub access: FieldAccess,
    pub reader: AccessPath,
    /// `None` exactly when the field is readonly.
    #[serde(default)]
    pub writer: Option<AccessPath>,
}

impl AccessorPlan {
    pub fn is_readonly(&self) -> bool {
        self.writer.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AccessorTable {
    pub owner: String,
    pub semantics: OwnerSemantics,
    pub plans: Vec<AccessorPlan>,
}

impl AccessorTable {
    /// Field names in declaration order.
    pub fn enumerate(&self) -> impl Iterator<Item = &str> + '_ {
        self.plans.iter().map(|plan| plan.name.as_str())
    }

    /// Linear scan in declaration order; first match wins.
    pub fn lookup(&self, name: &str) -> Option<&AccessorPlan> {
        self.plans.iter().find(|plan| plan.name == name)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Turns an accessor table into something executable or compilable.
pub trait Emitter {
    type Output;
    type Error;

    fn emit(&self, table: &AccessorTable) -> Result<Self::Output, Self::Error>;
}
