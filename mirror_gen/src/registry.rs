//! Annotation registry.
//!
//! Maps the name of a derive annotation to the transform that expands it.
//! The table is populated once on first use and is read-only afterwards.

use crate::errors::{GenError, GenResult};
use crate::expand_derive;
use mirror_types::OwnerSemantics;
use proc_macro2::TokenStream;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use syn::DeriveInput;

pub type ExpandFn = fn(&DeriveInput, OwnerSemantics) -> GenResult<TokenStream>;

#[derive(Clone, Copy)]
pub struct Transform {
    pub name: &'static str,
    pub semantics: OwnerSemantics,
    expand: ExpandFn,
}

impl Transform {
    pub const fn new(name: &'static str, semantics: OwnerSemantics, expand: ExpandFn) -> Self {
        Self {
            name,
            semantics,
            expand,
        }
    }

    pub fn expand(&self, input: &DeriveInput) -> GenResult<TokenStream> {
        (self.expand)(input, self.semantics)
    }
}

pub struct TransformRegistry {
    transforms: BTreeMap<&'static str, Transform>,
}

impl TransformRegistry {
    /* Builtin transforms: one per owner semantics */
    fn builtin() -> Self {
        let transforms = [
            Transform::new("Inspectable", OwnerSemantics::Value, expand_derive),
            Transform::new("SharedInspectable", OwnerSemantics::Reference, expand_derive),
        ];
        Self {
            transforms: transforms.into_iter().map(|t| (t.name, t)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.transforms.keys().copied()
    }

    pub fn expand(&self, name: &str, input: &DeriveInput) -> GenResult<TokenStream> {
        let transform = self.get(name).ok_or_else(|| GenError::UnknownTransform {
            name: name.to_string(),
        })?;
        transform.expand(input)
    }
}

/// Process-wide registry.
pub fn registry() -> &'static TransformRegistry {
    static REGISTRY: OnceLock<TransformRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TransformRegistry::builtin)
}
