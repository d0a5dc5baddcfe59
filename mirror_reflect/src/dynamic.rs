//! Closure emitter: binds an accessor table to run-time storage.
//!
//! Where the Rust emitter renders a table as source code, [`DynamicEmitter`]
//! turns it into a [`DynamicLayout`], and [`DynamicObject`] keeps one erased
//! slot per field. Objects are value-semantics owners: lookups borrow the
//! object exclusively and accessors write straight into its slots.

use crate::accessor::FieldAccessing;
use crate::erased::{ErasedValue, TypeTag};
use crate::errors::{DynamicError, DynamicResult};
use crate::inspect::{FieldNames, Inspectable};
use crate::lease::Lease;
use mirror_types::{AccessorTable, Emitter, FieldAccess};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicEmitter;

impl Emitter for DynamicEmitter {
    type Output = DynamicLayout;
    type Error = DynamicError;

    fn emit(&self, table: &AccessorTable) -> DynamicResult<DynamicLayout> {
        let mut names = Vec::with_capacity(table.len());
        let mut readonly = Vec::with_capacity(table.len());

        for plan in &table.plans {
            if let FieldAccess::Computed { .. } = plan.access {
                return Err(DynamicError::ComputedMember {
                    owner: table.owner.clone(),
                    name: plan.name.clone(),
                });
            }
            names.push(plan.name.clone());
            readonly.push(plan.is_readonly());
        }

        debug!(owner = %table.owner, fields = names.len(), "emitted dynamic layout");
        Ok(DynamicLayout {
            owner: table.owner.clone(),
            names,
            readonly,
        })
    }
}

/// Field layout shared by every object of one dynamic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicLayout {
    owner: String,
    names: Vec<String>,
    readonly: Vec<bool>,
}

impl DynamicLayout {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

#[derive(Debug, Clone)]
pub struct DynamicObject {
    layout: Arc<DynamicLayout>,
    slots: Vec<ErasedValue>,
}

impl DynamicObject {
    /// Builds an object with exactly one initial value per field. Each value
    /// fixes the static type of its slot.
    pub fn new<'n>(
        layout: Arc<DynamicLayout>,
        values: impl IntoIterator<Item = (&'n str, ErasedValue)>,
    ) -> DynamicResult<Self> {
        let mut slots: Vec<Option<ErasedValue>> = vec![None; layout.len()];

        for (name, value) in values {
            let index = layout
                .position(name)
                .ok_or_else(|| DynamicError::UnknownField {
                    owner: layout.owner.clone(),
                    name: name.to_string(),
                })?;
            if slots[index].replace(value).is_some() {
                return Err(DynamicError::DuplicateValue {
                    owner: layout.owner.clone(),
                    name: name.to_string(),
                });
            }
        }

        let slots = slots
            .into_iter()
            .zip(&layout.names)
            .map(|(slot, name)| {
                slot.ok_or_else(|| DynamicError::MissingValue {
                    owner: layout.owner.clone(),
                    name: name.clone(),
                })
            })
            .collect::<DynamicResult<Vec<_>>>()?;

        Ok(Self { layout, slots })
    }

    pub fn layout(&self) -> &DynamicLayout {
        &self.layout
    }

    pub fn get(&self, name: &str) -> Option<&ErasedValue> {
        self.layout.position(name).map(|index| &self.slots[index])
    }
}

impl Inspectable for DynamicObject {
    fn all_field_names(&self) -> FieldNames<'_> {
        FieldNames::from_owned(&self.layout.names)
    }

    fn field(&mut self, name: &str) -> Option<Box<dyn FieldAccessing + '_>> {
        let index = self.layout.position(name)?;
        let accessor = SlotAccessor {
            name: &self.layout.names[index],
            tag: self.slots[index].type_tag(),
            readonly: self.layout.readonly[index],
            slot: Lease::exclusive(&mut self.slots[index]),
        };
        Some(Box::new(accessor))
    }
}

/* Accessor over one erased slot; the slot's tag is fixed at construction */
struct SlotAccessor<'a> {
    name: &'a str,
    tag: TypeTag,
    readonly: bool,
    slot: Lease<'a, ErasedValue>,
}

impl FieldAccessing for SlotAccessor<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn value(&self) -> ErasedValue {
        self.slot.read(ErasedValue::clone)
    }

    fn type_tag(&self) -> TypeTag {
        self.tag
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn write(&self, value: ErasedValue) -> bool {
        if self.readonly || value.type_tag() != self.tag {
            trace!(field = self.name, "rejected dynamic write");
            return false;
        }
        self.slot.write(|slot| *slot = value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_types::{AccessPath, AccessorPlan, OwnerSemantics};

    fn stored(name: &str, readonly: bool) -> AccessorPlan {
        AccessorPlan {
            name: name.into(),
            access: FieldAccess::Stored {
                type_annotation: None,
            },
            reader: AccessPath::Lease,
            writer: (!readonly).then_some(AccessPath::Lease),
        }
    }

    fn product_layout() -> Arc<DynamicLayout> {
        let table = AccessorTable {
            owner: "Product".into(),
            semantics: OwnerSemantics::Value,
            plans: vec![stored("model_name", true), stored("price", false)],
        };
        Arc::new(DynamicEmitter.emit(&table).unwrap())
    }

    fn vision_pro() -> DynamicObject {
        DynamicObject::new(
            product_layout(),
            [
                ("price", ErasedValue::new(3499_i64)),
                ("model_name", ErasedValue::new("Vision Pro".to_string())),
            ],
        )
        .unwrap()
    }

    #[test]
    fn names_follow_layout_order() {
        let product = vision_pro();
        assert_eq!(
            product.all_field_names().collect::<Vec<_>>(),
            vec!["model_name", "price"]
        );
        assert_eq!(product.layout().owner(), "Product");
    }

    #[test]
    fn writes_respect_readonly_and_type() {
        let mut product = vision_pro();

        let name = product.field("model_name").unwrap();
        assert!(name.is_readonly());
        assert!(!name.write_value("Mac Pro".to_string()));
        drop(name);

        let price = product.field("price").unwrap();
        assert_eq!(price.type_tag(), TypeTag::of::<i64>());
        assert!(!price.write_value(799_u64));
        assert!(price.write_value(799_i64));
        assert_eq!(price.value_as::<i64>(), Some(799));
        drop(price);

        assert_eq!(product.get("price").unwrap().downcast_ref::<i64>(), Some(&799));
        assert_eq!(
            product.get("model_name").unwrap().downcast_ref::<String>().unwrap(),
            "Vision Pro"
        );
        assert!(product.field("does_not_exist").is_none());
    }

    #[test]
    fn construction_errors_are_reported() {
        let layout = product_layout();

        let missing = DynamicObject::new(layout.clone(), [("price", ErasedValue::new(1_i64))]);
        assert!(matches!(missing, Err(DynamicError::MissingValue { .. })));

        let unknown = DynamicObject::new(layout.clone(), [("color", ErasedValue::new(1_u8))]);
        assert!(matches!(unknown, Err(DynamicError::UnknownField { .. })));

        let duplicate = DynamicObject::new(
            layout,
            [
                ("price", ErasedValue::new(1_i64)),
                ("price", ErasedValue::new(2_i64)),
            ],
        );
        assert!(matches!(duplicate, Err(DynamicError::DuplicateValue { .. })));
    }

    #[test]
    fn computed_members_are_rejected() {
        let table = AccessorTable {
            owner: "Labelled".into(),
            semantics: OwnerSemantics::Value,
            plans: vec![AccessorPlan {
                name: "label".into(),
                access: FieldAccess::Computed {
                    getter: None,
                    setter: None,
                },
                reader: AccessPath::Lease,
                writer: None,
            }],
        };
        assert_eq!(
            DynamicEmitter.emit(&table),
            Err(DynamicError::ComputedMember {
                owner: "Labelled".into(),
                name: "label".into(),
            })
        );
    }
}
