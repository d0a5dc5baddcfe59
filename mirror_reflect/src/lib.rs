/* Mirror Reflection Runtime
 *
 * This library provides the runtime half of field reflection: type-erased
 * values, per-field accessors, and the traits implemented by
 * `#[derive(Inspectable)]` / `#[derive(SharedInspectable)]`, letting callers
 * enumerate fields by name, read them without knowing their static type and
 * write them back behind readonly and type checks.
 */

// Lets generated code name `::mirror_reflect` from inside this crate.
extern crate self as mirror_reflect;

pub mod accessor;
pub mod dynamic;
pub mod erased;
pub mod errors;
pub mod inspect;
pub mod lease;
pub mod slot;

pub use accessor::{FieldAccessing, FieldAccessor};
pub use dynamic::{DynamicEmitter, DynamicLayout, DynamicObject};
pub use erased::{ErasedValue, TypeTag};
pub use errors::{DynamicError, DynamicResult};
pub use inspect::{FieldNames, Inspectable, SharedInspectable};
pub use lease::Lease;
pub use slot::SharedSlot;

#[cfg(feature = "derive")]
pub use mirror_macros::{Inspectable, SharedInspectable};
