//! Type-erased field values.
//!
//! An [`ErasedValue`] owns a clonable `'static` value together with the
//! [`TypeTag`] it was created with. Recovering the concrete value is a checked
//! conversion that fails closed: a mismatch hands the value back instead of
//! panicking.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Static type of a field, comparable at run-time.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Best-effort type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/* Object-safe clone + downcast support for boxed values */
trait ErasedSlot: Any {
    fn clone_slot(&self) -> Box<dyn ErasedSlot>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone> ErasedSlot for T {
    fn clone_slot(&self) -> Box<dyn ErasedSlot> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

pub struct ErasedValue {
    tag: TypeTag,
    value: Box<dyn ErasedSlot>,
}

impl ErasedValue {
    pub fn new<T: Any + Clone>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            value: Box::new(value),
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    pub fn is<T: Any>(&self) -> bool {
        self.tag.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        ErasedSlot::as_any(&*self.value).downcast_ref::<T>()
    }

    /// Recovers the concrete value, or returns `self` unchanged on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, ErasedValue> {
        if !self.is::<T>() {
            return Err(self);
        }
        let tag = self.tag;
        match ErasedSlot::into_any(self.value).downcast::<T>() {
            Ok(value) => Ok(*value),
            /* Unreachable while `tag` matches the boxed type */
            Err(_) => Err(ErasedValue {
                tag,
                value: Box::new(()),
            }),
        }
    }
}

impl Clone for ErasedValue {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag,
            value: ErasedSlot::clone_slot(&*self.value),
        }
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedValue")
            .field("type", &self.tag.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_recovers_matching_type() {
        let value = ErasedValue::new(String::from("Vision Pro"));
        assert!(value.is::<String>());
        assert_eq!(value.downcast_ref::<String>().unwrap(), "Vision Pro");
        assert_eq!(value.downcast::<String>().unwrap(), "Vision Pro");
    }

    #[test]
    fn mismatched_downcast_fails_closed() {
        let value = ErasedValue::new(3499_i64);
        assert!(value.downcast_ref::<i32>().is_none());

        let value = value.downcast::<i32>().unwrap_err();
        assert_eq!(value.type_tag(), TypeTag::of::<i64>());
        assert_eq!(value.downcast::<i64>().unwrap(), 3499);
    }

    #[test]
    fn clone_is_deep() {
        let original = ErasedValue::new(vec![1_u8, 2, 3]);
        let copy = original.clone();
        let mut items = copy.downcast::<Vec<u8>>().unwrap();
        items.push(4);
        assert_eq!(original.downcast_ref::<Vec<u8>>().unwrap(), &vec![1, 2, 3]);
    }

    #[test]
    fn type_tags_compare_by_type() {
        assert_eq!(TypeTag::of::<Vec<String>>(), TypeTag::of::<Vec<String>>());
        assert_ne!(TypeTag::of::<u32>(), TypeTag::of::<i32>());
        assert!(TypeTag::of::<bool>().name().contains("bool"));
        assert_eq!(TypeTag::of::<u8>().to_string(), "u8");
    }
}
