use crate::erased::{ErasedValue, TypeTag};
use std::any::Any;
use std::fmt;
use tracing::trace;

/// An interface for accessing a single field of an inspected value.
pub trait FieldAccessing {
    /// The name of the inspected field.
    fn name(&self) -> &str;

    /// The current value of the field, type-erased.
    fn value(&self) -> ErasedValue;

    /// The static type of the field.
    fn type_tag(&self) -> TypeTag;

    /// Whether the field rejects writes.
    fn is_readonly(&self) -> bool;

    /// Writes `value` into the field.
    ///
    /// Returns `false`, leaving the field untouched, when the field is
    /// readonly or `value` is not of the field's static type.
    fn write(&self, value: ErasedValue) -> bool;
}

impl<'a> dyn FieldAccessing + 'a {
    /// Reads the field as `T`, `None` on a type mismatch.
    pub fn value_as<T: Any + Clone>(&self) -> Option<T> {
        self.value().downcast::<T>().ok()
    }

    /// Erases `value` and writes it.
    pub fn write_value<T: Any + Clone>(&self, value: T) -> bool {
        self.write(ErasedValue::new(value))
    }
}

/// Accessor for a field of static type `T`, built from a read closure and
/// an optional write closure that both reach the field's storage location.
///
/// The closures borrow the owner for `'a`, so an accessor can never outlive
/// the lookup that produced it.
pub struct FieldAccessor<'a, T> {
    name: &'static str,
    reader: Box<dyn Fn() -> T + 'a>,
    writer: Option<Box<dyn Fn(T) + 'a>>,
}

impl<'a, T: Any + Clone> FieldAccessor<'a, T> {
    pub fn new(
        name: &'static str,
        reader: Box<dyn Fn() -> T + 'a>,
        writer: Option<Box<dyn Fn(T) + 'a>>,
    ) -> Self {
        Self {
            name,
            reader,
            writer,
        }
    }

    pub fn readonly(name: &'static str, reader: impl Fn() -> T + 'a) -> Self {
        Self::new(name, Box::new(reader), None)
    }

    pub fn writable(
        name: &'static str,
        reader: impl Fn() -> T + 'a,
        writer: impl Fn(T) + 'a,
    ) -> Self {
        Self::new(name, Box::new(reader), Some(Box::new(writer)))
    }

    /// Reads the field without erasing its type.
    pub fn read(&self) -> T {
        (self.reader)()
    }
}

impl<'a, T: Any + Clone> FieldAccessing for FieldAccessor<'a, T> {
    fn name(&self) -> &str {
        self.name
    }

    fn value(&self) -> ErasedValue {
        ErasedValue::new(self.read())
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn is_readonly(&self) -> bool {
        self.writer.is_none()
    }

    fn write(&self, value: ErasedValue) -> bool {
        let Some(writer) = &self.writer else {
            trace!(field = self.name, "rejected write to readonly field");
            return false;
        };
        match value.downcast::<T>() {
            Ok(value) => {
                writer(value);
                true
            }
            Err(value) => {
                trace!(
                    field = self.name,
                    expected = std::any::type_name::<T>(),
                    found = value.type_tag().name(),
                    "rejected write with mismatched type"
                );
                false
            }
        }
    }
}

impl<'a, T> fmt::Debug for FieldAccessor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .field("readonly", &self.writer.is_none())
            .finish()
    }
}
