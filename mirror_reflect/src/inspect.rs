use crate::accessor::FieldAccessing;
use std::iter::FusedIterator;
use std::slice;

/// A type whose fields can be enumerated and accessed by name at run-time.
pub trait Inspectable {
    /// Field names in declaration order.
    fn all_field_names(&self) -> FieldNames<'_>;

    /// Returns an accessor for the field named `name`, `None` if there is no
    /// such field.
    ///
    /// The accessor borrows `self` exclusively, so writes made through it
    /// land in this very value.
    fn field(&mut self, name: &str) -> Option<Box<dyn FieldAccessing + '_>>;

    fn has_field(&self, name: &str) -> bool {
        self.all_field_names().any(|field| field == name)
    }
}

/// An [`Inspectable`] type with stable identity, whose fields can be
/// accessed through a shared reference.
pub trait SharedInspectable: Inspectable {
    fn shared_field(&self, name: &str) -> Option<Box<dyn FieldAccessing + '_>>;
}

/// Ordered iterator over an owner's field names.
#[derive(Clone, Debug)]
pub struct FieldNames<'a> {
    inner: NamesInner<'a>,
}

#[derive(Clone, Debug)]
enum NamesInner<'a> {
    Static(slice::Iter<'static, &'static str>),
    Owned(slice::Iter<'a, String>),
}

impl<'a> FieldNames<'a> {
    pub fn from_static(names: &'static [&'static str]) -> Self {
        Self {
            inner: NamesInner::Static(names.iter()),
        }
    }

    pub fn from_owned(names: &'a [String]) -> Self {
        Self {
            inner: NamesInner::Owned(names.iter()),
        }
    }
}

impl<'a> Iterator for FieldNames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match &mut self.inner {
            NamesInner::Static(iter) => iter.next().copied(),
            NamesInner::Owned(iter) => iter.next().map(String::as_str),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            NamesInner::Static(iter) => iter.size_hint(),
            NamesInner::Owned(iter) => iter.size_hint(),
        }
    }
}

impl<'a> DoubleEndedIterator for FieldNames<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        match &mut self.inner {
            NamesInner::Static(iter) => iter.next_back().copied(),
            NamesInner::Owned(iter) => iter.next_back().map(String::as_str),
        }
    }
}

impl ExactSizeIterator for FieldNames<'_> {}

impl FusedIterator for FieldNames<'_> {}
