//! Scoped exclusive access to a value-semantics owner.
//!
//! A [`Lease`] wraps the `&mut` borrow taken by a `field` lookup so that the
//! reader and the writer closures of one accessor can both reach the owner's
//! original storage. The `'a` lifetime ties every clone of the lease to that
//! borrow, and a `RefCell` checks at run-time that reads and writes never
//! overlap. Leases are `!Send`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub struct Lease<'a, O: ?Sized> {
    owner: Rc<RefCell<&'a mut O>>,
}

impl<'a, O: ?Sized> Lease<'a, O> {
    pub fn exclusive(owner: &'a mut O) -> Self {
        Self {
            owner: Rc::new(RefCell::new(owner)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&O) -> R) -> R {
        let guard = self.owner.borrow();
        f(&**guard)
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        let mut guard = self.owner.borrow_mut();
        f(&mut **guard)
    }

    /// Number of live handles sharing this lease.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.owner)
    }
}

impl<'a, O: ?Sized> Clone for Lease<'a, O> {
    fn clone(&self) -> Self {
        Self {
            owner: Rc::clone(&self.owner),
        }
    }
}

impl<'a, O: ?Sized> fmt::Debug for Lease<'a, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("holders", &self.holders())
            .finish_non_exhaustive()
    }
}
