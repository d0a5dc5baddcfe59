//! Interior-mutability slots for reference-semantics owners.
//!
//! Owners derived with `SharedInspectable` are written through `&self`, so
//! every writable stored field keeps its value in a [`SharedSlot`]. The
//! accessor's static type is the slot's `Value`.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};

pub trait SharedSlot {
    type Value: Any + Clone;

    fn load(&self) -> Self::Value;
    fn store(&self, value: Self::Value);
}

/// Panics if the cell is already mutably borrowed, like any `RefCell` access.
impl<T: Any + Clone> SharedSlot for RefCell<T> {
    type Value = T;

    fn load(&self) -> T {
        self.borrow().clone()
    }

    fn store(&self, value: T) {
        self.replace(value);
    }
}

impl<T: Any + Copy> SharedSlot for Cell<T> {
    type Value = T;

    fn load(&self) -> T {
        self.get()
    }

    fn store(&self, value: T) {
        self.set(value);
    }
}

/* A poisoned lock still holds a usable value; keep serving it */
impl<T: Any + Clone> SharedSlot for Mutex<T> {
    type Value = T;

    fn load(&self) -> T {
        match self.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn store(&self, value: T) {
        match self.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl<T: Any + Clone> SharedSlot for RwLock<T> {
    type Value = T;

    fn load(&self) -> T {
        match self.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn store(&self, value: T) {
        match self.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl<S: SharedSlot + ?Sized> SharedSlot for Rc<S> {
    type Value = S::Value;

    fn load(&self) -> S::Value {
        (**self).load()
    }

    fn store(&self, value: S::Value) {
        (**self).store(value)
    }
}

impl<S: SharedSlot + ?Sized> SharedSlot for Arc<S> {
    type Value = S::Value;

    fn load(&self) -> S::Value {
        (**self).load()
    }

    fn store(&self, value: S::Value) {
        (**self).store(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<S: SharedSlot>(slot: &S, value: S::Value) -> S::Value {
        slot.store(value);
        slot.load()
    }

    #[test]
    fn every_slot_kind_stores_and_loads() {
        assert_eq!(round_trip(&RefCell::new(vec![1]), vec![1, 2]), vec![1, 2]);
        assert_eq!(round_trip(&Cell::new(1_u8), 2), 2);
        assert_eq!(round_trip(&Mutex::new(String::new()), "a".into()), "a");
        assert_eq!(round_trip(&RwLock::new(0_i64), -5), -5);
        assert_eq!(round_trip(&Arc::new(Mutex::new(1_u16)), 3), 3);
        assert_eq!(round_trip(&Rc::new(Cell::new('a')), 'b'), 'b');
    }

    #[test]
    fn poisoned_mutex_keeps_serving_values() {
        let slot = Arc::new(Mutex::new(1_u32));
        let poisoner = Arc::clone(&slot);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(slot.is_poisoned());
        slot.store(4);
        assert_eq!(slot.load(), 4);
    }
}
