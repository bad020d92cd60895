use std::cell::Cell;
use std::ops;


// Value with a "changed since last look" flag. Readers call `take_dirt` to find out whether
// something needs to be redrawn; the flag is a `Cell` so that this works through `&self`.
#[derive(Clone, Debug, Default)]
pub struct Dirty<T> {
    value: T,
    dirty: Cell<bool>,
}

impl<T> Dirty<T> {
    pub fn new(value: T) -> Self { Self { value, dirty: Cell::new(false) } }

    // Wholesale replacement: always counts as a change, even if the value is the same.
    pub fn replace(&mut self, value: T) -> T {
        self.dirty.set(true);
        std::mem::replace(&mut self.value, value)
    }

    // Applies `f` and marks the value dirty iff `f` reports a change.
    pub fn modify(&mut self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = f(&mut self.value);
        if changed {
            self.dirty.set(true);
        }
        changed
    }

    pub fn take_dirt(&self) -> bool { self.dirty.replace(false) }
}

impl<T: Eq> Dirty<T> {
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.dirty.set(true);
        }
    }
}

impl<T> ops::Deref for Dirty<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target { &self.value }
}
// No `DerefMut`: every mutation must go through a method that decides about the flag.


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        let mut v = Dirty::new(1);
        assert!(!v.take_dirt());
        v.set(1);
        assert!(!v.take_dirt());
        v.set(2);
        assert!(v.take_dirt());
        assert!(!v.take_dirt());
        assert_eq!(v.replace(2), 2);
        assert!(v.take_dirt());
        assert!(!v.modify(|_| false));
        assert!(!v.take_dirt());
        assert!(v.modify(|x| {
            *x += 1;
            true
        }));
        assert_eq!(*v, 3);
        assert!(v.take_dirt());
    }
}
