use std::sync::Arc;

/// Shared storage for an observable's current state.
///
/// Handles are cheap clones of the same underlying slot. Accessors never hand
/// the guard out, so no lock outlives the call.
pub struct ValueCell<T>(Arc<std::sync::RwLock<T>>);

/// A read-only view sharing storage with a [`ValueCell`].
pub struct ReadValueCell<T>(Arc<std::sync::RwLock<T>>);

impl<T> Clone for ValueCell<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Clone for ReadValueCell<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> ValueCell<T> {
    pub fn new(value: T) -> Self { Self(Arc::new(std::sync::RwLock::new(value))) }

    pub fn set(&self, value: T) {
        let mut current = self.0.write().unwrap();
        *current = value;
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.0.read().unwrap();
        f(&guard)
    }

    /// Stores `value`, then calls `f` on it under the same write guard.
    /// Lets a writer take a copy of what it just stored without a second lock.
    pub fn set_with<R>(&self, value: T, f: impl FnOnce(&T) -> R) -> R {
        let mut current = self.0.write().unwrap();
        *current = value;
        f(&current)
    }

    /// Create a read-only view of this cell
    pub fn readvalue(&self) -> ReadValueCell<T> { ReadValueCell(self.0.clone()) }
}

impl<T: Clone> ValueCell<T> {
    pub fn value(&self) -> T { self.0.read().unwrap().clone() }
}

impl<T> ReadValueCell<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.0.read().unwrap();
        f(&guard)
    }
}

impl<T: Clone> ReadValueCell<T> {
    pub fn value(&self) -> T { self.0.read().unwrap().clone() }
}
