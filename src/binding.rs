use crate::observable::Observable;
use crate::subscription::SubscriptionGuard;
use crate::value::{ReadValueCell, ValueCell};

/// A mounted view of an observable for a render loop.
///
/// Mounting reads the current value into a single-slot cell and registers one
/// updater subscription that overwrites the slot on every notification. This
/// is the framework-neutral shape of a UI hook: acquire on mount, release on
/// unmount. Dropping the binding tears the subscription down.
///
/// # Example
/// ```
/// use sigcell::{Binding, Signal};
///
/// let count = Signal::new(4);
/// let view = Binding::mount(&count);
///
/// assert_eq!(view.get(), 4);
/// count.set(10);
/// assert_eq!(view.get(), 10);
///
/// drop(view); // unmount: the updater is unregistered
/// count.set(99);
/// ```
pub struct Binding<T> {
    slot: ReadValueCell<T>,
    _updater: SubscriptionGuard,
}

impl<T: Clone + Send + Sync + 'static> Binding<T> {
    /// Mount onto `source`, registering its updater exactly once.
    pub fn mount<O: Observable<T>>(source: &O) -> Self {
        let slot = ValueCell::new(source.get());
        let updater = {
            let slot = slot.clone();
            source.subscribe(move |value: &T| slot.set(value.clone()))
        };
        Self { slot: slot.readvalue(), _updater: updater }
    }

    /// Returns a clone of the slot's current value
    pub fn get(&self) -> T { self.slot.value() }

    /// Applies a pure selector to a borrow of the slot's current value.
    /// Selection reads the slot only; it never touches the source observable.
    pub fn select<R>(&self, selector: impl FnOnce(&T) -> R) -> R { self.slot.with(selector) }
}
