use tracing::trace;

use crate::observable::{Observable, Source};
use crate::subscription::{IntoSubscriber, Listener, Subscriber, SubscriberSet, SubscriptionGuard};
use crate::value::ValueCell;

/// Mutable reactive value.
///
/// Writing through [`set`](Signal::set) stores the new value and synchronously
/// notifies every subscriber before returning, whether or not the value
/// changed (no equality short-circuit). Construction fires no notifications.
///
/// Cloning yields a handle sharing the same state and subscriber set.
pub struct Signal<T> {
    value: ValueCell<T>,
    subscribers: SubscriberSet<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self { Self { value: self.value.clone(), subscribers: self.subscribers.clone() } }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self { Self { value: ValueCell::new(value), subscribers: SubscriberSet::new() } }

    /// Calls `f` with a borrow of the current value
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { self.value.with(f) }
}

impl<T: Clone> Signal<T> {
    /// Returns a clone of the current value
    pub fn get(&self) -> T { self.value.value() }

    /// Stores `value` and synchronously notifies all subscribers with it.
    ///
    /// The notification pass runs with no lock held, so subscribers may read
    /// this signal, subscribe, unsubscribe, or even write back into it.
    /// A panicking subscriber (or a panicking downstream recomputation)
    /// unwinds to this caller; the stored value remains the one just written.
    pub fn set(&self, value: T) {
        trace!("signal set");
        let current = self.value.set_with(value, T::clone);
        self.subscribers.notify(&current);
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> for Signal<T> {
    fn subscribe_with<S: IntoSubscriber<T>>(&self, subscriber: S, immediate: bool) -> SubscriptionGuard {
        let subscriber = subscriber.into_subscriber();
        if immediate && !self.subscribers.contains(&subscriber) {
            let current = self.value.value();
            subscriber.invoke(&current);
        }
        SubscriptionGuard::new(self.subscribers.subscribe(subscriber))
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { self.value.with(f) }
}

impl<T: Send + Sync + 'static> Source for Signal<T> {
    fn listen(&self, listener: Listener) -> SubscriptionGuard { SubscriptionGuard::new(self.subscribers.subscribe(Subscriber::NotifyOnly(listener))) }
}

impl<T: std::fmt::Display> std::fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.with(|v| write!(f, "{}", v)) }
}
