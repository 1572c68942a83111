use crate::subscription::{IntoSubscriber, Listener, SubscriptionGuard};

/// Shared subscribe/read surface of [`Signal`](crate::Signal) and
/// [`Computed`](crate::Computed).
///
/// Readers choose between `subscribe` (future changes only) and
/// `subscribe_now` (invoke once with the current value, then register).
/// Re-registering the same `Arc` callback is a no-op: it neither adds a
/// second entry nor re-fires the immediate invocation, and still returns a
/// usable guard.
pub trait Observable<T: 'static> {
    /// Register `subscriber` for future notifications. When `immediate` is
    /// true and the subscriber is not already registered, it is invoked
    /// synchronously with the current value before registration.
    fn subscribe_with<S: IntoSubscriber<T>>(&self, subscriber: S, immediate: bool) -> SubscriptionGuard;

    /// Calls `f` with a borrow of the current value. No side effects.
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Returns a clone of the current value. No side effects.
    fn get(&self) -> T
    where T: Clone {
        self.with(T::clone)
    }

    /// Registers `subscriber` to run on future changes only.
    ///
    /// Notification passes snapshot the subscriber set before invoking
    /// anything, so a subscriber unsubscribed while a pass is in flight may
    /// still be invoked once for that pass. After the pass it is never
    /// invoked again.
    fn subscribe<S: IntoSubscriber<T>>(&self, subscriber: S) -> SubscriptionGuard { self.subscribe_with(subscriber, false) }

    /// Invokes `subscriber` once with the current value, then registers it.
    fn subscribe_now<S: IntoSubscriber<T>>(&self, subscriber: S) -> SubscriptionGuard { self.subscribe_with(subscriber, true) }
}

/// Object-safe dependency view of an observable.
///
/// A computed value wires one edge per dependency and only needs to know
/// *that* an upstream value changed, so dependency lists can mix observables
/// of different value types.
pub trait Source {
    /// Registers a notify-only listener. Never invokes it immediately.
    fn listen(&self, listener: Listener) -> SubscriptionGuard;
}
