use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use tracing::trace;

/// Notify-only callback used for dependency edge wiring: the receiver only
/// cares that a change happened, not what the new value is.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// A registered subscriber. Identity is `Arc` pointer identity, so passing the
/// same `Arc` callback twice refers to the same subscriber.
pub enum Subscriber<T> {
    /// Receives a borrow of the new value on every notification
    Payload(Arc<dyn Fn(&T) + Send + Sync>),
    /// Notification only, value ignored
    NotifyOnly(Listener),
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        match self {
            Subscriber::Payload(cb) => Subscriber::Payload(cb.clone()),
            Subscriber::NotifyOnly(cb) => Subscriber::NotifyOnly(cb.clone()),
        }
    }
}

impl<T> PartialEq for Subscriber<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Subscriber::Payload(a), Subscriber::Payload(b)) => Arc::ptr_eq(a, b),
            (Subscriber::NotifyOnly(a), Subscriber::NotifyOnly(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> Subscriber<T> {
    pub(crate) fn invoke(&self, value: &T) {
        match self {
            Subscriber::Payload(cb) => cb(value),
            Subscriber::NotifyOnly(cb) => cb(),
        }
    }
}

/// Trait for types that can be converted into subscribers.
pub trait IntoSubscriber<T> {
    fn into_subscriber(self) -> Subscriber<T>;
}

impl<F, T> IntoSubscriber<T> for F
where F: Fn(&T) + Send + Sync + 'static
{
    fn into_subscriber(self) -> Subscriber<T> { Subscriber::Payload(Arc::new(self)) }
}

impl<T> IntoSubscriber<T> for Subscriber<T> {
    fn into_subscriber(self) -> Subscriber<T> { self }
}

impl<T> IntoSubscriber<T> for Arc<dyn Fn(&T) + Send + Sync + 'static> {
    fn into_subscriber(self) -> Subscriber<T> { Subscriber::Payload(self) }
}

// Notify-only closures work against any value type
impl<T> IntoSubscriber<T> for Arc<dyn Fn() + Send + Sync + 'static> {
    fn into_subscriber(self) -> Subscriber<T> { Subscriber::NotifyOnly(self) }
}

impl<T: Clone + Send + 'static> IntoSubscriber<T> for std::sync::mpsc::Sender<T> {
    fn into_subscriber(self) -> Subscriber<T> {
        Subscriber::Payload(Arc::new(move |value: &T| {
            let _ = self.send(value.clone()); // Ignore send errors
        }))
    }
}

#[cfg(feature = "tokio")]
impl<T: Clone + Send + 'static> IntoSubscriber<T> for tokio::sync::mpsc::UnboundedSender<T> {
    fn into_subscriber(self) -> Subscriber<T> {
        Subscriber::Payload(Arc::new(move |value: &T| {
            let _ = self.send(value.clone()); // Ignore send errors
        }))
    }
}

/// The subscriber storage shared by [`Signal`](crate::Signal) and
/// [`Computed`](crate::Computed).
///
/// Entries are keyed by a monotonically increasing id, so one run always
/// notifies in registration order.
pub struct SubscriberSet<T>(Arc<Inner<T>>);

struct Inner<T> {
    entries: RwLock<BTreeMap<usize, Subscriber<T>>>,
    next_id: AtomicUsize,
}

impl<T> Clone for SubscriberSet<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Default for SubscriberSet<T> {
    fn default() -> Self { Self::new() }
}

impl<T> SubscriberSet<T> {
    pub fn new() -> Self { Self(Arc::new(Inner { entries: RwLock::new(BTreeMap::new()), next_id: AtomicUsize::new(0) })) }

    /// Registers a subscriber, idempotently: re-registering a subscriber that
    /// is already present returns a guard for the existing entry instead of
    /// adding a second one.
    pub fn subscribe(&self, subscriber: Subscriber<T>) -> ListenerGuard<T> {
        let mut entries = self.0.entries.write().unwrap();
        if let Some((&id, _)) = entries.iter().find(|(_, existing)| **existing == subscriber) {
            return ListenerGuard { inner: Arc::downgrade(&self.0), id };
        }
        let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
        trace!(id, "subscribe");
        entries.insert(id, subscriber);
        ListenerGuard { inner: Arc::downgrade(&self.0), id }
    }

    pub fn contains(&self, subscriber: &Subscriber<T>) -> bool { self.0.entries.read().unwrap().values().any(|s| s == subscriber) }

    /// Invokes every currently-registered subscriber with `value`.
    ///
    /// The entries are snapshotted before any callback runs and no lock is
    /// held during the pass, so a callback may freely subscribe, unsubscribe
    /// or write back into the same observable. A subscriber removed by
    /// another callback mid-pass still receives this notification
    /// (snapshot-at-start semantics).
    pub fn notify(&self, value: &T) {
        let snapshot = {
            let entries = self.0.entries.read().unwrap();
            entries.values().cloned().collect::<Vec<_>>()
        };
        trace!(subscribers = snapshot.len(), "notify");
        for subscriber in snapshot {
            subscriber.invoke(value);
        }
    }
}

/// Removes its subscriber entry when dropped.
///
/// Removal happens at most once even when several guards point at the same
/// deduplicated entry; later drops find nothing to remove.
pub struct ListenerGuard<T> {
    inner: Weak<Inner<T>>,
    id: usize,
}

impl<T> ListenerGuard<T> {
    /// Explicit spelling of the drop behavior
    pub fn unsubscribe(self) {}
}

impl<T> Drop for ListenerGuard<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.entries.write().unwrap().remove(&self.id);
        }
    }
}

/// A type-erased subscription guard, so guards from observables of different
/// value types can live in one collection (a computed's dependency edges).
pub struct SubscriptionGuard {
    _guard: Box<dyn std::any::Any + Send + Sync>,
}

impl SubscriptionGuard {
    pub fn new<T: Send + Sync + 'static>(guard: ListenerGuard<T>) -> Self { Self { _guard: Box::new(guard) } }

    /// Explicit spelling of the drop behavior
    pub fn unsubscribe(self) {}
}
