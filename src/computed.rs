use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::observable::{Observable, Source};
use crate::subscription::{IntoSubscriber, Listener, Subscriber, SubscriberSet, SubscriptionGuard};
use crate::value::ValueCell;

struct Inner<T> {
    /// The recomputation function
    compute: Box<dyn Fn() -> T + Send + Sync>,
    /// Last fully-propagated value
    value: ValueCell<T>,
    /// Downstream subscribers of this computed
    subscribers: SubscriberSet<T>,
    /// One guard per dependency edge, dropped with the computed
    edges: RwLock<Vec<SubscriptionGuard>>,
}

/// Read-only reactive value derived from other observables.
///
/// Construction takes an explicit ordered dependency list and a pure compute
/// closure that reads the dependencies' current values through handles it
/// closes over. The closure runs once at construction for the initial value,
/// then once per dependency notification; reads never recompute.
///
/// Propagation is naive per-edge: each dependency edge independently triggers
/// a recompute-and-notify. A chain recomputes each node exactly once per
/// upstream write, in dependency order. A diamond (two edges reaching the
/// same node from one upstream write) recomputes that node once per incoming
/// edge. There is no topological batching or dirty-marking.
///
/// If the compute closure panics, the panic unwinds to the caller of the
/// triggering write and this computed keeps its previous value: the new state
/// is only stored after the closure returns.
///
/// Cloning a `Computed` shares the same state, subscribers and edges.
///
/// # Example
/// ```
/// use sigcell::{Computed, Signal};
///
/// let a = Signal::new(4);
/// let b = Computed::new(&[&a], {
///     let a = a.clone();
///     move || a.get() + 2
/// });
///
/// assert_eq!(b.get(), 6);
/// a.set(10);
/// assert_eq!(b.get(), 12);
/// ```
pub struct Computed<T>(Arc<Inner<T>>);

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self { Self(Arc::clone(&self.0)) }
}

impl<T: Clone + Send + Sync + 'static> Computed<T> {
    /// Create a computed value over `dependencies`.
    ///
    /// `compute` must be a pure function of the dependencies' current values
    /// and safely re-invocable any number of times. It is called once here,
    /// before any edge is wired, so wiring never double-fires the initial
    /// computation.
    pub fn new<F>(dependencies: &[&dyn Source], compute: F) -> Self
    where F: Fn() -> T + Send + Sync + 'static {
        let initial = compute();
        let inner = Arc::new(Inner {
            compute: Box::new(compute),
            value: ValueCell::new(initial),
            subscribers: SubscriberSet::new(),
            edges: RwLock::new(Vec::new()),
        });

        // One edge per dependency, in list order. Edges hold a Weak reference
        // so a computed does not keep itself alive through its own wiring;
        // dropping the last handle drops the guards, which detach the edges
        // from the dependencies.
        let mut edges = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let weak = Arc::downgrade(&inner);
            edges.push(dependency.listen(Arc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    recompute(&inner);
                }
            })));
        }
        *inner.edges.write().unwrap() = edges;

        Self(inner)
    }

    /// Returns a clone of the last fully-propagated value. Never recomputes.
    pub fn get(&self) -> T { self.0.value.value() }
}

impl<T> Computed<T> {
    /// Calls `f` with a borrow of the last fully-propagated value
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { self.0.value.with(f) }
}

/// Re-invoke the compute closure, store the result, then notify downstream
fn recompute<T: Clone>(inner: &Inner<T>) {
    trace!("recompute");
    let next = (inner.compute)();
    let current = inner.value.set_with(next, T::clone);
    inner.subscribers.notify(&current);
}

impl<T: Clone + Send + Sync + 'static> Observable<T> for Computed<T> {
    fn subscribe_with<S: IntoSubscriber<T>>(&self, subscriber: S, immediate: bool) -> SubscriptionGuard {
        let subscriber = subscriber.into_subscriber();
        if immediate && !self.0.subscribers.contains(&subscriber) {
            let current = self.0.value.value();
            subscriber.invoke(&current);
        }
        SubscriptionGuard::new(self.0.subscribers.subscribe(subscriber))
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { self.0.value.with(f) }
}

impl<T: Send + Sync + 'static> Source for Computed<T> {
    fn listen(&self, listener: Listener) -> SubscriptionGuard { SubscriptionGuard::new(self.0.subscribers.subscribe(Subscriber::NotifyOnly(listener))) }
}

impl<T: std::fmt::Display> std::fmt::Display for Computed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.with(|v| write!(f, "{}", v)) }
}
