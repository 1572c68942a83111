use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sigcell::*;

mod common;
use common::{init_tracing, watcher};

#[test]
fn test_construction_fires_nothing() {
    init_tracing();
    let signal = Signal::new(42);
    assert_eq!(signal.get(), 42);

    let (accumulate, check) = watcher();
    let _sub = signal.subscribe(move |value: &i32| accumulate(*value));

    // Nothing happened yet: construction and subscription are silent
    assert_eq!(check(), [] as [i32; 0]);
}

#[test]
fn test_set_notifies_every_subscriber_exactly_once() {
    init_tracing();
    let signal = Signal::new(1);

    let (first, check_first) = watcher();
    let (second, check_second) = watcher();
    let _a = signal.subscribe(move |value: &i32| first(*value));
    let _b = signal.subscribe(move |value: &i32| second(*value));

    signal.set(2);
    assert_eq!(check_first(), [2]);
    assert_eq!(check_second(), [2]);
}

#[test]
fn test_equal_value_still_notifies() {
    let signal = Signal::new(5);

    let (accumulate, check) = watcher();
    let _sub = signal.subscribe(move |value: &i32| accumulate(*value));

    // No equality short-circuit: same value, one notification per write
    signal.set(5);
    signal.set(5);
    assert_eq!(check(), [5, 5]);
}

#[test]
fn test_subscribe_now_fires_immediately_once() {
    let signal = Signal::new("ready".to_string());

    let (accumulate, check) = watcher();
    let callback: Arc<dyn Fn(&String) + Send + Sync> = Arc::new(move |value: &String| accumulate(value.clone()));

    let _a = signal.subscribe_now(callback.clone());
    assert_eq!(check(), ["ready"]);

    // Re-subscribing the same callback is a no-op: no second entry,
    // no second immediate invocation
    let _b = signal.subscribe_now(callback.clone());
    assert_eq!(check(), [] as [String; 0]);

    signal.set("busy".to_string());
    assert_eq!(check(), ["busy"]);
}

#[test]
fn test_unsubscribe_is_idempotent() {
    let signal = Signal::new(0);

    let count = Arc::new(AtomicUsize::new(0));
    let callback: Arc<dyn Fn(&i32) + Send + Sync> = {
        let count = count.clone();
        Arc::new(move |_: &i32| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    };

    let first = signal.subscribe(callback.clone());
    let second = signal.subscribe(callback.clone()); // same entry

    signal.set(1);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // First unsubscribe removes the entry; the duplicate guard is a no-op
    first.unsubscribe();
    second.unsubscribe();

    signal.set(2);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unsubscribe_during_pass_keeps_snapshot() {
    let signal = Signal::new(0);

    let victim_guard: Arc<Mutex<Option<SubscriptionGuard>>> = Arc::new(Mutex::new(None));
    let first_count = Arc::new(AtomicUsize::new(0));
    let victim_count = Arc::new(AtomicUsize::new(0));

    // First subscriber unsubscribes the victim when invoked
    let _first = {
        let victim_guard = victim_guard.clone();
        let first_count = first_count.clone();
        signal.subscribe(move |_: &i32| {
            first_count.fetch_add(1, Ordering::SeqCst);
            if let Some(guard) = victim_guard.lock().unwrap().take() {
                guard.unsubscribe();
            }
        })
    };

    *victim_guard.lock().unwrap() = Some({
        let victim_count = victim_count.clone();
        signal.subscribe(move |_: &i32| {
            victim_count.fetch_add(1, Ordering::SeqCst);
        })
    });

    // The victim was already queued for this pass, so it still runs once
    signal.set(1);
    assert_eq!(first_count.load(Ordering::SeqCst), 1);
    assert_eq!(victim_count.load(Ordering::SeqCst), 1);

    // Gone from the next pass
    signal.set(2);
    assert_eq!(first_count.load(Ordering::SeqCst), 2);
    assert_eq!(victim_count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reentrant_subscription_during_pass() {
    let signal = Signal::new(0);
    let count = Arc::new(AtomicUsize::new(0));

    // Subscribing and unsubscribing from inside a callback must not deadlock
    let _sub = {
        let signal2 = signal.clone();
        let count = count.clone();
        signal.subscribe(move |_: &i32| {
            count.fetch_add(1, Ordering::SeqCst);
            let temp = signal2.subscribe(|_: &i32| {});
            temp.unsubscribe();
        })
    };

    signal.set(1);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    signal.set(2);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_reentrant_write_during_pass() {
    let signal = Signal::new(0);

    let (accumulate, check) = watcher();
    let _echo = {
        let signal2 = signal.clone();
        signal.subscribe(move |value: &i32| {
            // Clamp writes back into the signal it observes
            if *value > 10 {
                signal2.set(10);
            }
        })
    };
    let _watch = signal.subscribe(move |value: &i32| accumulate(*value));

    signal.set(3);
    assert_eq!(check(), [3]);
    assert_eq!(signal.get(), 3);

    signal.set(50);
    assert_eq!(signal.get(), 10);
}

#[test]
fn test_notification_order_is_registration_order() {
    let signal = Signal::new(0);
    let order = Arc::new(Mutex::new(Vec::new()));

    let _subs: Vec<_> = (0..4)
        .map(|i| {
            let order = order.clone();
            signal.subscribe(move |_: &i32| order.lock().unwrap().push(i))
        })
        .collect();

    signal.set(1);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn test_cloned_handles_share_state() {
    let signal = Signal::new(1);
    let handle = signal.clone();

    let (accumulate, check) = watcher();
    let _sub = signal.subscribe(move |value: &i32| accumulate(*value));

    handle.set(2);
    assert_eq!(signal.get(), 2);
    assert_eq!(check(), [2]);
}
