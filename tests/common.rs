use std::sync::{Arc, Mutex};

/// Installs a test-writer tracing subscriber so `--nocapture` runs show the
/// crate's trace output. Safe to call from every test; later calls are no-ops.
#[allow(unused)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).with_test_writer().try_init();
}

/// Returns an accumulator callback and a checker that drains what was
/// accumulated since the last check.
#[allow(unused)]
pub fn watcher<T: Send + Sync + 'static>() -> (Box<dyn Fn(T) + Send + Sync>, Box<dyn Fn() -> Vec<T> + Send + Sync>) {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let accumulate = {
        let changes = changes.clone();
        Box::new(move |value: T| {
            changes.lock().unwrap().push(value);
        })
    };

    let check = Box::new(move || {
        let changes: Vec<T> = changes.lock().unwrap().drain(..).collect();
        changes
    });

    (accumulate, check)
}
