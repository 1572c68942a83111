/*!
Synchronous reactive values for UI state.

Three pieces:
- [`Signal`]: a mutable value. Writing notifies all subscribers before the
  write returns.
- [`Computed`]: a read-only value derived from an explicit list of
  dependencies (signals or other computeds) by a pure closure. It recomputes
  when a dependency notifies, never on read.
- [`Binding`]: a mounted single-slot view of either, for feeding a render
  loop. Its updater is registered on mount and torn down on drop.

Everything is push-based and synchronous: a `set` call returns only after all
directly and transitively dependent recomputations and notifications have run
on the calling thread. There is no batching of writes and no cycle detection.
There is also no equality short-circuit: setting a value equal to the current
one still notifies.

# Basic usage

```
use sigcell::*;

let count = Signal::new(4);

let doubled = Computed::new(&[&count], {
    let count = count.clone();
    move || count.get() * 2
});

assert_eq!(doubled.get(), 8);

count.set(10);
assert_eq!(doubled.get(), 20);
```

# Subscriptions

`subscribe` runs on future changes only; `subscribe_now` also fires once with
the current value before registering. Both return a guard that unsubscribes
on drop.

```
use sigcell::*;

let label = Signal::new("ready".to_string());

let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
let sub = {
    let seen = seen.clone();
    label.subscribe_now(move |value: &String| seen.lock().unwrap().push(value.clone()))
};

label.set("busy".to_string());
assert_eq!(*seen.lock().unwrap(), vec!["ready".to_string(), "busy".to_string()]);

sub.unsubscribe();
label.set("done".to_string());
assert_eq!(seen.lock().unwrap().len(), 2);
```

# Chained computeds

A computed can depend on another computed; one upstream write converges the
whole chain, in dependency order, before `set` returns.

```
use sigcell::*;

let celsius = Signal::new(0.0f64);
let fahrenheit = Computed::new(&[&celsius], {
    let celsius = celsius.clone();
    move || celsius.get() * 9.0 / 5.0 + 32.0
});
let report = Computed::new(&[&fahrenheit], {
    let fahrenheit = fahrenheit.clone();
    move || format!("{:.1}°F", fahrenheit.get())
});

celsius.set(100.0);
assert_eq!(report.get(), "212.0°F");
```
*/

mod binding;
mod computed;
mod observable;
mod signal;
mod subscription;
mod value;

pub use binding::*;
pub use computed::*;
pub use observable::*;
pub use signal::*;
pub use subscription::*;
pub use value::*;
