use sigcell::*;

#[test]
fn test_std_channel_subscriber() {
    let signal = Signal::new(0);

    let (tx, rx) = std::sync::mpsc::channel::<i32>();
    let _sub = signal.subscribe(tx);

    signal.set(7);
    signal.set(8);

    assert_eq!(rx.try_recv(), Ok(7));
    assert_eq!(rx.try_recv(), Ok(8));
    assert!(rx.try_recv().is_err());
}

#[cfg(feature = "tokio")]
#[tokio::test]
async fn test_tokio_channel_subscriber() {
    let signal = Signal::new("idle".to_string());

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let _sub = signal.subscribe(tx);

    signal.set("running".to_string());

    assert_eq!(rx.try_recv().unwrap(), "running");
    assert!(rx.try_recv().is_err());
}

#[cfg(feature = "tokio")]
#[tokio::test]
async fn test_computed_feeds_async_consumer() {
    let source = Signal::new(1);
    let doubled = Computed::new(&[&source], {
        let source = source.clone();
        move || source.get() * 2
    });

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<i32>();
    let _sub = doubled.subscribe(tx);

    source.set(21);

    assert_eq!(rx.recv().await, Some(42));
}
