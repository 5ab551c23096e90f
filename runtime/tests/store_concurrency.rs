//! Integration tests for serialised access to a shared Store
//!
//! Many handles send concurrently; every transition must be observed
//! exactly once and in a single total order.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use freelance_core::environment::Clock;
use freelance_core::reducer::{Reducer, Transition};
use freelance_core::{DateTime, Utc};
use freelance_runtime::Store;
use freelance_testing::{FixedClock, test_clock};

#[derive(Debug, Clone, Default)]
struct LogState {
    entries: Vec<(u32, DateTime<Utc>)>,
}

#[derive(Debug, Clone)]
enum LogAction {
    Record(u32),
    Skip,
}

struct LogEnvironment {
    clock: FixedClock,
}

struct LogReducer;

impl Reducer for LogReducer {
    type State = LogState;
    type Action = LogAction;
    type Environment = LogEnvironment;

    fn reduce(&self, state: &mut LogState, action: LogAction, env: &LogEnvironment) -> Transition {
        match action {
            LogAction::Record(n) => {
                state.entries.push((n, env.clock.now()));
                Transition::Applied
            },
            LogAction::Skip => Transition::Unchanged,
        }
    }
}

fn init_tracing() {
    // Other tests may already have installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter("freelance_runtime=trace")
        .with_test_writer()
        .try_init();
}

fn new_store() -> Store<LogState, LogAction, LogEnvironment, LogReducer> {
    init_tracing();
    Store::new(
        LogState::default(),
        LogReducer,
        LogEnvironment {
            clock: test_clock(),
        },
    )
}

#[tokio::test]
async fn test_concurrent_sends_are_serialised() {
    let store = new_store();

    let handles: Vec<_> = (0..20)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move {
                store.send(LogAction::Record(n)).await;
                store.send(LogAction::Skip).await;
            })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            panic!("concurrent send task panicked: {e}");
        }
    }

    let mut seen: Vec<u32> = store.state(|s| s.entries.iter().map(|(n, _)| *n).collect()).await;
    seen.sort_unstable();
    assert_eq!(seen, (0..20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_subscriber_sees_every_applied_snapshot() {
    let store = new_store();
    let mut rx = store.subscribe();

    for n in 0..3 {
        store.send(LogAction::Record(n)).await;
        store.send(LogAction::Skip).await;
    }

    for expected in 1..=3 {
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.entries.len(), expected);
    }
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_environment_clock_is_injected() {
    let store = new_store();

    store.send(LogAction::Record(1)).await;

    let stamped = store.state(|s| s.entries[0].1).await;
    assert_eq!(stamped, store.environment().clock.now());
}
