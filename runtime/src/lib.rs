//! # Freelance Runtime
//!
//! Runtime implementation for the freelance dashboard.
//!
//! This crate provides the [`Store`], the single owner of the application
//! state snapshot. Every state transition is serialised through the store:
//! callers send actions, the store runs the reducer under its write lock and
//! publishes the resulting snapshot to subscribers.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state, runs the reducer, broadcasts snapshots
//! - **Guarded send**: Validate against the current snapshot and reduce atomically
//! - **Metrics**: Counters and histograms recorded through the `metrics` facade
//!
//! ## Example
//!
//! ```ignore
//! use freelance_runtime::Store;
//!
//! let store = Store::new(initial_state, reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use freelance_core::reducer::{Reducer, Transition};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Metric names and descriptions for the store
pub mod metrics;

/// Configuration for a [`Store`]
///
/// # Example
///
/// ```
/// use freelance_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(64);
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of snapshots buffered for each lagging subscriber
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize) -> Self {
        Self { broadcast_capacity }
    }

    /// Set the snapshot broadcast capacity
    ///
    /// A capacity of zero is raised to one when the store is built.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, Reducer, RwLock, StoreConfig, Transition};
    use crate::metrics::{ACTIONS_REJECTED, ACTIONS_TOTAL, ACTIONS_UNCHANGED, REDUCER_DURATION};
    use std::marker::PhantomData;
    use tokio::sync::broadcast;

    /// The Store - owner of a single state snapshot
    ///
    /// The Store is the imperative shell around the pure reducer:
    /// 1. Receives actions via `send()` or `send_if()`
    /// 2. Runs the reducer while holding the write lock
    /// 3. Publishes the new snapshot to subscribers when the state changed
    ///
    /// Clones share the same state, so a store handle can be injected into
    /// every consumer instead of living in a global.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer type
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        snapshots: broadcast::Sender<S>,
        _action: PhantomData<fn(A)>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (snapshots, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                snapshots,
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// The reducer runs to completion under the write lock, so concurrent
        /// senders are serialised. Returns the reducer's [`Transition`].
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Transition {
            tracing::debug!("Processing action");
            metrics::counter!(ACTIONS_TOTAL).increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            self.reduce_locked(&mut state, action)
        }

        /// Validate against the current snapshot, then send the resulting action
        ///
        /// `guard` sees the snapshot under the same write lock the reducer
        /// runs under, so no other action can slip in between the check and
        /// the transition. It returns the action to reduce together with a
        /// receipt builder. The builder runs on the post-reduction snapshot,
        /// still under the lock, and its value is handed back to the caller.
        ///
        /// # Errors
        ///
        /// Returns whatever error `guard` returns. The state is untouched in
        /// that case.
        #[tracing::instrument(skip(self, guard), name = "store_send_if")]
        pub async fn send_if<G, F, T, Err>(&self, guard: G) -> Result<T, Err>
        where
            G: FnOnce(&S) -> Result<(A, F), Err>,
            F: FnOnce(&S) -> T,
        {
            metrics::counter!(ACTIONS_TOTAL).increment(1);

            let mut state = self.state.write().await;

            let (action, receipt) = match guard(&*state) {
                Ok(accepted) => accepted,
                Err(error) => {
                    tracing::debug!("Guard rejected action");
                    metrics::counter!(ACTIONS_REJECTED).increment(1);
                    return Err(error);
                },
            };

            self.reduce_locked(&mut state, action);
            Ok(receipt(&*state))
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let project_count = store.state(|s| s.projects.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Clone the current snapshot
        pub async fn snapshot(&self) -> S {
            self.state(S::clone).await
        }

        /// Subscribe to snapshots published after each applied transition
        ///
        /// Only transitions that changed the state are published. A
        /// subscriber that falls more than the configured capacity behind
        /// observes `RecvError::Lagged` and skips to the oldest retained
        /// snapshot.
        #[must_use]
        pub fn subscribe(&self) -> broadcast::Receiver<S> {
            self.snapshots.subscribe()
        }

        /// The injected environment
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }

        fn reduce_locked(&self, state: &mut S, action: A) -> Transition {
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let start = std::time::Instant::now();
            let transition = self.reducer.reduce(state, action, &self.environment);
            metrics::histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());

            if transition.is_applied() {
                // Err only means nobody is subscribed right now
                let receivers = self.snapshots.send(state.clone()).unwrap_or(0);
                tracing::trace!(receivers, "Published snapshot");
            } else {
                metrics::counter!(ACTIONS_UNCHANGED).increment(1);
                tracing::trace!("Action left state unchanged");
            }

            transition
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                snapshots: self.snapshots.clone(),
                _action: PhantomData,
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
