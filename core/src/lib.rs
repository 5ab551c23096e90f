//! # Freelance Core
//!
//! Core traits and types for the freelance dashboard.
//!
//! The dashboard is a pure state machine: every user intent is an action,
//! and a reducer folds that action into the current state snapshot. This
//! crate holds the pieces that are independent of the freelance domain.
//!
//! ## Core Concepts
//!
//! - **State**: The full application snapshot
//! - **Action**: A tagged value describing an intended state transition
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Transition)`
//! - **Transition**: Whether the reducer actually changed the state
//! - **Environment**: Injected dependencies via traits (only a clock here)
//!
//! ## Example
//!
//! ```
//! use freelance_core::reducer::{Reducer, Transition};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tally {
//!     count: u32,
//! }
//!
//! enum TallyAction {
//!     Bump,
//!     Ignore,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Tally, action: TallyAction, _env: &()) -> Transition {
//!         match action {
//!             TallyAction::Bump => {
//!                 state.count += 1;
//!                 Transition::Applied
//!             },
//!             TallyAction::Ignore => Transition::Unchanged,
//!         }
//!     }
//! }
//!
//! let mut state = Tally::default();
//! assert!(TallyReducer.reduce(&mut state, TallyAction::Bump, &()).is_applied());
//! assert!(!TallyReducer.reduce(&mut state, TallyAction::Ignore, &()).is_applied());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Transition)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// Outcome of a single reduction
    ///
    /// Reducers are total: every action yields a transition, never an error.
    /// Actions that do not apply to the current state report `Unchanged`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Transition {
        /// The state was replaced with a new snapshot
        Applied,

        /// The state was left exactly as it was
        Unchanged,
    }

    impl Transition {
        /// Check if the reduction changed the state
        #[must_use]
        pub const fn is_applied(self) -> bool {
            matches!(self, Self::Applied)
        }

        /// `Applied` if `changed` is true, `Unchanged` otherwise
        #[must_use]
        pub const fn from_changed(changed: bool) -> Self {
            if changed {
                Self::Applied
            } else {
                Self::Unchanged
            }
        }
    }

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into a state change
        ///
        /// The reducer must leave `state` untouched whenever it returns
        /// [`Transition::Unchanged`].
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Transition;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use freelance_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
