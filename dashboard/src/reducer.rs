//! Reducer logic for the dashboard state.
//!
//! Two actions change state: `MarkProjectPaid` and `UpdateProjectStatus`.
//! Every other declared action is absorbed as a no-op, which keeps the
//! reducer total over the whole action set. The reducer never validates,
//! never fails and never logs.

use crate::types::{AppAction, AppState, Money, Payment, PaymentStatus, ProjectId, ProjectStatus};
use freelance_core::{
    environment::Clock,
    reducer::{Reducer, Transition},
};
use std::sync::Arc;

/// Environment dependencies for the dashboard reducer
#[derive(Clone)]
pub struct DashboardEnvironment {
    /// Clock for stamping payment dates
    pub clock: Arc<dyn Clock>,
}

impl DashboardEnvironment {
    /// Creates a new `DashboardEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for DashboardEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the dashboard state
#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardReducer;

impl DashboardReducer {
    /// Creates a new `DashboardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends a payment and flags every project with the id as paid
    ///
    /// No existence, prior-status or duplicate checks: dispatching twice
    /// appends two payments.
    fn mark_paid(state: &mut AppState, project_id: &ProjectId, amount: Money, env: &DashboardEnvironment) {
        let payment = Payment::new(project_id.clone(), amount, env.clock.now());

        state.payments = state
            .payments
            .iter()
            .cloned()
            .chain(std::iter::once(payment))
            .collect();

        state.projects = state
            .projects
            .iter()
            .map(|project| {
                if &project.id == project_id {
                    project.clone().with_payment_status(PaymentStatus::Paid)
                } else {
                    project.clone()
                }
            })
            .collect();
    }

    /// Replaces the status of matching projects; unknown ids touch nothing
    fn update_status(state: &mut AppState, project_id: &ProjectId, status: ProjectStatus) -> Transition {
        if !state.projects.iter().any(|p| &p.id == project_id) {
            return Transition::Unchanged;
        }

        state.projects = state
            .projects
            .iter()
            .map(|project| {
                if &project.id == project_id {
                    project.clone().with_status(status)
                } else {
                    project.clone()
                }
            })
            .collect();

        Transition::Applied
    }
}

impl Reducer for DashboardReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = DashboardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Transition {
        match action {
            AppAction::MarkProjectPaid { project_id, amount } => {
                Self::mark_paid(state, &project_id, amount, env);
                Transition::Applied
            },

            AppAction::UpdateProjectStatus { project_id, status } => {
                Self::update_status(state, &project_id, status)
            },

            // Declared but not wired
            AppAction::AddPayment(_)
            | AppAction::AddClient(_)
            | AppAction::AddProject(_)
            | AppAction::DeleteClient { .. }
            | AppAction::DeleteProject { .. } => Transition::Unchanged,
        }
    }
}

/// Computes the next snapshot without touching `state`
///
/// Collections the action does not rewrite are shared with `state`; for a
/// no-op action the result shares all of its storage with `state`.
#[must_use]
pub fn apply(state: &AppState, action: AppAction, env: &DashboardEnvironment) -> AppState {
    let mut next = state.clone();
    DashboardReducer.reduce(&mut next, action, env);
    next
}
