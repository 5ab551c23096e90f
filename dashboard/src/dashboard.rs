//! The dashboard handle injected into every consumer.
//!
//! `Dashboard` owns the store holding the application snapshot. Cloning it
//! is cheap and every clone sees the same state, so views receive a handle
//! instead of reaching for a global.

use crate::payments::{PaymentError, record_payment};
use crate::reducer::{DashboardEnvironment, DashboardReducer};
use crate::stats::{DashboardStats, calculate_dashboard_stats};
use crate::types::{AppAction, AppState, Money, Payment, ProjectId, ProjectStatus};
use freelance_core::reducer::Transition;
use freelance_runtime::{Store, StoreConfig};
use tokio::sync::broadcast;

/// The store type behind a [`Dashboard`]
pub type DashboardStore = Store<AppState, AppAction, DashboardEnvironment, DashboardReducer>;

/// Owned handle to the dashboard state
#[derive(Clone)]
pub struct Dashboard {
    store: DashboardStore,
}

impl Dashboard {
    /// Creates a dashboard over an initial snapshot
    #[must_use]
    pub fn new(initial: AppState, env: DashboardEnvironment) -> Self {
        Self::with_config(initial, env, StoreConfig::default())
    }

    /// Creates a dashboard with custom store settings
    #[must_use]
    pub fn with_config(initial: AppState, env: DashboardEnvironment, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(initial, DashboardReducer::new(), env, config),
        }
    }

    /// Sends any action through the reducer
    pub async fn dispatch(&self, action: AppAction) -> Transition {
        tracing::debug!(action = action.kind(), "Dispatching action");
        self.store.send(action).await
    }

    /// Records a payment and flags the project paid, without any checks
    ///
    /// Unknown projects, already-paid projects and non-positive amounts are
    /// all accepted; repeating the call appends another payment.
    pub async fn force_mark_paid(&self, project_id: impl Into<ProjectId>, amount: Money) -> Transition {
        self.dispatch(AppAction::MarkProjectPaid {
            project_id: project_id.into(),
            amount,
        })
        .await
    }

    /// Records a payment only if it is positive and the project has none yet
    ///
    /// The check and the transition happen under the same store lock. The
    /// returned payment is the record the reducer appended, so its date is
    /// the one stored in state.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] when validation fails. The state is left
    /// untouched in that case.
    pub async fn record_payment_validated(
        &self,
        project_id: impl Into<ProjectId>,
        amount: Money,
    ) -> Result<Payment, PaymentError> {
        let project_id = project_id.into();
        let clock = &self.store.environment().clock;

        self.store
            .send_if(|state| {
                record_payment(&project_id, amount, &state.payments, clock.as_ref()).map(|validated| {
                    let action = AppAction::MarkProjectPaid {
                        project_id: project_id.clone(),
                        amount,
                    };
                    // MarkProjectPaid always appends, so the last record is ours
                    let receipt = move |after: &AppState| {
                        after.payments.last().cloned().unwrap_or(validated)
                    };
                    (action, receipt)
                })
            })
            .await
    }

    /// Changes a project's work status; unknown ids leave state unchanged
    pub async fn update_project_status(
        &self,
        project_id: impl Into<ProjectId>,
        status: ProjectStatus,
    ) -> Transition {
        self.dispatch(AppAction::UpdateProjectStatus {
            project_id: project_id.into(),
            status,
        })
        .await
    }

    /// The current snapshot
    pub async fn snapshot(&self) -> AppState {
        self.store.snapshot().await
    }

    /// Headline figures for the current snapshot
    pub async fn stats(&self) -> DashboardStats {
        self.store.state(calculate_dashboard_stats).await
    }

    /// Snapshots published after every applied transition
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AppState> {
        self.store.subscribe()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &DashboardStore {
        &self.store
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard").finish_non_exhaustive()
    }
}
