//! Freelance business dashboard.
//!
//! Clients, their projects and the payments received for them live in a
//! single immutable [`AppState`] snapshot. Two actions change it
//! (`MarkProjectPaid` and `UpdateProjectStatus`); everything the views show
//! is derived from the current snapshot by the pure functions in [`stats`]
//! and [`query`].
//!
//! # Quick Start
//!
//! ```no_run
//! use freelance_core::environment::SystemClock;
//! use freelance_dashboard::{Dashboard, DashboardEnvironment, Money, seed};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = DashboardEnvironment::new(Arc::new(SystemClock));
//! let dashboard = Dashboard::new(seed::mock_state(), env);
//!
//! // Strict path: refuses duplicates and non-positive amounts
//! let payment = dashboard
//!     .record_payment_validated("2", Money::from_dollars(8000))
//!     .await?;
//! println!("Recorded {} on {}", payment.amount, payment.date);
//!
//! let stats = dashboard.stats().await;
//! println!("Revenue: {}", stats.total_revenue);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod format;
pub mod payments;
pub mod query;
pub mod reducer;
pub mod seed;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use dashboard::{Dashboard, DashboardStore};
pub use payments::{PaymentError, record_payment};
pub use query::{ProjectFilter, SearchItem, Searchable, filter_projects, search_items};
pub use reducer::{DashboardEnvironment, DashboardReducer, apply};
pub use stats::{DashboardStats, PaymentCounts};
pub use types::{
    AppAction, AppState, Client, ClientId, Money, MoneyError, Payment, PaymentStatus, Project,
    ProjectId, ProjectStatus,
};
