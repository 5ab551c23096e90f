//! Derived statistics over a state snapshot.
//!
//! Every function here is a pure read-only query. Nothing is cached or
//! stored; callers recompute after each transition.

use crate::types::{AppState, Client, ClientId, Money, Payment, Project, ProjectId};
use serde::{Deserialize, Serialize};

/// Fallback label shown when a project points at an unknown client
pub const CLIENT_NOT_FOUND: &str = "Client not found";

/// Paid versus unpaid project counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCounts {
    /// Projects flagged paid
    pub paid: usize,
    /// Projects flagged unpaid
    pub unpaid: usize,
}

/// Headline figures for the dashboard cards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of projects
    pub total_projects: usize,
    /// Projects flagged paid
    pub paid_projects: usize,
    /// Projects flagged unpaid
    pub unpaid_projects: usize,
    /// Number of clients
    pub total_clients: usize,
    /// Sum of every recorded payment
    pub total_revenue: Money,
}

impl DashboardStats {
    /// Share of paid projects as a whole percentage, 0 with no projects
    #[must_use]
    pub const fn paid_percentage(&self) -> usize {
        rounded_percentage(self.paid_projects, self.total_projects)
    }

    /// Share of unpaid projects as a whole percentage, 0 with no projects
    #[must_use]
    pub const fn unpaid_percentage(&self) -> usize {
        rounded_percentage(self.unpaid_projects, self.total_projects)
    }
}

/// `part / total` as a percentage rounded half up
const fn rounded_percentage(part: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (part * 200 + total) / (total * 2)
}

/// Counts projects by payment status in a single pass
#[must_use]
pub fn count_payment_status(projects: &[Project]) -> PaymentCounts {
    projects
        .iter()
        .fold(PaymentCounts::default(), |mut counts, project| {
            if project.is_paid() {
                counts.paid += 1;
            } else {
                counts.unpaid += 1;
            }
            counts
        })
}

/// Computes the dashboard headline figures
///
/// Revenue is the sum of every payment, whether or not the project it
/// references exists or is flagged paid.
#[must_use]
pub fn calculate_dashboard_stats(state: &AppState) -> DashboardStats {
    let PaymentCounts { paid, unpaid } = count_payment_status(&state.projects);
    let total_revenue = state.payments.iter().map(|p| p.amount).sum();

    DashboardStats {
        total_projects: state.projects.len(),
        paid_projects: paid,
        unpaid_projects: unpaid,
        total_clients: state.clients.len(),
        total_revenue,
    }
}

/// Returns the first client with the id
#[must_use]
pub fn find_client_by_id<'a>(clients: &'a [Client], client_id: &ClientId) -> Option<&'a Client> {
    clients.iter().find(|client| &client.id == client_id)
}

/// Returns the client's name, or [`CLIENT_NOT_FOUND`]
#[must_use]
pub fn client_name<'a>(clients: &'a [Client], client_id: &ClientId) -> &'a str {
    find_client_by_id(clients, client_id).map_or(CLIENT_NOT_FOUND, |client| client.name.as_str())
}

/// Returns the client's projects in list order
#[must_use]
pub fn projects_by_client_id<'a>(projects: &'a [Project], client_id: &ClientId) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| &project.client_id == client_id)
        .collect()
}

/// Sums revenue for a client, counting at most one payment per project
///
/// For each of the client's projects only the first payment in list order
/// is counted. Later payments for the same project are ignored.
#[must_use]
pub fn client_revenue(client_id: &ClientId, projects: &[Project], payments: &[Payment]) -> Money {
    projects
        .iter()
        .filter(|project| &project.client_id == client_id)
        .filter_map(|project| payment_by_project_id(&project.id, payments))
        .map(|payment| payment.amount)
        .sum()
}

/// Checks if any payment references the project
#[must_use]
pub fn has_payment(project_id: &ProjectId, payments: &[Payment]) -> bool {
    payments.iter().any(|payment| &payment.project_id == project_id)
}

/// Returns the first payment referencing the project
#[must_use]
pub fn payment_by_project_id<'a>(project_id: &ProjectId, payments: &'a [Payment]) -> Option<&'a Payment> {
    payments.iter().find(|payment| &payment.project_id == project_id)
}
