//! Domain types for the freelance dashboard.
//!
//! Three flat collections make up the whole application state: clients,
//! the projects done for them, and the payments received for those
//! projects. Records are plain values; references between them are by id
//! and are not enforced.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Unique identifier for a client
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a `ClientId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a project
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a `ProjectId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Money amount in cents (avoids floating point issues)
///
/// Signed, so that invalid non-positive amounts can still be represented
/// and rejected by validation. Serialises as a number of currency units
/// (`5000`, `12.5`) to match the seed data format.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

/// Largest magnitude, in cents, that survives the trip through `f64`
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// Reasons a number of currency units is not a valid [`Money`] amount
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MoneyError {
    /// NaN or infinite
    #[error("Amount is not a finite number")]
    NotFinite,

    /// Too large to hold exactly in cents
    #[error("Amount {units} is out of range")]
    OutOfRange {
        /// The rejected amount
        units: f64,
    },

    /// Has a fraction of a cent
    #[error("Amount {units} has a fraction of a cent")]
    SubCent {
        /// The rejected amount
        units: f64,
    },
}

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a new `Money` amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` amount from whole currency units
    #[must_use]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Checks if this amount is strictly greater than zero
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyError;

    #[allow(clippy::cast_possible_truncation)] // Range checked above the cast
    fn try_from(units: f64) -> Result<Self, Self::Error> {
        if !units.is_finite() {
            return Err(MoneyError::NotFinite);
        }

        let cents = units * 100.0;
        if cents.abs() > MAX_EXACT_CENTS {
            return Err(MoneyError::OutOfRange { units });
        }

        // Decimal inputs such as 0.1 are off by a few ulps once scaled
        let whole = cents.round();
        if (cents - whole).abs() > cents.abs().max(1.0) * f64::EPSILON * 4.0 {
            return Err(MoneyError::SubCent { units });
        }

        Ok(Self(whole as i64))
    }
}

impl From<Money> for f64 {
    #[allow(clippy::cast_precision_loss)] // Amounts stay far below 2^52 cents
    fn from(money: Money) -> Self {
        money.0 as f64 / 100.0
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = (abs / 100).to_formatted_string(&Locale::en);

        match abs % 100 {
            0 => write!(f, "{sign}${units}"),
            cents => write!(f, "{sign}${units}.{cents:02}"),
        }
    }
}

/// A client the freelancer works for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Country of residence
    pub country: String,
    /// Contact email, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Client {
    /// Creates a client without an email address
    #[must_use]
    pub fn new(id: impl Into<ClientId>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            email: None,
        }
    }

    /// Sets the contact email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Work progress of a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Not started
    Pending,
    /// Being worked on
    InProgress,
    /// Delivered
    Completed,
}

impl ProjectStatus {
    /// All statuses in display order
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// The wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a project has been paid for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment received
    Paid,
    /// Payment outstanding
    Unpaid,
}

impl PaymentStatus {
    /// The wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of work done for a client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Owning client (not checked to exist)
    pub client_id: ClientId,
    /// Display title
    pub title: String,
    /// Agreed budget
    pub budget: Money,
    /// Work progress
    pub status: ProjectStatus,
    /// Payment progress
    pub payment_status: PaymentStatus,
}

impl Project {
    /// Creates a pending, unpaid project
    #[must_use]
    pub fn new(
        id: impl Into<ProjectId>,
        client_id: impl Into<ClientId>,
        title: impl Into<String>,
        budget: Money,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            title: title.into(),
            budget,
            status: ProjectStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
        }
    }

    /// Returns a copy with the given work status
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy with the given payment status
    #[must_use]
    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Checks if the project is marked paid
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// A payment received for a project
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// The project paid for (not checked to exist)
    pub project_id: ProjectId,
    /// Amount received
    pub amount: Money,
    /// When the payment was recorded
    pub date: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment record
    #[must_use]
    pub fn new(project_id: impl Into<ProjectId>, amount: Money, date: DateTime<Utc>) -> Self {
        Self {
            project_id: project_id.into(),
            amount,
            date,
        }
    }
}

/// The full application snapshot
///
/// Collections are shared slices: cloning a state is cheap, and a
/// transition that rewrites one collection leaves the others pointing at
/// the same storage as the previous snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// All clients, in insertion order
    pub clients: Arc<[Client]>,
    /// All projects, in insertion order
    pub projects: Arc<[Project]>,
    /// All payments, in insertion order
    pub payments: Arc<[Payment]>,
}

impl AppState {
    /// Creates a state from owned collections
    #[must_use]
    pub fn new(clients: Vec<Client>, projects: Vec<Project>, payments: Vec<Payment>) -> Self {
        Self {
            clients: clients.into(),
            projects: projects.into(),
            payments: payments.into(),
        }
    }

    /// Checks if every collection is the very same storage as in `other`
    ///
    /// This is the referential equality of two snapshots, stronger than `==`.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.clients, &other.clients)
            && Arc::ptr_eq(&self.projects, &other.projects)
            && Arc::ptr_eq(&self.payments, &other.payments)
    }

    /// Returns a project by id
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }
}

/// Every state transition the dashboard can be asked to perform
///
/// Serialises in the tagged `{ "type": ..., "payload": ... }` shape, e.g.
/// `{"type":"MARK_PROJECT_PAID","payload":{"projectId":"2","amount":8000}}`.
///
/// Only `MarkProjectPaid` and `UpdateProjectStatus` change state; the rest
/// are accepted and absorbed as no-ops by the reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppAction {
    /// Append a ready-made payment record
    AddPayment(Payment),

    /// Record a payment for a project and flag it paid, without validation
    #[serde(rename_all = "camelCase")]
    MarkProjectPaid {
        /// Project being paid
        project_id: ProjectId,
        /// Amount received
        amount: Money,
    },

    /// Add a client
    AddClient(Client),

    /// Add a project
    AddProject(Project),

    /// Change the work status of a project
    #[serde(rename_all = "camelCase")]
    UpdateProjectStatus {
        /// Project to update
        project_id: ProjectId,
        /// New status
        status: ProjectStatus,
    },

    /// Remove a client
    #[serde(rename_all = "camelCase")]
    DeleteClient {
        /// Client to remove
        client_id: ClientId,
    },

    /// Remove a project
    #[serde(rename_all = "camelCase")]
    DeleteProject {
        /// Project to remove
        project_id: ProjectId,
    },
}

impl AppAction {
    /// The wire tag of the action
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddPayment(_) => "ADD_PAYMENT",
            Self::MarkProjectPaid { .. } => "MARK_PROJECT_PAID",
            Self::AddClient(_) => "ADD_CLIENT",
            Self::AddProject(_) => "ADD_PROJECT",
            Self::UpdateProjectStatus { .. } => "UPDATE_PROJECT_STATUS",
            Self::DeleteClient { .. } => "DELETE_CLIENT",
            Self::DeleteProject { .. } => "DELETE_PROJECT",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn money_display_groups_thousands() {
        assert_eq!(Money::from_dollars(5000).to_string(), "$5,000");
        assert_eq!(Money::from_dollars(1_234_567).to_string(), "$1,234,567");
        assert_eq!(Money::from_dollars(999).to_string(), "$999");
        assert_eq!(Money::from_cents(123_450).to_string(), "$1,234.50");
        assert_eq!(Money::from_dollars(-5).to_string(), "-$5");
        assert_eq!(Money::ZERO.to_string(), "$0");
    }

    #[test]
    fn money_serialises_as_units() {
        assert_eq!(serde_json::to_value(Money::from_dollars(5000)).unwrap(), json!(5000.0));
        let parsed: Money = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(parsed, Money::from_cents(1250));
        let parsed: Money = serde_json::from_value(json!(8000)).unwrap();
        assert_eq!(parsed, Money::from_dollars(8000));
    }

    #[test]
    fn money_from_units_is_exact() {
        assert_eq!(Money::try_from(0.1), Ok(Money::from_cents(10)));
        assert_eq!(Money::try_from(1234.56), Ok(Money::from_cents(123_456)));
        assert_eq!(Money::try_from(-5.0), Ok(Money::from_dollars(-5)));
        assert_eq!(Money::try_from(0.0), Ok(Money::ZERO));
    }

    #[test]
    fn money_rejects_sub_cent_amounts() {
        assert_eq!(
            Money::try_from(0.004),
            Err(MoneyError::SubCent { units: 0.004 })
        );
        assert!(matches!(Money::try_from(12.345), Err(MoneyError::SubCent { .. })));
    }

    #[test]
    fn money_rejects_non_finite_amounts() {
        assert_eq!(Money::try_from(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(Money::try_from(f64::INFINITY), Err(MoneyError::NotFinite));
        assert_eq!(Money::try_from(f64::NEG_INFINITY), Err(MoneyError::NotFinite));
    }

    #[test]
    fn money_rejects_out_of_range_amounts() {
        assert!(matches!(Money::try_from(1e17), Err(MoneyError::OutOfRange { .. })));
        assert!(matches!(Money::try_from(-1e300), Err(MoneyError::OutOfRange { .. })));
    }

    #[test]
    fn action_with_sub_cent_amount_fails_to_parse() {
        let result: Result<AppAction, _> = serde_json::from_value(json!({
            "type": "MARK_PROJECT_PAID",
            "payload": { "projectId": "2", "amount": 0.004 }
        }));

        let error = result.unwrap_err().to_string();
        assert!(error.contains("fraction of a cent"), "{error}");
    }

    #[test]
    fn money_sum() {
        let total: Money = [Money::from_dollars(5000), Money::from_dollars(13000)].iter().sum();
        assert_eq!(total, Money::from_dollars(18000));
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::from_dollars(-5).is_positive());
    }

    #[test]
    fn project_wire_format() {
        let project = Project::new("1", "1", "E-commerce Website", Money::from_dollars(5000))
            .with_status(ProjectStatus::InProgress);

        let value = serde_json::to_value(&project).unwrap();

        assert_eq!(value["clientId"], "1");
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["paymentStatus"], "unpaid");
    }

    #[test]
    fn client_email_is_optional() {
        let client: Client =
            serde_json::from_value(json!({"id": "3", "name": "Acme", "country": "Kenya"})).unwrap();
        assert_eq!(client.email, None);
        assert!(serde_json::to_value(&client).unwrap().get("email").is_none());
    }

    #[test]
    fn action_wire_format() {
        let action: AppAction = serde_json::from_value(json!({
            "type": "MARK_PROJECT_PAID",
            "payload": { "projectId": "2", "amount": 8000 }
        }))
        .unwrap();

        assert_eq!(
            action,
            AppAction::MarkProjectPaid {
                project_id: "2".into(),
                amount: Money::from_dollars(8000),
            }
        );
        assert_eq!(action.kind(), "MARK_PROJECT_PAID");

        let value = serde_json::to_value(AppAction::DeleteClient {
            client_id: "1".into(),
        })
        .unwrap();
        assert_eq!(value, json!({"type": "DELETE_CLIENT", "payload": {"clientId": "1"}}));
    }

    #[test]
    fn payment_date_parses_millisecond_iso() {
        let payment: Payment = serde_json::from_value(json!({
            "projectId": "1",
            "amount": 5000,
            "date": "2024-01-15T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(payment.date.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn state_clone_shares_storage() {
        let state = AppState::new(vec![Client::new("1", "Acme", "Kenya")], vec![], vec![]);
        let copy = state.clone();
        assert!(copy.shares_storage_with(&state));

        let rebuilt = AppState::new(state.clients.to_vec(), vec![], vec![]);
        assert_eq!(rebuilt, state);
        assert!(!rebuilt.shares_storage_with(&state));
    }
}
