//! Seed data loaded once at startup.
//!
//! The built-in dataset is the one the dashboard ships with. A JSON file
//! with the same `{ clients, projects, payments }` shape can replace it.
//! Integrity problems in seed data are reported, never repaired.

use crate::types::{
    AppState, Client, ClientId, Money, Payment, PaymentStatus, Project, ProjectId, ProjectStatus,
};
use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading seed data
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a valid state document
    #[error("Failed to parse seed file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// A reference or uniqueness problem found in seed data
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedIssue {
    /// Two clients share an id
    DuplicateClientId(ClientId),
    /// Two projects share an id
    DuplicateProjectId(ProjectId),
    /// A project references a client that does not exist
    UnknownClient {
        /// The referencing project
        project_id: ProjectId,
        /// The missing client
        client_id: ClientId,
    },
    /// A payment references a project that does not exist
    UnknownProject(ProjectId),
}

impl std::fmt::Display for SeedIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateClientId(id) => write!(f, "duplicate client id {id}"),
            Self::DuplicateProjectId(id) => write!(f, "duplicate project id {id}"),
            Self::UnknownClient {
                project_id,
                client_id,
            } => write!(f, "project {project_id} references unknown client {client_id}"),
            Self::UnknownProject(id) => write!(f, "payment references unknown project {id}"),
        }
    }
}

/// The dataset the dashboard starts with when no seed file is configured
#[must_use]
pub fn mock_state() -> AppState {
    let clients = vec![
        Client::new("1", "Shemsa Co", "Rwanda").with_email("contact@shem.com"),
        Client::new("2", "NewTech", "DRC").with_email("newteach@gmail.com"),
    ];

    let projects = vec![
        Project::new("1", "1", "E-commerce Website", Money::from_dollars(5000))
            .with_status(ProjectStatus::Completed)
            .with_payment_status(PaymentStatus::Paid),
        Project::new("2", "2", "Mobile App Development", Money::from_dollars(8000))
            .with_status(ProjectStatus::InProgress),
    ];

    let payments = Utc
        .with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
        .single()
        .map(|date| Payment::new("1", Money::from_dollars(5000), date))
        .into_iter()
        .collect();

    AppState::new(clients, projects, payments)
}

/// Parses a seed document
///
/// # Errors
///
/// Returns the `serde_json` error if the document is not a valid state.
pub fn parse_seed(json: &str) -> Result<AppState, serde_json::Error> {
    serde_json::from_str(json)
}

/// Loads a seed file and logs any integrity issue it contains
///
/// # Errors
///
/// Returns [`SeedError::Io`] if the file cannot be read and
/// [`SeedError::Parse`] if it is not a valid state document.
pub fn load_seed(path: &Path) -> Result<AppState, SeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let state = parse_seed(&json).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for issue in check_integrity(&state) {
        tracing::warn!(path = %path.display(), "Seed integrity: {issue}");
    }

    tracing::info!(
        path = %path.display(),
        clients = state.clients.len(),
        projects = state.projects.len(),
        payments = state.payments.len(),
        "Loaded seed data"
    );

    Ok(state)
}

/// Lists uniqueness and reference problems, in collection order
#[must_use]
pub fn check_integrity(state: &AppState) -> Vec<SeedIssue> {
    let mut issues = Vec::new();

    let mut client_ids = HashSet::new();
    for client in state.clients.iter() {
        if !client_ids.insert(&client.id) {
            issues.push(SeedIssue::DuplicateClientId(client.id.clone()));
        }
    }

    let mut project_ids = HashSet::new();
    for project in state.projects.iter() {
        if !project_ids.insert(&project.id) {
            issues.push(SeedIssue::DuplicateProjectId(project.id.clone()));
        }
        if !client_ids.contains(&project.client_id) {
            issues.push(SeedIssue::UnknownClient {
                project_id: project.id.clone(),
                client_id: project.client_id.clone(),
            });
        }
    }

    for payment in state.payments.iter() {
        if !project_ids.contains(&payment.project_id) {
            issues.push(SeedIssue::UnknownProject(payment.project_id.clone()));
        }
    }

    issues
}
