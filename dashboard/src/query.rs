//! Search and filtering over clients and projects.

use crate::types::{Client, PaymentStatus, Project, ProjectStatus};

/// A record that can appear in search results
///
/// Each variant names the field that search matches against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchItem<'a> {
    /// Matched by name
    Client(&'a Client),
    /// Matched by title
    Project(&'a Project),
}

impl<'a> SearchItem<'a> {
    /// The text search matches against
    #[must_use]
    pub fn label(&self) -> &'a str {
        match self {
            Self::Client(client) => &client.name,
            Self::Project(project) => &project.title,
        }
    }
}

/// Records that can be searched
pub trait Searchable {
    /// Wraps the record in its search variant
    fn as_search_item(&self) -> SearchItem<'_>;
}

impl Searchable for Client {
    fn as_search_item(&self) -> SearchItem<'_> {
        SearchItem::Client(self)
    }
}

impl Searchable for Project {
    fn as_search_item(&self) -> SearchItem<'_> {
        SearchItem::Project(self)
    }
}

/// Case-insensitive substring search on client names or project titles
///
/// An empty query matches everything. Input order is preserved.
#[must_use]
pub fn search_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.as_search_item()
                .label()
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Optional constraints on projects; unset fields match anything
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Required work status
    pub status: Option<ProjectStatus>,
    /// Required payment status
    pub payment_status: Option<PaymentStatus>,
}

impl ProjectFilter {
    /// A filter that matches every project
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            payment_status: None,
        }
    }

    /// Require a work status
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require a payment status
    #[must_use]
    pub const fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    /// Checks if the project satisfies every set constraint
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.status.is_none_or(|status| project.status == status)
            && self
                .payment_status
                .is_none_or(|payment_status| project.payment_status == payment_status)
    }
}

/// Projects matching every constraint of the filter, in input order
#[must_use]
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects.iter().filter(|project| filter.matches(project)).collect()
}

/// The project list view: filter plus an optional title search
#[must_use]
pub fn query_projects<'a>(
    projects: &'a [Project],
    filter: &ProjectFilter,
    search: Option<&str>,
) -> Vec<&'a Project> {
    let needle = search.map(str::to_lowercase);
    projects
        .iter()
        .filter(|project| filter.matches(project))
        .filter(|project| {
            needle
                .as_deref()
                .is_none_or(|needle| project.title.to_lowercase().contains(needle))
        })
        .collect()
}
