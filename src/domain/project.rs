//! Project entity.

use chrono::{DateTime, Utc};

use crate::domain::Id;

/// A project owned by a user and billed to a customer.
///
/// ## Invariants
/// - `owner_id` and `customer_id` are foreign identifiers, never embedded
///   copies; callers resolve the full entities through the data-access layer.
/// - `id` is absent until the entity has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Option<Id>,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: Id,
    pub customer_id: Id,
}

/// Identifiers of the given projects, skipping any unsaved entries.
pub fn ids_of(projects: &[Project]) -> Vec<Id> {
    projects.iter().filter_map(|project| project.id).collect()
}
