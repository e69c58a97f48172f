//! Port for project persistence adapters.

use async_trait::async_trait;

use crate::domain::{Id, Project};

use super::StoreError;

/// Project storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a new project and return the store-generated identifier.
    ///
    /// The referenced owner and customer are existence-probed first; a
    /// dangling reference fails with [`StoreError::InvalidReference`] and
    /// nothing is persisted. The probe and the insert are not transactional.
    async fn insert(&self, project: &Project) -> Result<Id, StoreError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: &Id) -> Result<Option<Project>, StoreError>;

    /// List projects in insertion order, skipping `start` records.
    ///
    /// `limit == 0` returns all remaining records.
    async fn list(&self, start: u64, limit: i64) -> Result<Vec<Project>, StoreError>;

    /// Fetch every project owned by the given user.
    async fn find_by_owner(&self, owner_id: &Id) -> Result<Vec<Project>, StoreError>;

    /// Fetch every project billed to the given customer.
    async fn find_by_customer(&self, customer_id: &Id) -> Result<Vec<Project>, StoreError>;

    /// Fetch every project whose identifier is in `ids`.
    ///
    /// An empty `ids` yields an empty result without touching the store.
    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<Project>, StoreError>;

    /// Replace the stored record for `project.id` wholesale.
    ///
    /// Fails with [`StoreError::NotFound`] when no record matched.
    async fn replace(&self, project: &Project) -> Result<(), StoreError>;

    /// Delete a single project; [`StoreError::NotFound`] when absent.
    async fn delete(&self, id: &Id) -> Result<(), StoreError>;

    /// Delete every project whose identifier is in `ids`, returning the
    /// number of records removed. An empty `ids` is a no-op.
    async fn delete_many(&self, ids: &[Id]) -> Result<u64, StoreError>;
}
