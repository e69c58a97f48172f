//! Port for user persistence adapters.

use async_trait::async_trait;

use crate::domain::{Id, User};

use super::StoreError;

/// User storage and retrieval.
///
/// `insert` relies on the store's unique email constraint: a duplicate
/// registration fails with [`StoreError::AlreadyExists`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the store-generated identifier.
    async fn insert(&self, user: &User) -> Result<Id, StoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &Id) -> Result<Option<User>, StoreError>;

    /// Fetch a user by email, the alternate lookup key.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Delete the user registered under `email`.
    async fn delete_by_email(&self, email: &str) -> Result<(), StoreError>;

    /// List users in insertion order, skipping `start` records.
    ///
    /// `limit == 0` returns all remaining records.
    async fn list(&self, start: u64, limit: i64) -> Result<Vec<User>, StoreError>;

    /// Fetch every user whose identifier is in `ids`.
    ///
    /// An empty `ids` yields an empty result without touching the store.
    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<User>, StoreError>;
}
