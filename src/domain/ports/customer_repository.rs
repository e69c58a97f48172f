//! Port for customer persistence adapters.

use async_trait::async_trait;

use crate::domain::{Customer, Id};

use super::StoreError;

/// Customer storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer and return the store-generated identifier.
    async fn insert(&self, customer: &Customer) -> Result<Id, StoreError>;

    /// Fetch a customer by identifier.
    async fn find_by_id(&self, id: &Id) -> Result<Option<Customer>, StoreError>;

    /// List all customers in insertion order.
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError>;

    /// Fetch every customer whose identifier is in `ids`.
    ///
    /// An empty `ids` yields an empty result without touching the store.
    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<Customer>, StoreError>;

    /// Replace the stored record for `customer.id` wholesale.
    ///
    /// Fails with [`StoreError::NotFound`] when no record matched.
    async fn replace(&self, customer: &Customer) -> Result<(), StoreError>;

    /// Delete a single customer; [`StoreError::NotFound`] when absent.
    async fn delete(&self, id: &Id) -> Result<(), StoreError>;

    /// Delete every customer whose identifier is in `ids`, returning the
    /// number of records removed. An empty `ids` is a no-op.
    async fn delete_many(&self, ids: &[Id]) -> Result<u64, StoreError>;
}
