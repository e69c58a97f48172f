//! Persistence adapters for the repository ports.

mod client;
mod customers;
mod error_mapping;
mod memory;
mod projects;
mod records;
mod users;

pub use client::{MongoStore, StoreConfig};
pub use memory::MemoryStore;

use crate::domain::Id;
use crate::domain::ports::StoreError;

/// Extract the store-generated identifier from an insert result.
fn inserted_id(inserted: bson::Bson) -> Result<Id, StoreError> {
    inserted
        .as_object_id()
        .map(Id::from_object_id)
        .ok_or_else(|| StoreError::query("store returned a non-ObjectId insert id"))
}
