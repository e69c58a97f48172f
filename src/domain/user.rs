//! User entity.

use crate::domain::Id;

/// A registered user.
///
/// ## Invariants
/// - `email` is unique across all users (store-enforced).
/// - `id` is absent until the entity has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<Id>,
    pub name: String,
    pub last_name: String,
    /// Login identity; the only alternate lookup key.
    pub email: String,
    /// Transient auth token; never persisted.
    pub token: Option<String>,
}
