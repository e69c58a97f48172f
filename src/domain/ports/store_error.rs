//! Error type shared by all repository ports.

/// Failures surfaced by data-access adapters.
///
/// Adapters never retry internally; retry policy is a caller concern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store connection is not open or could not be established.
    #[error("store connection failed: {message}")]
    Connection { message: String },

    /// Query or command failed during execution.
    #[error("store query failed: {message}")]
    Query { message: String },

    /// A stored or supplied identifier is malformed.
    #[error("invalid identifier: {value}")]
    InvalidId { value: String },

    /// The update/delete target does not exist.
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// Unique-key violation on insert.
    #[error("user {email} already exists")]
    AlreadyExists { email: String },

    /// A foreign identifier points at a non-existent entity.
    #[error("dangling {entity} reference {id}")]
    InvalidReference { entity: &'static str, id: String },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create an invalid-identifier error for the given input.
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }

    /// Create a not-found error for the given entity and key.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Create a duplicate-registration error for the given email.
    pub fn already_exists(email: impl Into<String>) -> Self {
        Self::AlreadyExists {
            email: email.into(),
        }
    }

    /// Create a dangling-reference error for the given entity and id.
    pub fn invalid_reference(entity: &'static str, id: impl Into<String>) -> Self {
        Self::InvalidReference {
            entity,
            id: id.into(),
        }
    }
}
