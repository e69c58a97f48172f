//! Opaque entity identifier.
//!
//! Decouples the domain model from the store's native ID encoding: the rest
//! of the domain only ever sees an [`Id`] and its canonical string form.

use std::fmt;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Error returned when an externally supplied string is not a valid
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier {value:?}: {message}")]
pub struct IdParseError {
    /// The rejected input.
    pub value: String,
    /// What the underlying decoder objected to.
    pub message: String,
}

/// Opaque, string-representable handle to a persisted entity.
///
/// ## Invariants
/// - The canonical form is 24 lowercase hex characters.
/// - Two identifiers are equal iff their canonical forms match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(ObjectId);

impl Id {
    /// Wrap a store-native identifier, e.g. one produced by an insert.
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Parse an externally supplied string, e.g. a GraphQL argument.
    ///
    /// Yields the same value as [`Id::from_object_id`] for the same logical
    /// identifier.
    pub fn parse(value: &str) -> Result<Self, IdParseError> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|err| IdParseError {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// The store-native form, for query construction in adapters.
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for Id {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}
