//! Document-store record models and their domain conversions.
//!
//! Records are the on-disk shape of an entity, distinct from the domain
//! entity. Conversions are side-effect-free: decoding a record never issues
//! a query, and entity references stay bare foreign identifiers.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::{Customer, Id, Project, User};

/// `users` collection record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct UserRecord {
    /// Omitted on insert so the store generates it.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl UserRecord {
    pub fn from_model(user: &User) -> Self {
        Self {
            id: user.id.map(|id| id.as_object_id()),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn into_model(self) -> User {
        User {
            id: self.id.map(Id::from_object_id),
            name: self.name,
            last_name: self.last_name,
            email: self.email,
            // The token is transient and never stored.
            token: None,
        }
    }
}

/// `projects` collection record.
///
/// Owner and customer are flattened to bare foreign identifiers; decoding
/// yields a project carrying only those `Id`s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ProjectRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    /// Stored at the driver's millisecond precision.
    pub created_at: bson::DateTime,
    pub owner_id: ObjectId,
    pub customer_id: ObjectId,
}

impl ProjectRecord {
    pub fn from_model(project: &Project) -> Self {
        Self {
            id: project.id.map(|id| id.as_object_id()),
            name: project.name.clone(),
            description: project.description.clone(),
            created_at: bson::DateTime::from_chrono(project.created_at),
            owner_id: project.owner_id.as_object_id(),
            customer_id: project.customer_id.as_object_id(),
        }
    }

    pub fn into_model(self) -> Project {
        Project {
            id: self.id.map(Id::from_object_id),
            name: self.name,
            description: self.description,
            created_at: self.created_at.to_chrono(),
            owner_id: Id::from_object_id(self.owner_id),
            customer_id: Id::from_object_id(self.customer_id),
        }
    }
}

/// `customers` collection record.
///
/// The `projects` field holds foreign project identifiers, not embedded
/// projects; dereferencing is an explicit call the caller makes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct CustomerRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub cuit: String,
    pub projects: Vec<ObjectId>,
}

impl CustomerRecord {
    pub fn from_model(customer: &Customer) -> Self {
        Self {
            id: customer.id.map(|id| id.as_object_id()),
            name: customer.name.clone(),
            cuit: customer.cuit.clone(),
            projects: customer
                .project_ids
                .iter()
                .map(|id| id.as_object_id())
                .collect(),
        }
    }

    pub fn into_model(self) -> Customer {
        Customer {
            id: self.id.map(Id::from_object_id),
            name: self.name,
            cuit: self.cuit,
            project_ids: self.projects.into_iter().map(Id::from_object_id).collect(),
        }
    }
}
