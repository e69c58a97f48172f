//! Shared MongoDB handle for the persistence adapters.
//!
//! One client is created at process startup and shared by every repository
//! implementation; there are no per-request transactions. The driver manages
//! its own connection pooling underneath the single handle.

use bson::doc;
use bson::oid::ObjectId;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::domain::ports::StoreError;

use super::error_mapping::map_mongo_error;
use super::records::{CustomerRecord, ProjectRecord, UserRecord};

/// `users` collection name.
pub(super) const USERS: &str = "users";
/// `projects` collection name.
pub(super) const PROJECTS: &str = "projects";
/// `customers` collection name.
pub(super) const CUSTOMERS: &str = "customers";

/// Connection settings for [`MongoStore::connect`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
}

impl StoreConfig {
    /// Create a configuration from a connection URI and database name.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    /// The connection URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The database name.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// MongoDB-backed store shared by the repository adapters.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] when the URI is malformed or the
    /// client cannot be constructed.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.uri())
            .await
            .map_err(map_mongo_error)?;
        let db = client.database(config.database());
        Ok(Self { db })
    }

    /// Create the indexes the data model relies on: the unique user email
    /// constraint and the unique project name per owner.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await
            .map_err(map_mongo_error)?;

        self.projects()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1, "owner_id": 1 })
                    .options(unique)
                    .build(),
            )
            .await
            .map_err(map_mongo_error)?;

        Ok(())
    }

    pub(super) fn users(&self) -> Collection<UserRecord> {
        self.db.collection(USERS)
    }

    pub(super) fn projects(&self) -> Collection<ProjectRecord> {
        self.db.collection(PROJECTS)
    }

    pub(super) fn customers(&self) -> Collection<CustomerRecord> {
        self.db.collection(CUSTOMERS)
    }

    /// Existence probe used for referential validation before inserts.
    pub(super) async fn exists(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<bool, StoreError> {
        let count = self
            .db
            .collection::<bson::Document>(collection)
            .count_documents(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)?;
        Ok(count > 0)
    }
}
