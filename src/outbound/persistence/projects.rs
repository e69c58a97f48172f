//! MongoDB-backed [`ProjectRepository`] implementation.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use tracing::info;

use crate::domain::ports::{ProjectRepository, StoreError};
use crate::domain::{Id, Project};

use super::client::{CUSTOMERS, MongoStore, USERS};
use super::error_mapping::map_mongo_error;
use super::inserted_id;
use super::records::ProjectRecord;

#[async_trait]
impl ProjectRepository for MongoStore {
    async fn insert(&self, project: &Project) -> Result<Id, StoreError> {
        // Referential validation is a best-effort probe; there is no
        // transaction spanning the probe and the insert.
        let owner = project.owner_id.as_object_id();
        if !self.exists(USERS, owner).await? {
            return Err(StoreError::invalid_reference(
                "owner",
                project.owner_id.to_string(),
            ));
        }
        let customer = project.customer_id.as_object_id();
        if !self.exists(CUSTOMERS, customer).await? {
            return Err(StoreError::invalid_reference(
                "customer",
                project.customer_id.to_string(),
            ));
        }

        let mut record = ProjectRecord::from_model(project);
        record.id = None;

        let result = self
            .projects()
            .insert_one(&record)
            .await
            .map_err(map_mongo_error)?;

        inserted_id(result.inserted_id)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<Project>, StoreError> {
        let record = self
            .projects()
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;
        Ok(record.map(ProjectRecord::into_model))
    }

    async fn list(&self, start: u64, limit: i64) -> Result<Vec<Project>, StoreError> {
        let cursor = self
            .projects()
            .find(doc! {})
            .skip(start)
            .limit(limit)
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<ProjectRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(ProjectRecord::into_model).collect())
    }

    async fn find_by_owner(&self, owner_id: &Id) -> Result<Vec<Project>, StoreError> {
        let cursor = self
            .projects()
            .find(doc! { "owner_id": owner_id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<ProjectRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(ProjectRecord::into_model).collect())
    }

    async fn find_by_customer(&self, customer_id: &Id) -> Result<Vec<Project>, StoreError> {
        let cursor = self
            .projects()
            .find(doc! { "customer_id": customer_id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<ProjectRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(ProjectRecord::into_model).collect())
    }

    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<Project>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let object_ids: Vec<_> = ids.iter().map(|id| id.as_object_id()).collect();
        let cursor = self
            .projects()
            .find(doc! { "_id": { "$in": object_ids } })
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<ProjectRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(ProjectRecord::into_model).collect())
    }

    async fn replace(&self, project: &Project) -> Result<(), StoreError> {
        let Some(id) = project.id else {
            return Err(StoreError::query(
                "cannot replace a project without an identifier",
            ));
        };

        let record = ProjectRecord::from_model(project);
        let result = self
            .projects()
            .replace_one(doc! { "_id": id.as_object_id() }, &record)
            .await
            .map_err(map_mongo_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::not_found("project", id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &Id) -> Result<(), StoreError> {
        let result = self
            .projects()
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found("project", id.to_string()));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[Id]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let object_ids: Vec<_> = ids.iter().map(|id| id.as_object_id()).collect();
        let result = self
            .projects()
            .delete_many(doc! { "_id": { "$in": object_ids } })
            .await
            .map_err(map_mongo_error)?;

        info!(count = result.deleted_count, "deleted projects");
        Ok(result.deleted_count)
    }
}
