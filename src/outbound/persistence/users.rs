//! MongoDB-backed [`UserRepository`] implementation.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use tracing::info;

use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{Id, User};

use super::client::MongoStore;
use super::error_mapping::{is_duplicate_key, map_mongo_error};
use super::inserted_id;
use super::records::UserRecord;

#[async_trait]
impl UserRepository for MongoStore {
    async fn insert(&self, user: &User) -> Result<Id, StoreError> {
        // The store generates the identifier; never carry one in.
        let mut record = UserRecord::from_model(user);
        record.id = None;

        let result = self.users().insert_one(&record).await.map_err(|err| {
            if is_duplicate_key(&err) {
                StoreError::already_exists(user.email.clone())
            } else {
                map_mongo_error(err)
            }
        })?;

        inserted_id(result.inserted_id)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<User>, StoreError> {
        let record = self
            .users()
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;
        Ok(record.map(UserRecord::into_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let record = self
            .users()
            .find_one(doc! { "email": email })
            .await
            .map_err(map_mongo_error)?;
        Ok(record.map(UserRecord::into_model))
    }

    async fn delete_by_email(&self, email: &str) -> Result<(), StoreError> {
        let result = self
            .users()
            .delete_one(doc! { "email": email })
            .await
            .map_err(map_mongo_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found("user", email));
        }
        info!(email, "deleted user");
        Ok(())
    }

    async fn list(&self, start: u64, limit: i64) -> Result<Vec<User>, StoreError> {
        let cursor = self
            .users()
            .find(doc! {})
            .skip(start)
            .limit(limit)
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<UserRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(UserRecord::into_model).collect())
    }

    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let object_ids: Vec<_> = ids.iter().map(|id| id.as_object_id()).collect();
        let cursor = self
            .users()
            .find(doc! { "_id": { "$in": object_ids } })
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<UserRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(UserRecord::into_model).collect())
    }
}
