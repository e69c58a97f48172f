//! MongoDB-backed [`CustomerRepository`] implementation.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use tracing::info;

use crate::domain::ports::{CustomerRepository, StoreError};
use crate::domain::{Customer, Id};

use super::client::MongoStore;
use super::error_mapping::map_mongo_error;
use super::inserted_id;
use super::records::CustomerRecord;

#[async_trait]
impl CustomerRepository for MongoStore {
    async fn insert(&self, customer: &Customer) -> Result<Id, StoreError> {
        let mut record = CustomerRecord::from_model(customer);
        record.id = None;

        let result = self
            .customers()
            .insert_one(&record)
            .await
            .map_err(map_mongo_error)?;

        inserted_id(result.inserted_id)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<Customer>, StoreError> {
        let record = self
            .customers()
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;
        Ok(record.map(CustomerRecord::into_model))
    }

    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let cursor = self
            .customers()
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<CustomerRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(CustomerRecord::into_model).collect())
    }

    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<Customer>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let object_ids: Vec<_> = ids.iter().map(|id| id.as_object_id()).collect();
        let cursor = self
            .customers()
            .find(doc! { "_id": { "$in": object_ids } })
            .await
            .map_err(map_mongo_error)?;

        let records: Vec<CustomerRecord> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(records.into_iter().map(CustomerRecord::into_model).collect())
    }

    async fn replace(&self, customer: &Customer) -> Result<(), StoreError> {
        let Some(id) = customer.id else {
            return Err(StoreError::query(
                "cannot replace a customer without an identifier",
            ));
        };

        let record = CustomerRecord::from_model(customer);
        let result = self
            .customers()
            .replace_one(doc! { "_id": id.as_object_id() }, &record)
            .await
            .map_err(map_mongo_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::not_found("customer", id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &Id) -> Result<(), StoreError> {
        let result = self
            .customers()
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found("customer", id.to_string()));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[Id]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let object_ids: Vec<_> = ids.iter().map(|id| id.as_object_id()).collect();
        let result = self
            .customers()
            .delete_many(doc! { "_id": { "$in": object_ids } })
            .await
            .map_err(map_mongo_error)?;

        info!(count = result.deleted_count, "deleted customers");
        Ok(result.deleted_count)
    }
}
