//! Mutation root.

use std::sync::Arc;

use async_graphql::{Context, ID, Object};

use crate::domain::{AppService, Customer, NewCustomer, NewProject, NewUser, Project};

use super::error::to_field_error;
use super::types::{GqlCustomer, GqlProject, GqlUser};

/// Root mutation object.
pub struct MutationRoot;

fn clamp_count(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[Object]
impl MutationRoot {
    /// Register a new user by email. Registering an already-used email
    /// fails with an `already_exists` error.
    async fn register_user(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        last_name: Option<String>,
        email: String,
    ) -> async_graphql::Result<GqlUser> {
        let service = ctx.data::<Arc<AppService>>()?;
        let user = service
            .register_user(NewUser {
                name: name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                email,
            })
            .await
            .map_err(to_field_error)?;
        Ok(GqlUser::from_model(user))
    }

    /// Delete the user registered under `email`.
    async fn delete_user(&self, ctx: &Context<'_>, email: String) -> async_graphql::Result<bool> {
        let service = ctx.data::<Arc<AppService>>()?;
        service.delete_user(&email).await.map_err(to_field_error)?;
        Ok(true)
    }

    /// Create a project for an existing owner and customer.
    async fn create_project(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
        #[graphql(name = "owner_id")] owner_id: ID,
        #[graphql(name = "customer_id")] customer_id: ID,
    ) -> async_graphql::Result<GqlProject> {
        let service = ctx.data::<Arc<AppService>>()?;
        let owner_id = service.parse_id(&owner_id).map_err(to_field_error)?;
        let customer_id = service.parse_id(&customer_id).map_err(to_field_error)?;
        let project = service
            .create_project(NewProject {
                name,
                description,
                owner_id,
                customer_id,
            })
            .await
            .map_err(to_field_error)?;
        Ok(GqlProject::from_model(project))
    }

    /// Replace a stored project wholesale; the creation timestamp is kept.
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
        description: Option<String>,
        #[graphql(name = "owner_id")] owner_id: ID,
        #[graphql(name = "customer_id")] customer_id: ID,
    ) -> async_graphql::Result<GqlProject> {
        let service = ctx.data::<Arc<AppService>>()?;
        let project_id = service.parse_id(&id).map_err(to_field_error)?;
        let owner_id = service.parse_id(&owner_id).map_err(to_field_error)?;
        let customer_id = service.parse_id(&customer_id).map_err(to_field_error)?;

        let existing = service
            .project_by_id(&project_id)
            .await
            .map_err(to_field_error)?;
        let updated = service
            .update_project(Project {
                id: Some(project_id),
                name,
                description: description.unwrap_or_default(),
                created_at: existing.created_at,
                owner_id,
                customer_id,
            })
            .await
            .map_err(to_field_error)?;
        Ok(GqlProject::from_model(updated))
    }

    /// Delete a single project.
    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let service = ctx.data::<Arc<AppService>>()?;
        let project_id = service.parse_id(&id).map_err(to_field_error)?;
        service
            .delete_project(&project_id)
            .await
            .map_err(to_field_error)?;
        Ok(true)
    }

    /// Delete a set of projects, returning the number removed.
    async fn delete_projects(
        &self,
        ctx: &Context<'_>,
        ids: Vec<ID>,
    ) -> async_graphql::Result<i32> {
        let service = ctx.data::<Arc<AppService>>()?;
        let ids = ids
            .iter()
            .map(|id| service.parse_id(id))
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_field_error)?;
        let count = service
            .delete_projects(&ids)
            .await
            .map_err(to_field_error)?;
        Ok(clamp_count(count))
    }

    /// Create a customer.
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        cuit: String,
    ) -> async_graphql::Result<GqlCustomer> {
        let service = ctx.data::<Arc<AppService>>()?;
        let customer = service
            .create_customer(NewCustomer { name, cuit })
            .await
            .map_err(to_field_error)?;
        Ok(GqlCustomer::from_model(customer))
    }

    /// Replace a stored customer wholesale; its project links are kept.
    async fn update_customer(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
        cuit: String,
    ) -> async_graphql::Result<GqlCustomer> {
        let service = ctx.data::<Arc<AppService>>()?;
        let customer_id = service.parse_id(&id).map_err(to_field_error)?;

        let existing = service
            .customer_by_id(&customer_id)
            .await
            .map_err(to_field_error)?;
        let updated = service
            .update_customer(Customer {
                id: Some(customer_id),
                name,
                cuit,
                project_ids: existing.project_ids,
            })
            .await
            .map_err(to_field_error)?;
        Ok(GqlCustomer::from_model(updated))
    }

    /// Delete a single customer.
    async fn delete_customer(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let service = ctx.data::<Arc<AppService>>()?;
        let customer_id = service.parse_id(&id).map_err(to_field_error)?;
        service
            .delete_customer(&customer_id)
            .await
            .map_err(to_field_error)?;
        Ok(true)
    }

    /// Delete a set of customers, returning the number removed.
    async fn delete_customers(
        &self,
        ctx: &Context<'_>,
        ids: Vec<ID>,
    ) -> async_graphql::Result<i32> {
        let service = ctx.data::<Arc<AppService>>()?;
        let ids = ids
            .iter()
            .map(|id| service.parse_id(id))
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_field_error)?;
        let count = service
            .delete_customers(&ids)
            .await
            .map_err(to_field_error)?;
        Ok(clamp_count(count))
    }
}
