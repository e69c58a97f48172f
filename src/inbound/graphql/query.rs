//! Query root.

use std::sync::Arc;

use async_graphql::{Context, ID, Object};

use crate::domain::AppService;

use super::error::to_field_error;
use super::types::{GqlCustomer, GqlProject, GqlUser};

/// Root query object.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List users in registration order.
    ///
    /// `start_pos` skips that many records; `offset` caps the page size, and
    /// `0` returns all remaining records.
    async fn all_users(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "start_pos", default)] start_pos: i32,
        #[graphql(default)] offset: i32,
    ) -> async_graphql::Result<Vec<GqlUser>> {
        let service = ctx.data::<Arc<AppService>>()?;
        let users = service
            .all_users(i64::from(start_pos), i64::from(offset))
            .await
            .map_err(to_field_error)?;
        Ok(users.into_iter().map(GqlUser::from_model).collect())
    }

    /// List projects in creation order; same pagination as `allUsers`.
    async fn all_projects(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "start_pos", default)] start_pos: i32,
        #[graphql(default)] offset: i32,
    ) -> async_graphql::Result<Vec<GqlProject>> {
        let service = ctx.data::<Arc<AppService>>()?;
        let projects = service
            .all_projects(i64::from(start_pos), i64::from(offset))
            .await
            .map_err(to_field_error)?;
        Ok(projects.into_iter().map(GqlProject::from_model).collect())
    }

    /// List every customer.
    async fn all_customers(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlCustomer>> {
        let service = ctx.data::<Arc<AppService>>()?;
        let customers = service.all_customers().await.map_err(to_field_error)?;
        Ok(customers.into_iter().map(GqlCustomer::from_model).collect())
    }

    /// Look up a user by email.
    async fn user(&self, ctx: &Context<'_>, email: String) -> async_graphql::Result<GqlUser> {
        let service = ctx.data::<Arc<AppService>>()?;
        let user = service
            .user_by_email(&email)
            .await
            .map_err(to_field_error)?;
        Ok(GqlUser::from_model(user))
    }

    /// Look up a project by identifier.
    async fn project(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<GqlProject> {
        let service = ctx.data::<Arc<AppService>>()?;
        let project_id = service.parse_id(&id).map_err(to_field_error)?;
        let project = service
            .project_by_id(&project_id)
            .await
            .map_err(to_field_error)?;
        Ok(GqlProject::from_model(project))
    }

    /// Look up a customer by identifier.
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<GqlCustomer> {
        let service = ctx.data::<Arc<AppService>>()?;
        let customer_id = service.parse_id(&id).map_err(to_field_error)?;
        let customer = service
            .customer_by_id(&customer_id)
            .await
            .map_err(to_field_error)?;
        Ok(GqlCustomer::from_model(customer))
    }
}
