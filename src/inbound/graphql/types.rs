//! GraphQL object types and their lazy relationship resolvers.
//!
//! Response objects carry plain string identifiers; the related entities are
//! not stored on the response but fetched on demand, only when the client's
//! query asks for that field. Each resolver re-derives the domain identifier
//! from the parent's string field and goes through the per-request
//! [`ResolutionCache`](super::ResolutionCache).

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, ID, SimpleObject};
use chrono::{DateTime, Utc};

use crate::domain::{AppService, Customer, Id, Project, User};

use super::ResolutionCache;
use super::error::to_field_error;

fn id_string(id: Option<Id>) -> ID {
    ID::from(id.map(|id| id.to_string()).unwrap_or_default())
}

/// User response shape.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, name = "User")]
pub struct GqlUser {
    pub id: ID,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl GqlUser {
    pub(crate) fn from_model(user: User) -> Self {
        Self {
            id: id_string(user.id),
            name: user.name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

#[ComplexObject]
impl GqlUser {
    /// Projects owned by this user, fetched on demand.
    async fn projects(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlProject>> {
        let service = ctx.data::<Arc<AppService>>()?;
        let owner_id = service.parse_id(&self.id).map_err(to_field_error)?;
        let projects = service
            .projects_by_owner(&owner_id)
            .await
            .map_err(to_field_error)?;
        Ok(projects.into_iter().map(GqlProject::from_model).collect())
    }
}

/// Project response shape.
///
/// `owner_id`/`customer_id` are exposed alongside the lazy `owner` and
/// `customer` fields so clients can fetch just the references cheaply.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, name = "Project")]
pub struct GqlProject {
    pub id: ID,
    pub name: String,
    pub description: String,
    #[graphql(name = "created_at")]
    pub created_at: DateTime<Utc>,
    #[graphql(name = "owner_id")]
    pub owner_id: ID,
    #[graphql(name = "customer_id")]
    pub customer_id: ID,
}

impl GqlProject {
    pub(crate) fn from_model(project: Project) -> Self {
        Self {
            id: id_string(project.id),
            name: project.name,
            description: project.description,
            created_at: project.created_at,
            owner_id: ID::from(project.owner_id.to_string()),
            customer_id: ID::from(project.customer_id.to_string()),
        }
    }
}

#[ComplexObject]
impl GqlProject {
    /// The full owner entity, fetched on demand.
    async fn owner(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlUser> {
        let service = ctx.data::<Arc<AppService>>()?;
        let cache = ctx.data::<ResolutionCache>()?;
        let owner_id = service.parse_id(&self.owner_id).map_err(to_field_error)?;
        let owner = cache
            .user(service, &owner_id)
            .await
            .map_err(to_field_error)?;
        Ok(GqlUser::from_model(owner))
    }

    /// The full customer entity, fetched on demand.
    async fn customer(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlCustomer> {
        let service = ctx.data::<Arc<AppService>>()?;
        let cache = ctx.data::<ResolutionCache>()?;
        let customer_id = service
            .parse_id(&self.customer_id)
            .map_err(to_field_error)?;
        let customer = cache
            .customer(service, &customer_id)
            .await
            .map_err(to_field_error)?;
        Ok(GqlCustomer::from_model(customer))
    }
}

/// Customer response shape.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, name = "Customer")]
pub struct GqlCustomer {
    pub id: ID,
    pub name: String,
    pub cuit: String,
}

impl GqlCustomer {
    pub(crate) fn from_model(customer: Customer) -> Self {
        Self {
            id: id_string(customer.id),
            name: customer.name,
            cuit: customer.cuit,
        }
    }
}

#[ComplexObject]
impl GqlCustomer {
    /// Projects linked to this customer, fetched on demand.
    async fn projects(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlProject>> {
        let service = ctx.data::<Arc<AppService>>()?;
        let customer_id = service.parse_id(&self.id).map_err(to_field_error)?;
        let projects = service
            .projects_of_customer(&customer_id)
            .await
            .map_err(to_field_error)?;
        Ok(projects.into_iter().map(GqlProject::from_model).collect())
    }
}
