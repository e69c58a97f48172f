//! GraphQL inbound adapter.
//!
//! Declares the schema surface and translates between the application
//! service and response shapes. Relationship fields (`Project.owner`,
//! `Project.customer`, `Customer.projects`, `User.projects`) resolve lazily,
//! per field request, through a per-request [`ResolutionCache`].

mod cache;
mod error;
mod mutation;
mod query;
mod types;

pub use cache::ResolutionCache;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::domain::AppService;

/// The full GraphQL schema type.
pub type TrackerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the application service injected.
pub fn build_schema(service: Arc<AppService>) -> TrackerSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}
