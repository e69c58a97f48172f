//! HTTP transport for the GraphQL endpoint.
//!
//! ```text
//! POST /graphql  {"query": "...", "variables": {...}, "operationName": "..."}
//! GET  /graphiql  (interactive explorer, when enabled in settings)
//! ```
//!
//! A malformed JSON body is rejected with HTTP 400 by the request extractor.

use actix_web::{HttpResponse, Responder, get, post, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::inbound::graphql::{ResolutionCache, TrackerSchema};

/// Execute a GraphQL request.
///
/// Each request gets a fresh [`ResolutionCache`] so relationship resolvers
/// deduplicate lookups within the request only.
#[post("/graphql")]
pub async fn graphql_endpoint(
    schema: web::Data<TrackerSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(ResolutionCache::default());
    schema.execute(request).await.into()
}

/// Serve the interactive GraphiQL explorer.
#[get("/graphiql")]
pub async fn graphiql_explorer() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
