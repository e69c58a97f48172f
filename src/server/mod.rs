//! Server construction and wiring.

mod config;

pub use config::{DbSettings, Settings, SettingsError, WebServerSettings};

use std::sync::Arc;

use actix_web::{App, HttpServer, web};

use crate::domain::AppService;
use crate::inbound::graphql::build_schema;
use crate::inbound::http::{graphiql_explorer, graphql_endpoint};

/// Run the HTTP server until shutdown.
///
/// The schema is built once and shared across workers; each worker clones
/// the handle.
pub async fn run(settings: &Settings, service: Arc<AppService>) -> std::io::Result<()> {
    let schema = build_schema(service);
    let graphiql_enabled = settings.webserver().graphiql();
    let port = settings.webserver().http_port();

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(schema.clone()))
            .service(graphql_endpoint);
        if graphiql_enabled {
            app = app.service(graphiql_explorer);
        }
        app
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
