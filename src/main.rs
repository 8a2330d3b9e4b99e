use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod api;
mod app_env;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routing_utils;

#[cfg(test)]
mod integration_test;

/// Application state shared across request handlers
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

/// Extractor alias for the shared application state
pub type AppState = State<Arc<SharedData>>;

/// Assembles the full application router on top of the shared state
fn app_router(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .route("/", get(api::welcome))
        .merge(api::user::user_routes())
        .merge(api::task::task_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::setup_logging();

    let db_url = env::var(app_env::DB_URL)
        .context("Could not get the document store URL from the environment")?;
    let db_pool = persistence::connect_sqlx(&db_url).await?;
    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db_pool),
    });

    let port: u16 = match env::var(app_env::PORT) {
        Ok(raw_port) => raw_port
            .parse()
            .with_context(|| format!("'{raw_port}' is not a usable port number"))?,
        Err(_) => 8080,
    };
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server listening on port {port}.");
    axum::serve(listener, app_router(shared_data)).await?;

    Ok(())
}
