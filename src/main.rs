//! The backend for the party's membership approvals

use std::sync::Arc;

use anyhow::Context as _;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{Request, Response};
use axum::extract::Extension;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use roster::config::Config;
use roster::db::PgMemberStore;
use roster::graphql::{build_schema, Actor, RosterSchema, Services, ROLE_HEADER};
use roster::models::permissions::PermissionTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=info")),
        )
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let store = PgMemberStore::connect(&config).await?;
    let schema = build_schema(Services {
        store: Arc::new(store),
        permissions: Arc::new(PermissionTable::new()),
    });

    let app = Router::new()
        .route("/", get(playground).post(query))
        .route("/health", get(health))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive());

    tracing::info!(addr = %config.bind_addr, "listening");
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .context("Server failed")
}

async fn query(
    Extension(schema): Extension<RosterSchema>,
    headers: HeaderMap,
    Json(request): Json<Request>,
) -> Json<Response> {
    let request = match actor_from_headers(&headers) {
        Some(actor) => request.data(actor),
        None => request,
    };

    Json(schema.execute(request).await)
}

async fn playground() -> Html<String> {
    Html(playground_source(GraphQLPlaygroundConfig::new("/")))
}

async fn health() -> &'static str {
    "ok"
}

/// The upstream authentication layer sets the role header for signed-in
/// users; requests without it are anonymous.
fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let value = headers.get(ROLE_HEADER)?;
    match value.to_str() {
        Ok(raw) => Some(Actor::from_raw_role(Some(raw))),
        Err(_) => {
            tracing::warn!("ignoring non-text role header");
            None
        }
    }
}
