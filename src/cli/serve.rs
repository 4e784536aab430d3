use rowgraph::error::Result;
use rowgraph::store::{MemoryFetcherFactory, MemoryStore};
use rowgraph::wiring::{wire, WiringBuilder};

use axum::{routing::get, routing::post, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Run the serve command: load row data and wirings, run the wiring pass, and
/// start the GraphQL server. Any failure here aborts startup before the
/// listener binds.
pub async fn run(wirings_path: String, data_path: String, port: u16) -> Result<()> {
    let store = Arc::new(MemoryStore::load(&data_path)?);

    let mappings = rowgraph::config::load_wirings(&wirings_path)?;

    tracing::info!("🔧 Wiring {} field mapping(s)...", mappings.len());
    let factory = MemoryFetcherFactory::new(store);
    let wiring = wire(WiringBuilder::new(), &mappings, &factory)?;

    let schema = rowgraph::schema::build_schema(&mappings, &wiring)?;

    tracing::info!("✅ Schema built with {} wired field(s)", wiring.len());
    tracing::info!("🚀 GraphQL server running on http://localhost:{}", port);
    tracing::info!("📊 Playground: http://localhost:{}/graphql", port);
    tracing::info!("💡 Press Ctrl+C to stop the server");

    start_http_server(schema, port).await
}

async fn start_http_server(schema: async_graphql::dynamic::Schema, port: u16) -> Result<()> {
    // Wrap schema in Arc for sharing across handlers
    let schema = Arc::new(schema);

    let app = Router::new()
        .route("/graphql", post(graphql_handler).get(graphql_playground))
        .route("/health", get(health_check))
        .with_state(schema)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        rowgraph::error::RowgraphError::Config(format!(
            "Failed to bind to port {}: {}. Port may be in use.",
            port, e
        ))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| rowgraph::error::RowgraphError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

async fn graphql_handler(
    axum::extract::State(schema): axum::extract::State<Arc<async_graphql::dynamic::Schema>>,
    axum::Json(request): axum::Json<async_graphql::Request>,
) -> axum::Json<async_graphql::Response> {
    axum::Json(schema.execute(request).await)
}

async fn graphql_playground() -> axum::response::Html<String> {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

async fn health_check() -> &'static str {
    "OK"
}
