use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use notes_api::{app, config::Config, repository::Repository, service::NoteService};

#[tokio::main]
async fn main() {
    // Fetch env variables
    let config = Config::from_env().unwrap_or_else(|e| {
        panic!("invalid configuration: {e}");
    });

    // Log setup; DEBUG=true lowers the default level, RUST_LOG still wins
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Repository creation and migration
    let mut repo = Repository::new(&config.db.dsn()).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let repo_ptr = Arc::new(tokio::sync::Mutex::new(repo));
    let service = Arc::new(NoteService::new(repo_ptr, config.query_timeout));

    // Router config
    let router = app(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind HTTP listener: {e}");
            panic!("failed to bind HTTP listener: {e}");
        });

    // Starting router
    tracing::info!(
        "Started listening on {}",
        listener.local_addr().expect("listener has a local address")
    );
    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
