pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use std::sync::Arc;

use axum::{
    Router,
    response::Html,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::rest;
use service::NoteService;

/// Builds the full application router: the notes CRUD API, the static
/// front-end page at `/`, and Swagger UI.
pub fn app(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/notes", get(rest::get_all_notes))
        .route("/api/notes", post(rest::create_note))
        .route("/api/notes/{id}", get(rest::get_one_note))
        .route("/api/notes/{id}", put(rest::update_note))
        .route("/api/notes/{id}", delete(rest::delete_note))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
