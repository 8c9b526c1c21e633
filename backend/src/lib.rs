//! HTTP service for managing todo items in a document store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_todo, delete_todo, edit_todo, get_todo, list_todos};
use crate::store::SharedStore;

/// Builds the router over an already opened store.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).patch(edit_todo).delete(delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}
