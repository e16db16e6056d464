use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    AppState, create_book, create_category, create_person, delete_book, delete_category,
    delete_person, get_book, get_category, get_person, lend_book, list_books, list_categories,
    list_people, return_book, update_book, update_person,
};

/// Creates the API router with all lending record endpoints
///
/// Books:
/// - POST /libro, GET /libro
/// - GET /libro/:id, PUT /libro/:id (description only), DELETE /libro/:id
/// - PUT /libro/prestar/:id - Lend a book to a person
/// - PUT /libro/devolver/:id - Return a lent book
///
/// Categories:
/// - POST /categoria, GET /categoria
/// - GET /categoria/:id, DELETE /categoria/:id
///
/// People:
/// - POST /persona, GET /persona
/// - GET /persona/:id, PUT /persona/:id (partial), DELETE /persona/:id
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/libro", get(list_books).post(create_book))
        .route(
            "/libro/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/libro/prestar/:id", put(lend_book))
        .route("/libro/devolver/:id", put(return_book))
        .route("/categoria", get(list_categories).post(create_category))
        .route("/categoria/:id", get(get_category).delete(delete_category))
        .route("/persona", get(list_people).post(create_person))
        .route(
            "/persona/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
