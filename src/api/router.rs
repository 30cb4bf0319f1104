use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrow_book, create_book, create_member, delete_book, delete_member, get_book,
    get_member, list_active_transactions, list_books, list_borrowed_books, list_members,
    list_transactions, return_book, update_book, update_member,
};

/// Creates the API router with all catalog endpoints
///
/// Books:
/// - GET/POST /books, GET/PUT/DELETE /books/:id
///
/// Members:
/// - GET/POST /members, GET/PUT/DELETE /members/:id
/// - GET /members/:id/borrowed - Books the member currently has out
///
/// Transactions:
/// - GET /transactions, GET /transactions/active
/// - POST /transactions - Borrow a book
/// - POST /transactions/:id/return - Return a book
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/members", get(list_members).post(create_member))
        .route(
            "/members/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/members/:id/borrowed", get(list_borrowed_books))
        .route("/transactions", get(list_transactions).post(borrow_book))
        .route("/transactions/active", get(list_active_transactions))
        .route("/transactions/:id/return", post(return_book))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
