use axum::{
    Router,
    http::Method,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::healthcheck))
        .route("/books", get(handler::list_books).post(handler::create_book))
        .route("/books/", get(handler::list_books).post(handler::create_book))
        .route(
            "/books/:id",
            get(handler::get_book)
                .put(handler::update_book)
                .delete(handler::delete_book),
        )
}

/// The full application: routes, CORS and request tracing bound to `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
