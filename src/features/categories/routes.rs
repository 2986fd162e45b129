use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// `search` and `active` are static segments, so the router matches them ahead of `{id}`.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/categories",
            post(handlers::create_category).get(handlers::list_categories),
        )
        .route("/categories/search", get(handlers::search_categories))
        .route("/categories/active", get(handlers::list_active_categories))
        .route(
            "/categories/{id}",
            get(handlers::get_category)
                .patch(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
