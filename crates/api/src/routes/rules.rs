//! Route definitions for redirect rule management, mounted at `/rules`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::rules;
use crate::state::AppState;

/// Rule routes.
///
/// ```text
/// GET    /        -> list_rules
/// POST   /        -> create_rule
/// PUT    /{id}    -> update_rule
/// DELETE /{id}    -> delete_rule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rules::list_rules).post(rules::create_rule))
        .route(
            "/{id}",
            put(rules::update_rule).delete(rules::delete_rule),
        )
}
