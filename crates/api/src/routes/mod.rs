pub mod auth;
pub mod health;
pub mod rules;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/session        exchange verified profile for a session token (POST)
///
/// /rules               list (GET, public), create (POST, auth)
/// /rules/{id}          update (PUT, auth), delete (DELETE, auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/rules", rules::router())
}
