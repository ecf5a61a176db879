//! Route definitions for session establishment, mounted at `/auth`.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /session  -> create_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/session", post(auth::create_session))
}
