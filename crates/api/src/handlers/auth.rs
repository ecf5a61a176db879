//! Session establishment for the OAuth callback layer.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::auth::{self, profile::VerifiedProfile};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload carrying a freshly issued session token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
}

/// POST /api/v1/auth/session
///
/// Exchange a verified OAuth profile for a session token. The caller is the
/// trusted OAuth callback layer, which has already completed the handshake
/// with the identity provider; this endpoint only enforces the email-domain
/// policy and signs the session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(profile): Json<VerifiedProfile>,
) -> AppResult<impl IntoResponse> {
    let token = auth::establish_session(&profile, &state.config)?;

    tracing::info!("Session established for verified profile");

    Ok(Json(DataResponse {
        data: SessionResponse { token },
    }))
}
