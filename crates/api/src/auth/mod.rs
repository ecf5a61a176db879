//! Authentication primitives.
//!
//! - [`profile`] -- verified OAuth profile and domain check; the sole
//!   contract the rule store depends on for principal attribution.
//! - [`jwt`] -- HS256 session token generation and validation.

pub mod jwt;
pub mod profile;

use redirector_core::error::CoreError;

use crate::config::ServerConfig;
use profile::VerifiedProfile;

/// Verify a profile against the allowed email domain and issue a session
/// token whose subject is the principal email.
pub fn establish_session(
    profile: &VerifiedProfile,
    config: &ServerConfig,
) -> Result<String, CoreError> {
    let email = profile::verify_profile(profile, &config.allowed_email_domain)?;
    jwt::issue_session_token(&email, &config.jwt)
        .map_err(|e| CoreError::Internal(format!("Failed to sign session token: {e}")))
}
