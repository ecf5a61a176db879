//! Verified OAuth profile and domain verification.
//!
//! The OAuth handshake itself happens upstream; by the time a profile
//! reaches this module its emails have already been verified by the
//! identity provider. This module only decides whether that profile belongs
//! to the organisation and which email is attributed to writes.

use redirector_core::error::CoreError;
use serde::Deserialize;

/// A profile handed over by the OAuth callback layer after the identity
/// provider verified the user. The first email is the principal's primary
/// address.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedProfile {
    pub emails: Vec<String>,
}

/// Check that at least one of the profile's emails ends with the required
/// domain suffix and return the primary (first) email as the principal.
///
/// The suffix match mirrors the upstream strategy check: `ends_with`, so
/// both `alice@example.com` and `alice@mail.example.com` qualify for the
/// domain `example.com`.
pub fn verify_profile(profile: &VerifiedProfile, domain: &str) -> Result<String, CoreError> {
    if !profile.emails.iter().any(|email| email.ends_with(domain)) {
        return Err(CoreError::Forbidden(format!(
            "No verified email in the {domain} domain"
        )));
    }

    profile
        .emails
        .first()
        .cloned()
        .ok_or_else(|| CoreError::Forbidden("Profile has no verified emails".to_string()))
}
