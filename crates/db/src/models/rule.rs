//! Redirect rule model and DTOs.
//!
//! The wire format uses `isRegex` (camelCase, matching the client) while the
//! physical column is `is_regex`; the serde rename keeps the two decoupled.

use redirector_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A rule row from the `rules` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Rule {
    pub id: DbId,
    pub from: String,
    pub to: String,
    pub kind: String,
    pub why: String,
    /// Verified email of the last principal to write this rule.
    pub who: String,
    #[serde(rename = "isRegex")]
    pub is_regex: bool,
    pub created: Timestamp,
    pub updated: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new rule. `who` is deliberately absent: it is
/// stamped server-side from the acting principal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRule {
    pub from: String,
    pub to: String,
    pub kind: String,
    pub why: String,
    #[serde(default, rename = "isRegex")]
    pub is_regex: bool,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for updating an existing rule. Unsupplied fields keep their stored
/// values; `who` is always re-stamped from the acting principal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRule {
    pub from: Option<String>,
    pub to: Option<String>,
    pub kind: Option<String>,
    pub why: Option<String>,
    #[serde(rename = "isRegex")]
    pub is_regex: Option<bool>,
}
