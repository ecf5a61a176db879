//! Handlers for redirect rule management.
//!
//! Listing is open so the redirect-serving infrastructure can consume the
//! rule set; every write requires an authenticated principal, whose verified
//! email is stamped into the rule's `who` field server-side.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use redirector_core::types::DbId;
use redirector_db::models::rule::{CreateRule, UpdateRule};
use redirector_db::repositories::RuleRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rules
///
/// List all redirect rules, ordered by id.
pub async fn list_rules(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rules = RuleRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: rules }))
}

/// POST /api/v1/rules
///
/// Create a new redirect rule. The acting principal becomes the author.
pub async fn create_rule(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRule>,
) -> AppResult<impl IntoResponse> {
    let rule = RuleRepo::create(&state.pool, &input, &user.email).await?;

    tracing::info!(
        rule_id = rule.id,
        from = %rule.from,
        to = %rule.to,
        who = %rule.who,
        "Redirect rule created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/v1/rules/{id}
///
/// Partially update an existing rule. The acting principal becomes the
/// author of record regardless of who created the rule.
pub async fn update_rule(
    user: AuthUser,
    State(state): State<AppState>,
    Path(rule_id): Path<DbId>,
    Json(input): Json<UpdateRule>,
) -> AppResult<impl IntoResponse> {
    let rule = RuleRepo::update(&state.pool, rule_id, &input, &user.email).await?;

    tracing::info!(rule_id, who = %rule.who, "Redirect rule updated");

    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/rules/{id}
///
/// Delete a rule. Always returns 204, including for ids that no longer
/// exist (delete is idempotent).
pub async fn delete_rule(
    user: AuthUser,
    State(state): State<AppState>,
    Path(rule_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RuleRepo::delete(&state.pool, rule_id).await?;

    tracing::info!(rule_id, who = %user.email, "Redirect rule deleted");

    Ok(StatusCode::NO_CONTENT)
}
