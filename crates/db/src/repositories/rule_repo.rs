//! The rule store: validation-gated CRUD over the `rules` table.
//!
//! Every write trims the candidate, stamps `who` from the acting principal,
//! and runs the full predicate set from `redirector_core::rule` before
//! touching storage. Each operation is a single-row read-modify-write;
//! concurrent updates to the same id are last-writer-wins.

use sqlx::PgPool;

use redirector_core::rule::{validate_rule, RuleDraft};
use redirector_core::types::DbId;

use crate::error::StoreError;
use crate::models::rule::{CreateRule, Rule, UpdateRule};

/// Column list for `rules` queries. `from` and `to` are SQL keywords and
/// must stay quoted.
const RULE_COLUMNS: &str = "id, \"from\", \"to\", kind, why, who, is_regex, created, updated";

/// Provides CRUD operations for redirect rules.
pub struct RuleRepo;

impl RuleRepo {
    /// List all rules, ordered by id. Read-only, no validation.
    pub async fn list(pool: &PgPool) -> Result<Vec<Rule>, StoreError> {
        let rules =
            sqlx::query_as::<_, Rule>(&format!("SELECT {RULE_COLUMNS} FROM rules ORDER BY id"))
                .fetch_all(pool)
                .await?;
        Ok(rules)
    }

    /// Load a single rule by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rule>, StoreError> {
        let rule =
            sqlx::query_as::<_, Rule>(&format!("SELECT {RULE_COLUMNS} FROM rules WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(rule)
    }

    /// Validate and insert a new rule, stamping `who` from the acting
    /// principal. `created` and `updated` are set by the same `NOW()` so a
    /// fresh rule always has `created == updated`.
    pub async fn create(pool: &PgPool, input: &CreateRule, who: &str) -> Result<Rule, StoreError> {
        let draft = RuleDraft {
            from: input.from.trim().to_string(),
            to: input.to.trim().to_string(),
            kind: input.kind.trim().to_string(),
            why: input.why.trim().to_string(),
            is_regex: input.is_regex,
        };

        let violations = validate_rule(&draft);
        if !violations.is_empty() {
            return Err(StoreError::Invalid(violations));
        }

        let rule = sqlx::query_as::<_, Rule>(&format!(
            "INSERT INTO rules (\"from\", \"to\", kind, why, who, is_regex) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {RULE_COLUMNS}"
        ))
        .bind(&draft.from)
        .bind(&draft.to)
        .bind(&draft.kind)
        .bind(&draft.why)
        .bind(who)
        .bind(draft.is_regex)
        .fetch_one(pool)
        .await?;

        Ok(rule)
    }

    /// Merge the supplied fields over the stored row, re-validate the result,
    /// and persist it with a refreshed `updated` timestamp.
    ///
    /// `who` is always overwritten with the acting principal: the last editor
    /// becomes the author of record. A missing id is `StoreError::NotFound`;
    /// on a validation failure the stored row is untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRule,
        who: &str,
    ) -> Result<Rule, StoreError> {
        let existing = Self::find_by_id(pool, id)
            .await?
            .ok_or(StoreError::NotFound { id })?;

        let draft = RuleDraft {
            from: input.from.as_deref().unwrap_or(&existing.from).trim().to_string(),
            to: input.to.as_deref().unwrap_or(&existing.to).trim().to_string(),
            kind: input.kind.as_deref().unwrap_or(&existing.kind).trim().to_string(),
            why: input.why.as_deref().unwrap_or(&existing.why).trim().to_string(),
            is_regex: input.is_regex.unwrap_or(existing.is_regex),
        };

        let violations = validate_rule(&draft);
        if !violations.is_empty() {
            return Err(StoreError::Invalid(violations));
        }

        // The row may have been deleted between the read and this write;
        // that still surfaces as NotFound.
        let rule = sqlx::query_as::<_, Rule>(&format!(
            "UPDATE rules \
             SET \"from\" = $2, \"to\" = $3, kind = $4, why = $5, who = $6, \
                 is_regex = $7, updated = NOW() \
             WHERE id = $1 \
             RETURNING {RULE_COLUMNS}"
        ))
        .bind(id)
        .bind(&draft.from)
        .bind(&draft.to)
        .bind(&draft.kind)
        .bind(&draft.why)
        .bind(who)
        .bind(draft.is_regex)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        Ok(rule)
    }

    /// Delete a rule by id. Deleting a missing id is a silent no-op, so
    /// callers cannot distinguish "deleted" from "already gone".
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "rule delete executed");
        Ok(())
    }
}
