//! Error taxonomy for the rule store.
//!
//! Validation failures and missing rows are recoverable outcomes the caller
//! can act on; database faults are infrastructure failures and propagate.

use redirector_core::rule::{violation_messages, RuleViolation};
use redirector_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// One or more validation predicates failed. The stored data is
    /// untouched; the messages are safe to show to the caller verbatim.
    #[error("{}", violation_messages(.0))]
    Invalid(Vec<RuleViolation>),

    /// The referenced rule does not exist (update only; delete is a no-op).
    #[error("Rule with id {id} not found")]
    NotFound { id: DbId },

    /// The persistence backend failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
