//! Redirect rule validation.
//!
//! Pure predicate set applied to a trimmed candidate rule before any write.
//! Each predicate takes the full candidate so cross-field checks (regex-mode
//! exemption, country-token guard) are explicit parameters rather than
//! per-field state. Violations are values, never errors: callers get the
//! complete list and decide how to surface it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum post-trim length of the `why` justification.
pub const MIN_WHY_LENGTH: usize = 20;

/// Placeholder expanded by the redirect-serving layer; only meaningful
/// inside regex-mode rules.
pub const COUNTRY_TOKEN: &str = "{country}";

/// Absolute path: one or more non-empty segments, no whitespace, no `//`.
/// The bare root `/` is accepted separately.
static PATH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(/[^/\s]+)+$").expect("path shape pattern must compile"));

/// Absolute URI: optional `http(s)://`, optional `www.`, host with a dotted
/// TLD, optional path and query. Deliberately permissive past the host.
static URI_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}([/?][^\s]*)?$")
        .expect("uri shape pattern must compile")
});

// ---------------------------------------------------------------------------
// Rule kind
// ---------------------------------------------------------------------------

/// Classification of a redirect rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Temporary,
    Permanent,
}

/// All valid rule kind strings.
const VALID_KIND_STRINGS: &[&str] = &["Temporary", "Permanent"];

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temporary => "Temporary",
            Self::Permanent => "Permanent",
        }
    }

    /// Parse a rule kind from a string slice. Only the exact capitalized
    /// forms are accepted.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Temporary" => Ok(Self::Temporary),
            "Permanent" => Ok(Self::Permanent),
            _ => Err(CoreError::Validation(format!(
                "kind must be one of: {}",
                VALID_KIND_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate and violation types
// ---------------------------------------------------------------------------

/// A trimmed candidate rule, ready for validation.
///
/// For updates this is the merge of the supplied fields over the stored row;
/// for creates it is the request payload. `who` is not part of the draft
/// because it is server-assigned and never validated against client input.
#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub from: String,
    pub to: String,
    pub kind: String,
    pub why: String,
    pub is_regex: bool,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: &'static str,
    pub message: String,
}

impl RuleViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Join violation messages into a single human-readable string.
pub fn violation_messages(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Evaluate every predicate against the candidate and return all violations.
/// An empty vector means the candidate is well-formed.
pub fn validate_rule(draft: &RuleDraft) -> Vec<RuleViolation> {
    let checks: [fn(&RuleDraft) -> Vec<RuleViolation>; 7] = [
        check_from_present,
        check_to_present,
        check_from_shape,
        check_to_shape,
        check_country_token,
        check_kind,
        check_why,
    ];

    checks.iter().flat_map(|check| check(draft)).collect()
}

fn check_from_present(draft: &RuleDraft) -> Vec<RuleViolation> {
    if draft.from.is_empty() {
        vec![RuleViolation::new("from", "from must not be empty")]
    } else {
        vec![]
    }
}

fn check_to_present(draft: &RuleDraft) -> Vec<RuleViolation> {
    if draft.to.is_empty() {
        vec![RuleViolation::new("to", "to must not be empty")]
    } else {
        vec![]
    }
}

/// Literal-mode `from` must be `/` or an absolute multi-segment path.
/// Regex-mode rules assert their own pattern syntax and are exempt.
fn check_from_shape(draft: &RuleDraft) -> Vec<RuleViolation> {
    if draft.is_regex || draft.from.is_empty() {
        return vec![];
    }
    if draft.from == "/" || PATH_SHAPE.is_match(&draft.from) {
        vec![]
    } else {
        vec![RuleViolation::new(
            "from",
            "from must be \"/\" or an absolute path like /foo/bar",
        )]
    }
}

/// Literal-mode `to` may additionally be an absolute URI.
fn check_to_shape(draft: &RuleDraft) -> Vec<RuleViolation> {
    if draft.is_regex || draft.to.is_empty() {
        return vec![];
    }
    if draft.to == "/" || PATH_SHAPE.is_match(&draft.to) || URI_SHAPE.is_match(&draft.to) {
        vec![]
    } else {
        vec![RuleViolation::new(
            "to",
            "to must be \"/\", an absolute path, or an absolute URL",
        )]
    }
}

/// The `{country}` placeholder is only expanded for regex-mode rules;
/// in a literal rule it would be served as-is, which is never intended.
fn check_country_token(draft: &RuleDraft) -> Vec<RuleViolation> {
    if draft.is_regex {
        return vec![];
    }
    let mut violations = Vec::new();
    if draft.from.contains(COUNTRY_TOKEN) {
        violations.push(RuleViolation::new(
            "from",
            "from may only contain {country} in regex rules",
        ));
    }
    if draft.to.contains(COUNTRY_TOKEN) {
        violations.push(RuleViolation::new(
            "to",
            "to may only contain {country} in regex rules",
        ));
    }
    violations
}

fn check_kind(draft: &RuleDraft) -> Vec<RuleViolation> {
    match RuleKind::from_str(&draft.kind) {
        Ok(_) => vec![],
        Err(err) => vec![RuleViolation::new("kind", err.to_string())],
    }
}

fn check_why(draft: &RuleDraft) -> Vec<RuleViolation> {
    if draft.why.chars().count() < MIN_WHY_LENGTH {
        vec![RuleViolation::new(
            "why",
            format!("why must be at least {MIN_WHY_LENGTH} characters"),
        )]
    } else {
        vec![]
    }
}
