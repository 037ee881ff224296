use super::utils::{doc_location, value_to_json};
use crate::model::ChallengeDoc;
use chalguard_types::{ids, Finding, Severity};
use serde_json::json;

/// `spec.points` must be an integer strictly greater than zero.
///
/// The type check is integer-specific: a boolean is one in YAML terms but
/// never an acceptable score.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let Some(spec) = &doc.spec else { return };
    let Some(points) = spec.get("points") else { return };
    if points.is_null() {
        // Key presence is judged by the required-fields rule.
        return;
    }

    let valid = points.as_int().is_some_and(|p| p > 0);
    if !valid {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_SPEC_POINTS.to_string(),
            code: ids::CODE_INVALID_POINTS.to_string(),
            message: format!("invalid spec.points: must be a positive integer, got '{points}'"),
            location: doc_location(doc),
            help: Some("Use an unquoted positive integer for points.".to_string()),
            url: None,
            fingerprint: None,
            data: json!({ "points": value_to_json(Some(points)) }),
        });
    }
}
