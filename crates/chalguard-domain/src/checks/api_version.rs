use super::utils::{display_value, doc_location, value_to_json};
use crate::model::{ChallengeDoc, EXPECTED_API_VERSION};
use chalguard_types::{ids, Finding, Severity};
use serde_json::json;

pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let matches = doc
        .api_version
        .as_ref()
        .and_then(|v| v.as_str())
        .is_some_and(|s| s == EXPECTED_API_VERSION);
    if matches {
        return;
    }

    out.push(Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_SCHEMA_API_VERSION.to_string(),
        code: ids::CODE_API_VERSION_MISMATCH.to_string(),
        message: format!(
            "apiVersion: expected '{}', got '{}'",
            EXPECTED_API_VERSION,
            display_value(doc.api_version.as_ref())
        ),
        location: doc_location(doc),
        help: Some(format!("Set apiVersion to '{EXPECTED_API_VERSION}'.")),
        url: None,
        fingerprint: None,
        data: json!({
            "expected": EXPECTED_API_VERSION,
            "got": value_to_json(doc.api_version.as_ref()),
        }),
    });
}
