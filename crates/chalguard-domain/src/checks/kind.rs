use super::utils::{display_value, doc_location, value_to_json};
use crate::model::{ChallengeDoc, EXPECTED_KIND};
use chalguard_types::{ids, Finding, Severity};
use serde_json::json;

pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let matches = doc
        .kind
        .as_ref()
        .and_then(|v| v.as_str())
        .is_some_and(|s| s == EXPECTED_KIND);
    if matches {
        return;
    }

    out.push(Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_SCHEMA_KIND.to_string(),
        code: ids::CODE_KIND_MISMATCH.to_string(),
        message: format!(
            "kind: expected '{}', got '{}'",
            EXPECTED_KIND,
            display_value(doc.kind.as_ref())
        ),
        location: doc_location(doc),
        help: Some(format!("Set kind to '{EXPECTED_KIND}'.")),
        url: None,
        fingerprint: None,
        data: json!({
            "expected": EXPECTED_KIND,
            "got": value_to_json(doc.kind.as_ref()),
        }),
    });
}
