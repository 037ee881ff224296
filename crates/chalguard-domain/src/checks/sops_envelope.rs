use super::utils::doc_location;
use crate::model::ChallengeDoc;
use chalguard_types::{ids, Finding, Severity};
use serde_json::Value;

/// Whole-file encryption envelope: a top-level `sops` key, any value.
///
/// Independent of the flag-level marker check.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    if doc.has_sops {
        return;
    }

    out.push(Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_SOPS_ENVELOPE.to_string(),
        code: ids::CODE_MISSING_SOPS.to_string(),
        message: "missing sops section: Challenge.yaml must be encrypted with SOPS".to_string(),
        location: doc_location(doc),
        help: Some("Run 'sops --encrypt --in-place Challenge.yaml' before committing.".to_string()),
        url: None,
        fingerprint: None,
        data: Value::Null,
    });
}
