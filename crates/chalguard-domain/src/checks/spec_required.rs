use super::utils::doc_location;
use crate::model::{ChallengeDoc, REQUIRED_SPEC_FIELDS};
use chalguard_types::{ids, Finding, Severity};
use serde_json::{json, Value};

/// Unconditionally required spec fields: one finding per absent key, never an
/// aggregate "spec incomplete". A key present with a null value satisfies
/// presence; its content is judged by the value rules.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let Some(spec) = &doc.spec else {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_SPEC_REQUIRED_FIELDS.to_string(),
            code: ids::CODE_MISSING_SPEC.to_string(),
            message: "missing spec section".to_string(),
            location: doc_location(doc),
            help: Some("Add a spec mapping with the required challenge fields.".to_string()),
            url: None,
            fingerprint: None,
            data: Value::Null,
        });
        return;
    };

    for field in REQUIRED_SPEC_FIELDS {
        if !spec.contains(field) {
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_SPEC_REQUIRED_FIELDS.to_string(),
                code: ids::CODE_MISSING_REQUIRED_FIELD.to_string(),
                message: format!("missing required field: spec.{field}"),
                location: doc_location(doc),
                help: Some(format!("Add spec.{field} to the challenge definition.")),
                url: None,
                fingerprint: None,
                data: json!({ "field": field }),
            });
        }
    }
}
