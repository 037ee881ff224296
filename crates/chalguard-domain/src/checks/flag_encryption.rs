use super::utils::doc_location;
use crate::model::{ChallengeDoc, FieldValue, FLAG_ENCRYPTION_MARKER};
use chalguard_types::{ids, Finding, Severity};
use serde_json::{json, Value};

/// `spec.flag` must be a string carrying the SOPS value-level marker.
///
/// The value is never decrypted or interpreted beyond the prefix. This is
/// independent of the whole-file envelope rule: a document can fail both.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let Some(spec) = &doc.spec else { return };
    let Some(flag) = spec.get("flag") else { return };

    match flag {
        FieldValue::Null => {}
        FieldValue::Str(s) => {
            if !s.starts_with(FLAG_ENCRYPTION_MARKER) {
                out.push(Finding {
                    severity: Severity::Error,
                    check_id: ids::CHECK_SPEC_FLAG_ENCRYPTION.to_string(),
                    code: ids::CODE_UNENCRYPTED_FLAG.to_string(),
                    message: format!(
                        "spec.flag must be encrypted with SOPS (must start with '{FLAG_ENCRYPTION_MARKER}')"
                    ),
                    location: doc_location(doc),
                    help: Some(
                        "Encrypt the flag with SOPS so the value starts with 'ENC['.".to_string(),
                    ),
                    url: None,
                    fingerprint: None,
                    // The flag value itself stays out of the report.
                    data: Value::Null,
                });
            }
        }
        other => {
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_SPEC_FLAG_ENCRYPTION.to_string(),
                code: ids::CODE_FLAG_NOT_STRING.to_string(),
                message: format!("spec.flag must be a string, got {}", other.kind_name()),
                location: doc_location(doc),
                help: Some(
                    "Encrypt the flag with SOPS so the value starts with 'ENC['.".to_string(),
                ),
                url: None,
                fingerprint: None,
                data: json!({ "got_kind": other.kind_name() }),
            });
        }
    }
}
