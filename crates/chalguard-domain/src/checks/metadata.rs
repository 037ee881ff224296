use super::utils::{display_value, doc_location, value_to_json, SUBDOMAIN_RE};
use crate::model::{ChallengeDoc, FieldValue, EXPECTED_NAMESPACE};
use chalguard_types::{ids, Finding, Severity};
use serde_json::{json, Value};

/// The `metadata` section: presence, name grammar, namespace literal.
///
/// When the section itself is missing the sub-rules have no input, so this is
/// the one place a single finding suppresses others. The folder-name
/// cross-reference lives in its own check.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let Some(metadata) = &doc.metadata else {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_SCHEMA_METADATA.to_string(),
            code: ids::CODE_MISSING_METADATA.to_string(),
            message: "missing metadata section".to_string(),
            location: doc_location(doc),
            help: Some("Add a metadata mapping with name and namespace.".to_string()),
            url: None,
            fingerprint: None,
            data: Value::Null,
        });
        return;
    };

    match &metadata.name {
        None | Some(FieldValue::Null) => {
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_SCHEMA_METADATA.to_string(),
                code: ids::CODE_MISSING_NAME.to_string(),
                message: "missing metadata.name".to_string(),
                location: doc_location(doc),
                help: Some("Add metadata.name matching the challenge folder.".to_string()),
                url: None,
                fingerprint: None,
                data: Value::Null,
            });
        }
        Some(FieldValue::Str(name)) => {
            if !SUBDOMAIN_RE.is_match(name) {
                out.push(Finding {
                    severity: Severity::Error,
                    check_id: ids::CHECK_SCHEMA_METADATA.to_string(),
                    code: ids::CODE_INVALID_NAME.to_string(),
                    message: format!(
                        "invalid metadata.name '{name}': must be a lowercase RFC 1123 subdomain \
                         (lowercase alphanumeric, '-' or '.', start/end with alphanumeric)"
                    ),
                    location: doc_location(doc),
                    help: Some(
                        "Use a lowercase RFC 1123 subdomain such as 'buffer-overflow'.".to_string(),
                    ),
                    url: None,
                    fingerprint: None,
                    data: json!({ "name": name }),
                });
            }
        }
        Some(other) => {
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_SCHEMA_METADATA.to_string(),
                code: ids::CODE_NAME_NOT_STRING.to_string(),
                message: format!("metadata.name must be a string, got {}", other.kind_name()),
                location: doc_location(doc),
                help: Some(
                    "Use a lowercase RFC 1123 subdomain such as 'buffer-overflow'.".to_string(),
                ),
                url: None,
                fingerprint: None,
                data: json!({ "got": value_to_json(Some(other)) }),
            });
        }
    }

    let namespace_ok = metadata
        .namespace
        .as_ref()
        .and_then(|v| v.as_str())
        .is_some_and(|s| s == EXPECTED_NAMESPACE);
    if !namespace_ok {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_SCHEMA_METADATA.to_string(),
            code: ids::CODE_WRONG_NAMESPACE.to_string(),
            message: format!(
                "metadata.namespace: expected '{}', got '{}'",
                EXPECTED_NAMESPACE,
                display_value(metadata.namespace.as_ref())
            ),
            location: doc_location(doc),
            help: Some(format!("Set metadata.namespace to '{EXPECTED_NAMESPACE}'.")),
            url: None,
            fingerprint: None,
            data: json!({
                "expected": EXPECTED_NAMESPACE,
                "got": value_to_json(metadata.namespace.as_ref()),
            }),
        });
    }
}
