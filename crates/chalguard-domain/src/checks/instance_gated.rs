use super::utils::{display_value, doc_location, value_to_json, IMAGE_RE};
use crate::model::{ChallengeDoc, IMAGE_REPOSITORY};
use chalguard_types::{ids, Finding, Severity};
use serde_json::{json, Value};

/// Conditional requirements gated on `spec.instance: true`.
///
/// Instance challenges run as per-team containers, so `image` and `port`
/// become required; a missing key and a present-but-malformed value are
/// distinct findings. Static challenges never have either field checked.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let Some(spec) = &doc.spec else { return };
    if !spec.is_instance() {
        return;
    }

    match spec.get("image") {
        None => {
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_SPEC_INSTANCE_GATED.to_string(),
                code: ids::CODE_MISSING_IMAGE.to_string(),
                message: "missing spec.image (required when instance: true)".to_string(),
                location: doc_location(doc),
                help: Some(image_help()),
                url: None,
                fingerprint: None,
                data: Value::Null,
            });
        }
        Some(image) => {
            let valid = image.as_str().is_some_and(|s| IMAGE_RE.is_match(s));
            if !valid {
                out.push(Finding {
                    severity: Severity::Error,
                    check_id: ids::CHECK_SPEC_INSTANCE_GATED.to_string(),
                    code: ids::CODE_INVALID_IMAGE.to_string(),
                    message: format!(
                        "invalid spec.image '{}': must match '{}/<name>:<tag>'",
                        display_value(Some(image)),
                        IMAGE_REPOSITORY
                    ),
                    location: doc_location(doc),
                    help: Some(image_help()),
                    url: None,
                    fingerprint: None,
                    data: json!({ "image": value_to_json(Some(image)) }),
                });
            }
        }
    }

    match spec.get("port") {
        None => {
            out.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_SPEC_INSTANCE_GATED.to_string(),
                code: ids::CODE_MISSING_PORT.to_string(),
                message: "missing spec.port (required when instance: true)".to_string(),
                location: doc_location(doc),
                help: Some(port_help()),
                url: None,
                fingerprint: None,
                data: Value::Null,
            });
        }
        Some(port) => {
            let valid = port.as_int().is_some_and(|p| (1..=65535).contains(&p));
            if !valid {
                out.push(Finding {
                    severity: Severity::Error,
                    check_id: ids::CHECK_SPEC_INSTANCE_GATED.to_string(),
                    code: ids::CODE_INVALID_PORT.to_string(),
                    message: format!(
                        "invalid spec.port: must be an integer in 1-65535, got '{}'",
                        display_value(Some(port))
                    ),
                    location: doc_location(doc),
                    help: Some(port_help()),
                    url: None,
                    fingerprint: None,
                    data: json!({ "port": value_to_json(Some(port)) }),
                });
            }
        }
    }
}

fn image_help() -> String {
    format!("Reference an image under '{IMAGE_REPOSITORY}' with an explicit tag.")
}

fn port_help() -> String {
    "Set port to an integer between 1 and 65535.".to_string()
}
