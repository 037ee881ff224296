use super::utils::{doc_location, SUBDOMAIN_RE};
use crate::model::{ChallengeDoc, FieldValue};
use chalguard_types::{ids, Finding, Severity};
use serde_json::json;

/// Cross-reference rule binding declared identity to storage location:
/// `metadata.name` must equal the lowercased parent folder name.
///
/// Gated on a present, grammar-valid name so a malformed name is reported
/// once (by the metadata check) instead of twice.
pub fn run(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    let Some(metadata) = &doc.metadata else { return };
    let Some(FieldValue::Str(name)) = &metadata.name else { return };
    if !SUBDOMAIN_RE.is_match(name) {
        return;
    }

    // Documents directly at the repo root have no folder to agree with.
    let Some(folder) = doc.path.parent_dir_name() else { return };

    if *name != folder.to_lowercase() {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_CROSSREF_FOLDER_NAME.to_string(),
            code: ids::CODE_FOLDER_MISMATCH.to_string(),
            message: format!(
                "metadata.name '{}' does not match folder name '{}' (lowercased: '{}')",
                name,
                folder,
                folder.to_lowercase()
            ),
            location: doc_location(doc),
            help: Some("Rename the folder or metadata.name so they agree.".to_string()),
            url: None,
            fingerprint: None,
            data: json!({ "name": name, "folder": folder }),
        });
    }
}
