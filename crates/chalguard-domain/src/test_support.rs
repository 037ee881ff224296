//! Builders shared by the check and engine tests.

use crate::model::{ChallengeDoc, ChallengeSpec, FieldValue, Metadata};
use chalguard_types::RepoPath;
use std::collections::BTreeMap;

pub fn metadata(name: &str) -> Metadata {
    Metadata {
        name: Some(FieldValue::Str(name.to_string())),
        namespace: Some(FieldValue::Str("ctfd".to_string())),
    }
}

pub fn spec_with(entries: &[(&str, FieldValue)]) -> ChallengeSpec {
    let mut map = BTreeMap::new();
    for (key, value) in entries {
        map.insert((*key).to_string(), value.clone());
    }
    ChallengeSpec { entries: map }
}

pub fn valid_spec_entries() -> Vec<(&'static str, FieldValue)> {
    vec![
        ("name", FieldValue::Str("Hello Web".to_string())),
        ("description", FieldValue::Str("A warmup.".to_string())),
        ("category", FieldValue::Str("web".to_string())),
        ("points", FieldValue::Int(100)),
        (
            "flag",
            FieldValue::Str("ENC[AES256_GCM,data:abc,type:str]".to_string()),
        ),
    ]
}

/// A static challenge that passes every rule when `name` matches the folder
/// in `path`.
pub fn valid_doc(path: &str, name: &str) -> ChallengeDoc {
    ChallengeDoc {
        path: RepoPath::new(path),
        api_version: Some(FieldValue::Str("skyline.local/v1".to_string())),
        kind: Some(FieldValue::Str("CTFChallenge".to_string())),
        metadata: Some(metadata(name)),
        spec: Some(spec_with(&valid_spec_entries())),
        has_sops: true,
    }
}

/// An instance challenge (image + port present and valid).
pub fn instance_doc(path: &str, name: &str) -> ChallengeDoc {
    let mut entries = valid_spec_entries();
    entries.push(("instance", FieldValue::Bool(true)));
    entries.push((
        "image",
        FieldValue::Str(format!(
            "ghcr.io/sp00kyskelet0n/skylinectf-challenges/{name}:latest"
        )),
    ));
    entries.push(("port", FieldValue::Int(8080)));

    let mut doc = valid_doc(path, name);
    doc.spec = Some(spec_with(&entries));
    doc
}
