use super::{
    api_version, flag_encryption, folder_name, instance_gated, kind, metadata, points,
    sops_envelope, spec_required, utils,
};
use crate::model::{ChallengeDoc, FieldValue, Metadata};
use crate::test_support::{
    instance_doc, metadata as meta, spec_with, valid_doc, valid_spec_entries,
};
use chalguard_types::ids;
use std::collections::BTreeMap;

fn doc() -> ChallengeDoc {
    valid_doc("web/hello-web/Challenge.yaml", "hello-web")
}

#[test]
fn api_version_accepts_only_the_literal() {
    let mut out = Vec::new();
    api_version::run(&doc(), &mut out);
    assert!(out.is_empty());

    let cases: Vec<Option<FieldValue>> = vec![
        None,
        Some(FieldValue::Str("skyline.local/v2".to_string())),
        Some(FieldValue::Int(1)),
        Some(FieldValue::Null),
    ];
    for api_version in cases {
        let mut d = doc();
        d.api_version = api_version.clone();
        let mut out = Vec::new();
        api_version::run(&d, &mut out);
        assert_eq!(out.len(), 1, "case {api_version:?}");
        assert_eq!(out[0].code, ids::CODE_API_VERSION_MISMATCH);
        assert!(out[0].message.contains("expected 'skyline.local/v1'"));
    }
}

#[test]
fn api_version_error_is_exactly_one_even_when_everything_else_is_broken() {
    let d = ChallengeDoc {
        path: chalguard_types::RepoPath::new("x/y/Challenge.yaml"),
        api_version: None,
        kind: None,
        metadata: None,
        spec: None,
        has_sops: false,
    };
    let mut out = Vec::new();
    api_version::run(&d, &mut out);
    assert_eq!(out.len(), 1);
}

#[test]
fn kind_accepts_only_the_literal() {
    let mut out = Vec::new();
    kind::run(&doc(), &mut out);
    assert!(out.is_empty());

    let mut d = doc();
    d.kind = Some(FieldValue::Str("Challenge".to_string()));
    let mut out = Vec::new();
    kind::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_KIND_MISMATCH);
    assert!(out[0].message.contains("got 'Challenge'"));
}

#[test]
fn missing_metadata_is_one_error_and_skips_sub_rules() {
    let mut d = doc();
    d.metadata = None;
    let mut out = Vec::new();
    metadata::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_METADATA);
}

#[test]
fn metadata_name_rules() {
    // Absent and null both read as missing.
    for name in [None, Some(FieldValue::Null)] {
        let mut d = doc();
        d.metadata = Some(Metadata {
            name,
            namespace: Some(FieldValue::Str("ctfd".to_string())),
        });
        let mut out = Vec::new();
        metadata::run(&d, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ids::CODE_MISSING_NAME);
    }

    // Wrong kind.
    let mut d = doc();
    d.metadata = Some(Metadata {
        name: Some(FieldValue::Int(42)),
        namespace: Some(FieldValue::Str("ctfd".to_string())),
    });
    let mut out = Vec::new();
    metadata::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_NAME_NOT_STRING);
    assert!(out[0].message.contains("got integer"));

    // Grammar violations.
    for bad in ["My-Name", "-leading", "trailing-", "under_score", "", "a..b"] {
        let mut d = doc();
        d.metadata = Some(meta(bad));
        let mut out = Vec::new();
        metadata::run(&d, &mut out);
        assert_eq!(out.len(), 1, "name {bad:?}");
        assert_eq!(out[0].code, ids::CODE_INVALID_NAME);
    }

    // Grammar-valid names, including dotted subdomains.
    for good in ["my-name", "a", "chal.web.skyline", "x0-9y"] {
        let mut d = doc();
        d.metadata = Some(meta(good));
        let mut out = Vec::new();
        metadata::run(&d, &mut out);
        assert!(out.is_empty(), "name {good:?} -> {out:?}");
    }
}

#[test]
fn metadata_namespace_must_be_ctfd() {
    let mut d = doc();
    d.metadata = Some(Metadata {
        name: Some(FieldValue::Str("hello-web".to_string())),
        namespace: Some(FieldValue::Str("default".to_string())),
    });
    let mut out = Vec::new();
    metadata::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_WRONG_NAMESPACE);
    assert!(out[0].message.contains("got 'default'"));

    // Absent namespace reports the same rule with a null value.
    let mut d = doc();
    d.metadata = Some(Metadata {
        name: Some(FieldValue::Str("hello-web".to_string())),
        namespace: None,
    });
    let mut out = Vec::new();
    metadata::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert!(out[0].message.contains("got 'null'"));
}

#[test]
fn folder_name_matches_lowercased_parent_folder() {
    // Name equal to the folder passes.
    let mut out = Vec::new();
    folder_name::run(&doc(), &mut out);
    assert!(out.is_empty());

    // Mixed-case folder compares lowercased.
    let d = valid_doc("web/Hello-Web/Challenge.yaml", "hello-web");
    let mut out = Vec::new();
    folder_name::run(&d, &mut out);
    assert!(out.is_empty());

    // Same name under a different folder fails.
    let d = valid_doc("web/other/Challenge.yaml", "hello-web");
    let mut out = Vec::new();
    folder_name::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_FOLDER_MISMATCH);
    assert!(out[0].message.contains("'hello-web'"));
    assert!(out[0].message.contains("'other'"));
}

#[test]
fn folder_name_skips_when_name_is_missing_or_malformed() {
    // Malformed names are already reported by the metadata check.
    let mut d = valid_doc("web/other/Challenge.yaml", "My-Name");
    let mut out = Vec::new();
    folder_name::run(&d, &mut out);
    assert!(out.is_empty());

    d.metadata = None;
    let mut out = Vec::new();
    folder_name::run(&d, &mut out);
    assert!(out.is_empty());
}

#[test]
fn missing_spec_is_one_error() {
    let mut d = doc();
    d.spec = None;
    let mut out = Vec::new();
    spec_required::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_SPEC);
}

#[test]
fn each_missing_required_field_is_its_own_error() {
    let mut d = doc();
    d.spec = Some(spec_with(&[(
        "name",
        FieldValue::Str("Hello".to_string()),
    )]));
    let mut out = Vec::new();
    spec_required::run(&d, &mut out);

    let missing: Vec<&str> = out
        .iter()
        .map(|f| f.data["field"].as_str().unwrap())
        .collect();
    assert_eq!(missing, vec!["description", "category", "points", "flag"]);
    for f in &out {
        assert_eq!(f.code, ids::CODE_MISSING_REQUIRED_FIELD);
    }
}

#[test]
fn required_field_present_with_null_value_satisfies_presence() {
    let mut entries = valid_spec_entries();
    entries[3] = ("points", FieldValue::Null);
    let mut d = doc();
    d.spec = Some(spec_with(&entries));
    let mut out = Vec::new();
    spec_required::run(&d, &mut out);
    assert!(out.is_empty());
}

#[test]
fn points_must_be_a_positive_integer() {
    let bad = vec![
        FieldValue::Int(0),
        FieldValue::Int(-5),
        FieldValue::Str("10".to_string()),
        FieldValue::Bool(true),
        FieldValue::Float(10.5),
    ];
    for value in bad {
        let mut entries = valid_spec_entries();
        entries[3] = ("points", value.clone());
        let mut d = doc();
        d.spec = Some(spec_with(&entries));
        let mut out = Vec::new();
        points::run(&d, &mut out);
        assert_eq!(out.len(), 1, "points {value:?}");
        assert_eq!(out[0].code, ids::CODE_INVALID_POINTS);
    }

    let mut out = Vec::new();
    points::run(&doc(), &mut out);
    assert!(out.is_empty());

    // Null and absent skip the value rule entirely.
    for entries in [
        {
            let mut e = valid_spec_entries();
            e[3] = ("points", FieldValue::Null);
            e
        },
        valid_spec_entries()[..3].to_vec(),
    ] {
        let mut d = doc();
        d.spec = Some(spec_with(&entries));
        let mut out = Vec::new();
        points::run(&d, &mut out);
        assert!(out.is_empty());
    }
}

#[test]
fn flag_must_carry_the_encryption_marker() {
    let mut out = Vec::new();
    flag_encryption::run(&doc(), &mut out);
    assert!(out.is_empty());

    let mut entries = valid_spec_entries();
    entries[4] = ("flag", FieldValue::Str("plaintext".to_string()));
    let mut d = doc();
    d.spec = Some(spec_with(&entries));
    let mut out = Vec::new();
    flag_encryption::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_UNENCRYPTED_FLAG);

    let mut entries = valid_spec_entries();
    entries[4] = ("flag", FieldValue::Int(1234));
    let mut d = doc();
    d.spec = Some(spec_with(&entries));
    let mut out = Vec::new();
    flag_encryption::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_FLAG_NOT_STRING);
}

#[test]
fn instance_true_requires_image_and_port() {
    let mut entries = valid_spec_entries();
    entries.push(("instance", FieldValue::Bool(true)));
    let mut d = doc();
    d.spec = Some(spec_with(&entries));

    let mut out = Vec::new();
    instance_gated::run(&d, &mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].code, ids::CODE_MISSING_IMAGE);
    assert_eq!(out[1].code, ids::CODE_MISSING_PORT);
}

#[test]
fn instance_false_ignores_image_and_port_entirely() {
    // Absent image/port: no findings.
    let mut out = Vec::new();
    instance_gated::run(&doc(), &mut out);
    assert!(out.is_empty());

    // Present but malformed image/port: still no findings when static.
    let mut entries = valid_spec_entries();
    entries.push(("instance", FieldValue::Bool(false)));
    entries.push(("image", FieldValue::Str("docker.io/evil:latest".to_string())));
    entries.push(("port", FieldValue::Int(999999)));
    let mut d = doc();
    d.spec = Some(spec_with(&entries));
    let mut out = Vec::new();
    instance_gated::run(&d, &mut out);
    assert!(out.is_empty());
}

#[test]
fn only_a_literal_boolean_true_gates_the_instance_rules() {
    for truthy_but_not_bool in [
        FieldValue::Str("true".to_string()),
        FieldValue::Int(1),
    ] {
        let mut entries = valid_spec_entries();
        entries.push(("instance", truthy_but_not_bool));
        let mut d = doc();
        d.spec = Some(spec_with(&entries));
        let mut out = Vec::new();
        instance_gated::run(&d, &mut out);
        assert!(out.is_empty());
    }
}

#[test]
fn instance_image_must_match_the_registry_grammar() {
    let valid = instance_doc("web/hello-web/Challenge.yaml", "hello-web");
    let mut out = Vec::new();
    instance_gated::run(&valid, &mut out);
    assert!(out.is_empty());

    let bad_images = [
        "docker.io/library/nginx:latest",
        "ghcr.io/sp00kyskelet0n/skylinectf-challenges/Hello:latest",
        "ghcr.io/sp00kyskelet0n/skylinectf-challenges/hello-web",
        "ghcr.io/sp00kyskelet0n/other/hello-web:latest",
    ];
    for image in bad_images {
        let mut entries = valid_spec_entries();
        entries.push(("instance", FieldValue::Bool(true)));
        entries.push(("image", FieldValue::Str(image.to_string())));
        entries.push(("port", FieldValue::Int(8080)));
        let mut d = doc();
        d.spec = Some(spec_with(&entries));
        let mut out = Vec::new();
        instance_gated::run(&d, &mut out);
        assert_eq!(out.len(), 1, "image {image:?}");
        assert_eq!(out[0].code, ids::CODE_INVALID_IMAGE);
    }

    // A non-string image is present-but-malformed, not missing.
    let mut entries = valid_spec_entries();
    entries.push(("instance", FieldValue::Bool(true)));
    entries.push(("image", FieldValue::Null));
    entries.push(("port", FieldValue::Int(8080)));
    let mut d = doc();
    d.spec = Some(spec_with(&entries));
    let mut out = Vec::new();
    instance_gated::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_INVALID_IMAGE);
}

#[test]
fn instance_port_must_be_in_range() {
    for (port, ok) in [
        (FieldValue::Int(1), true),
        (FieldValue::Int(65535), true),
        (FieldValue::Int(0), false),
        (FieldValue::Int(65536), false),
        (FieldValue::Str("8080".to_string()), false),
        (FieldValue::Bool(true), false),
    ] {
        let mut entries = valid_spec_entries();
        entries.push(("instance", FieldValue::Bool(true)));
        entries.push((
            "image",
            FieldValue::Str(
                "ghcr.io/sp00kyskelet0n/skylinectf-challenges/hello-web:latest".to_string(),
            ),
        ));
        entries.push(("port", port.clone()));
        let mut d = doc();
        d.spec = Some(spec_with(&entries));
        let mut out = Vec::new();
        instance_gated::run(&d, &mut out);
        if ok {
            assert!(out.is_empty(), "port {port:?}");
        } else {
            assert_eq!(out.len(), 1, "port {port:?}");
            assert_eq!(out[0].code, ids::CODE_INVALID_PORT);
        }
    }
}

#[test]
fn upload_files_is_recognized_but_drives_no_rule() {
    let mut entries = valid_spec_entries();
    entries.push(("upload_files", FieldValue::Bool(true)));
    let mut d = doc();
    d.spec = Some(spec_with(&entries));

    assert!(d.spec.as_ref().unwrap().upload_files());

    let mut out = Vec::new();
    super::run_all(&d, &mut out);
    assert!(out.is_empty());
}

#[test]
fn sops_envelope_is_independent_of_the_flag_marker() {
    let mut d = doc();
    d.has_sops = false;
    let mut out = Vec::new();
    sops_envelope::run(&d, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_SOPS);

    // Plaintext flag AND missing envelope: both reported.
    let mut entries = valid_spec_entries();
    entries[4] = ("flag", FieldValue::Str("plaintext".to_string()));
    d.spec = Some(spec_with(&entries));
    let mut out = Vec::new();
    super::run_all(&d, &mut out);
    let codes: Vec<&str> = out.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec![ids::CODE_UNENCRYPTED_FLAG, ids::CODE_MISSING_SOPS]);
}

#[test]
fn subdomain_grammar_edge_cases() {
    assert!(utils::SUBDOMAIN_RE.is_match("a"));
    assert!(utils::SUBDOMAIN_RE.is_match("0chal"));
    assert!(utils::SUBDOMAIN_RE.is_match("a-b.c-d"));
    assert!(!utils::SUBDOMAIN_RE.is_match("a-"));
    assert!(!utils::SUBDOMAIN_RE.is_match(".a"));
    assert!(!utils::SUBDOMAIN_RE.is_match("a b"));
    assert!(!utils::SUBDOMAIN_RE.is_match("UPPER"));
}

#[test]
fn spec_builder_preserves_unknown_fields() {
    // Free-form spec mapping: unknown keys are carried, not rejected.
    let mut map = BTreeMap::new();
    map.insert("custom".to_string(), FieldValue::Bool(true));
    let mut d = doc();
    d.spec = Some(crate::model::ChallengeSpec { entries: map });
    let mut out = Vec::new();
    points::run(&d, &mut out);
    assert!(out.is_empty());
}
