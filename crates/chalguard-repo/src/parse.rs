use chalguard_domain::model::{
    ChallengeDoc, ChallengeSpec, DocumentInput, FieldValue, Metadata, ParseFailure,
};
use chalguard_types::RepoPath;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Parse one document's text into engine input.
///
/// Parse failures are data, not errors: a syntactically broken or empty file
/// becomes `DocumentInput::Unparsed` and is reported against that document
/// alone. Nothing here aborts the run.
pub fn parse_document(path: RepoPath, text: &str) -> DocumentInput {
    let value: Value = match serde_yaml::from_str(text) {
        Ok(v) => v,
        Err(err) => {
            let (line, col) = err
                .location()
                .map(|loc| (Some(loc.line() as u32), Some(loc.column() as u32)))
                .unwrap_or((None, None));
            return DocumentInput::Unparsed {
                path,
                failure: ParseFailure::InvalidYaml {
                    cause: err.to_string(),
                    line,
                    col,
                },
            };
        }
    };

    let Value::Mapping(root) = value else {
        return DocumentInput::Unparsed {
            path,
            failure: ParseFailure::EmptyDocument,
        };
    };
    if root.is_empty() {
        return DocumentInput::Unparsed {
            path,
            failure: ParseFailure::EmptyDocument,
        };
    }

    let get = |key: &str| root.get(key);

    let doc = ChallengeDoc {
        path,
        api_version: get("apiVersion").map(to_field_value),
        kind: get("kind").map(to_field_value),
        metadata: get("metadata").and_then(to_metadata),
        spec: get("spec").and_then(to_spec),
        has_sops: get("sops").is_some(),
    };

    DocumentInput::Parsed(doc)
}

/// `None` when the section is absent semantics apply: not a mapping, or an
/// empty mapping, both read as a missing section.
fn to_metadata(value: &Value) -> Option<Metadata> {
    let map = as_nonempty_mapping(value)?;
    Some(Metadata {
        name: map.get("name").cloned(),
        namespace: map.get("namespace").cloned(),
    })
}

fn to_spec(value: &Value) -> Option<ChallengeSpec> {
    let entries = as_nonempty_mapping(value)?;
    Some(ChallengeSpec { entries })
}

fn as_nonempty_mapping(value: &Value) -> Option<BTreeMap<String, FieldValue>> {
    let untagged = untag(value);
    let Value::Mapping(map) = untagged else { return None };
    if map.is_empty() {
        return None;
    }

    let mut out = BTreeMap::new();
    for (key, val) in map {
        // Non-string keys have no meaning in the CRD; they are dropped rather
        // than rejected, matching a dynamic reader's `.get("...")` behavior.
        if let Some(k) = key.as_str() {
            out.insert(k.to_string(), to_field_value(val));
        }
    }
    Some(out)
}

fn to_field_value(value: &Value) -> FieldValue {
    match untag(value) {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Int(i)
            } else {
                FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => FieldValue::Str(s.clone()),
        Value::Sequence(items) => FieldValue::Seq(items.iter().map(to_field_value).collect()),
        Value::Mapping(map) => {
            let mut out = BTreeMap::new();
            for (key, val) in map {
                if let Some(k) = key.as_str() {
                    out.insert(k.to_string(), to_field_value(val));
                }
            }
            FieldValue::Map(out)
        }
        // Unreachable: untag never returns Tagged.
        Value::Tagged(_) => FieldValue::Null,
    }
}

/// Strip YAML tags: `!!str foo` reads as `foo`.
fn untag(value: &Value) -> &Value {
    let mut v = value;
    while let Value::Tagged(tagged) = v {
        v = &tagged.value;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DocumentInput {
        parse_document(RepoPath::new("web/chal/Challenge.yaml"), text)
    }

    fn parsed(text: &str) -> ChallengeDoc {
        match parse(text) {
            DocumentInput::Parsed(doc) => doc,
            other => panic!("expected parsed document, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_full_challenge() {
        let doc = parsed(
            r#"
apiVersion: skyline.local/v1
kind: CTFChallenge
metadata:
  name: chal
  namespace: ctfd
spec:
  name: Chal
  description: d
  category: web
  points: 100
  flag: ENC[AES256_GCM,data:x,type:str]
  instance: true
  image: ghcr.io/sp00kyskelet0n/skylinectf-challenges/chal:latest
  port: 8080
sops:
  version: 3.8.1
"#,
        );

        assert_eq!(
            doc.api_version,
            Some(FieldValue::Str("skyline.local/v1".to_string()))
        );
        assert_eq!(doc.kind, Some(FieldValue::Str("CTFChallenge".to_string())));
        let metadata = doc.metadata.expect("metadata");
        assert_eq!(metadata.name, Some(FieldValue::Str("chal".to_string())));
        let spec = doc.spec.expect("spec");
        assert_eq!(spec.get("points"), Some(&FieldValue::Int(100)));
        assert!(spec.is_instance());
        assert!(doc.has_sops);
    }

    #[test]
    fn yaml_syntax_error_becomes_unparsed_with_location() {
        let input = parse("apiVersion: [unterminated");
        let DocumentInput::Unparsed { failure, .. } = input else {
            panic!("expected unparsed");
        };
        let ParseFailure::InvalidYaml { cause, .. } = failure else {
            panic!("expected invalid yaml");
        };
        assert!(!cause.is_empty());
    }

    #[test]
    fn empty_and_non_mapping_documents_are_unparsed() {
        for text in ["", "---\n", "- a\n- b\n", "just a scalar\n", "{}\n"] {
            let input = parse(text);
            assert!(
                matches!(
                    input,
                    DocumentInput::Unparsed {
                        failure: ParseFailure::EmptyDocument,
                        ..
                    }
                ),
                "text {text:?} -> {input:?}"
            );
        }
    }

    #[test]
    fn empty_or_non_mapping_sections_read_as_missing() {
        let doc = parsed("apiVersion: v1\nmetadata: {}\nspec: not-a-mapping\n");
        assert!(doc.metadata.is_none());
        assert!(doc.spec.is_none());
        assert!(!doc.has_sops);
    }

    #[test]
    fn sops_presence_is_detected_for_any_value() {
        assert!(parsed("kind: x\nsops: null\n").has_sops);
        assert!(parsed("kind: x\nsops: {}\n").has_sops);
        assert!(!parsed("kind: x\n").has_sops);
    }

    #[test]
    fn scalar_kinds_survive_conversion() {
        let doc = parsed(
            "kind: x\nspec:\n  a: true\n  b: 3\n  c: 3.5\n  d: text\n  e: null\n  f: [1]\n",
        );
        let spec = doc.spec.expect("spec");
        assert_eq!(spec.get("a"), Some(&FieldValue::Bool(true)));
        assert_eq!(spec.get("b"), Some(&FieldValue::Int(3)));
        assert_eq!(spec.get("c"), Some(&FieldValue::Float(3.5)));
        assert_eq!(spec.get("d"), Some(&FieldValue::Str("text".to_string())));
        assert_eq!(spec.get("e"), Some(&FieldValue::Null));
        assert_eq!(spec.get("f"), Some(&FieldValue::Seq(vec![FieldValue::Int(1)])));
    }

    #[test]
    fn quoted_numbers_stay_strings() {
        let doc = parsed("kind: x\nspec:\n  points: \"100\"\n");
        let spec = doc.spec.expect("spec");
        assert_eq!(spec.get("points"), Some(&FieldValue::Str("100".to_string())));
    }
}
