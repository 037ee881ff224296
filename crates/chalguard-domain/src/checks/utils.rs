use crate::model::{ChallengeDoc, FieldValue, IMAGE_REPOSITORY};
use chalguard_types::Location;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// Lowercase RFC 1123 subdomain: dot-separated labels of lowercase
/// alphanumerics and internal hyphens, each starting and ending alphanumeric.
pub static SUBDOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("subdomain regex is valid")
});

/// Registry-path grammar for instance challenge images:
/// `<registry>/<owner>/<repo>/<lowercase-alnum-hyphen-name>:<tag>`.
pub static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^{}/[a-z0-9][-a-z0-9]*:.+$",
        regex::escape(IMAGE_REPOSITORY)
    ))
    .expect("image regex is valid")
});

pub fn doc_location(doc: &ChallengeDoc) -> Option<Location> {
    Some(Location {
        path: doc.path.clone(),
        line: None,
        col: None,
    })
}

/// Render a possibly-absent field for "expected X, got 'Y'" messages.
pub fn display_value(value: Option<&FieldValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

pub fn value_to_json(value: Option<&FieldValue>) -> Value {
    match value {
        None | Some(FieldValue::Null) => Value::Null,
        Some(FieldValue::Bool(b)) => json!(b),
        Some(FieldValue::Int(i)) => json!(i),
        Some(FieldValue::Float(f)) => json!(f),
        Some(FieldValue::Str(s)) => json!(s),
        Some(FieldValue::Seq(items)) => {
            Value::Array(items.iter().map(|v| value_to_json(Some(v))).collect())
        }
        Some(FieldValue::Map(entries)) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(Some(v))))
                .collect(),
        ),
    }
}
