//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after document examples.
    pub examples: ExamplePair,
}

/// Before and after document examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Document that would trigger a finding.
    pub before: &'static str,
    /// Document that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    // Try check_id first, then code
    match identifier {
        // Check IDs
        ids::CHECK_DOC_SYNTAX | ids::CODE_INVALID_YAML | ids::CODE_EMPTY_DOCUMENT => {
            Some(explain_doc_syntax())
        }
        ids::CHECK_SCHEMA_API_VERSION | ids::CODE_API_VERSION_MISMATCH => {
            Some(explain_api_version())
        }
        ids::CHECK_SCHEMA_KIND | ids::CODE_KIND_MISMATCH => Some(explain_kind()),
        ids::CHECK_SCHEMA_METADATA
        | ids::CODE_MISSING_METADATA
        | ids::CODE_MISSING_NAME
        | ids::CODE_NAME_NOT_STRING
        | ids::CODE_INVALID_NAME
        | ids::CODE_WRONG_NAMESPACE => Some(explain_metadata()),
        ids::CHECK_CROSSREF_FOLDER_NAME | ids::CODE_FOLDER_MISMATCH => {
            Some(explain_folder_name())
        }
        ids::CHECK_SPEC_REQUIRED_FIELDS
        | ids::CODE_MISSING_SPEC
        | ids::CODE_MISSING_REQUIRED_FIELD => Some(explain_required_fields()),
        ids::CHECK_SPEC_POINTS | ids::CODE_INVALID_POINTS => Some(explain_points()),
        ids::CHECK_SPEC_FLAG_ENCRYPTION
        | ids::CODE_FLAG_NOT_STRING
        | ids::CODE_UNENCRYPTED_FLAG => Some(explain_flag_encryption()),
        ids::CHECK_SPEC_INSTANCE_GATED
        | ids::CODE_MISSING_IMAGE
        | ids::CODE_INVALID_IMAGE
        | ids::CODE_MISSING_PORT
        | ids::CODE_INVALID_PORT => Some(explain_instance_gated()),
        ids::CHECK_SOPS_ENVELOPE | ids::CODE_MISSING_SOPS => Some(explain_sops_envelope()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_DOC_SYNTAX,
        ids::CHECK_SCHEMA_API_VERSION,
        ids::CHECK_SCHEMA_KIND,
        ids::CHECK_SCHEMA_METADATA,
        ids::CHECK_CROSSREF_FOLDER_NAME,
        ids::CHECK_SPEC_REQUIRED_FIELDS,
        ids::CHECK_SPEC_POINTS,
        ids::CHECK_SPEC_FLAG_ENCRYPTION,
        ids::CHECK_SPEC_INSTANCE_GATED,
        ids::CHECK_SOPS_ENVELOPE,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_INVALID_YAML,
        ids::CODE_EMPTY_DOCUMENT,
        ids::CODE_API_VERSION_MISMATCH,
        ids::CODE_KIND_MISMATCH,
        ids::CODE_MISSING_METADATA,
        ids::CODE_MISSING_NAME,
        ids::CODE_NAME_NOT_STRING,
        ids::CODE_INVALID_NAME,
        ids::CODE_WRONG_NAMESPACE,
        ids::CODE_FOLDER_MISMATCH,
        ids::CODE_MISSING_SPEC,
        ids::CODE_MISSING_REQUIRED_FIELD,
        ids::CODE_INVALID_POINTS,
        ids::CODE_FLAG_NOT_STRING,
        ids::CODE_UNENCRYPTED_FLAG,
        ids::CODE_MISSING_IMAGE,
        ids::CODE_INVALID_IMAGE,
        ids::CODE_MISSING_PORT,
        ids::CODE_INVALID_PORT,
        ids::CODE_MISSING_SOPS,
    ]
}

fn explain_doc_syntax() -> Explanation {
    Explanation {
        title: "Document Syntax",
        description: "\
A Challenge.yaml must parse as YAML and its top level must be a non-empty
mapping. A document that fails here is reported with a single syntax finding
and no other rules are evaluated for it: every other rule needs a parsed
structure to look at.",
        remediation: "\
Fix the YAML syntax error reported in the finding message, or restore the
top-level mapping (apiVersion/kind/metadata/spec/sops). An empty file or a
top-level list is never a valid challenge definition.",
        examples: ExamplePair {
            before: r#"apiVersion: skyline.local/v1
kind: [unterminated"#,
            after: r#"apiVersion: skyline.local/v1
kind: CTFChallenge"#,
        },
    }
}

fn explain_api_version() -> Explanation {
    Explanation {
        title: "API Version",
        description: "\
Every challenge document must declare `apiVersion: skyline.local/v1`. The
value is a literal discriminator for the CTFChallenge resource family; the
cluster operator rejects anything else, so catching it at review time keeps
broken definitions out of the deploy pipeline.",
        remediation: "\
Set the top-level `apiVersion` field to exactly `skyline.local/v1`. There is
no version negotiation: older or custom API groups are not served.",
        examples: ExamplePair {
            before: r#"apiVersion: skyline.local/v2
kind: CTFChallenge"#,
            after: r#"apiVersion: skyline.local/v1
kind: CTFChallenge"#,
        },
    }
}

fn explain_kind() -> Explanation {
    Explanation {
        title: "Resource Kind",
        description: "\
Every challenge document must declare `kind: CTFChallenge`. The kind is what
routes the document to the challenge controller; a typo here silently turns
the file into an unknown resource.",
        remediation: "Set the top-level `kind` field to exactly `CTFChallenge`.",
        examples: ExamplePair {
            before: r#"apiVersion: skyline.local/v1
kind: Challenge"#,
            after: r#"apiVersion: skyline.local/v1
kind: CTFChallenge"#,
        },
    }
}

fn explain_metadata() -> Explanation {
    Explanation {
        title: "Metadata Section",
        description: "\
The `metadata` section must be a non-empty mapping with:
- `name`: a lowercase RFC 1123 subdomain (lowercase alphanumerics, `-` or
  `.`, each label starting and ending with an alphanumeric). The name becomes
  a Kubernetes object name, so anything else is rejected at apply time.
- `namespace`: exactly `ctfd`. Challenges deployed anywhere else are
  invisible to the platform.",
        remediation: "\
Rename the challenge to a lowercase RFC 1123 subdomain (e.g. `buffer-overflow`,
not `Buffer_Overflow`) and set `namespace: ctfd`.",
        examples: ExamplePair {
            before: r#"metadata:
  name: My_Challenge
  namespace: default"#,
            after: r#"metadata:
  name: my-challenge
  namespace: ctfd"#,
        },
    }
}

fn explain_folder_name() -> Explanation {
    Explanation {
        title: "Folder Name Cross-Reference",
        description: "\
`metadata.name` must equal the lowercased name of the folder containing the
Challenge.yaml. Deploy tooling derives resource identity from the directory
layout, so a mismatch means the deployed name and the repository layout
disagree about which challenge this is.",
        remediation: "\
Rename either the folder or `metadata.name` so they agree (folder names are
compared lowercased).",
        examples: ExamplePair {
            before: r#"# web/hello-web/Challenge.yaml
metadata:
  name: hello-world"#,
            after: r#"# web/hello-web/Challenge.yaml
metadata:
  name: hello-web"#,
        },
    }
}

fn explain_required_fields() -> Explanation {
    Explanation {
        title: "Required Spec Fields",
        description: "\
`spec` must be a non-empty mapping and must always contain `name`,
`description`, `category`, `points`, and `flag`. Each missing key is reported
as its own finding so a half-filled spec produces a complete list of what is
still needed.",
        remediation: "Add every missing field listed in the findings to the `spec` mapping.",
        examples: ExamplePair {
            before: r#"spec:
  name: Hello Web
  points: 100"#,
            after: r#"spec:
  name: Hello Web
  description: A warmup web challenge.
  category: web
  points: 100
  flag: ENC[AES256_GCM,data:...,type:str]"#,
        },
    }
}

fn explain_points() -> Explanation {
    Explanation {
        title: "Points Value",
        description: "\
`spec.points` must be an integer strictly greater than zero. Scoreboard math
breaks on zero or negative values, and a quoted number is a string the
platform will not coerce. Booleans are not accepted either, even though some
languages treat them as integers.",
        remediation: "Set `points` to an unquoted positive integer.",
        examples: ExamplePair {
            before: r#"spec:
  points: "100""#,
            after: r#"spec:
  points: 100"#,
        },
    }
}

fn explain_flag_encryption() -> Explanation {
    Explanation {
        title: "Flag Encryption Marker",
        description: "\
`spec.flag` must be a string beginning with `ENC[`, the marker SOPS leaves on
an individually encrypted value. A flag without the marker is stored in
plaintext in the repository, which defeats the point of the challenge. The
validator only checks the marker; it never decrypts or interprets the value.",
        remediation: "\
Encrypt the file with SOPS so the flag value is replaced by an
`ENC[AES256_GCM,...]` token. Never commit a plaintext flag.",
        examples: ExamplePair {
            before: r#"spec:
  flag: flag{plaintext-oops}"#,
            after: r#"spec:
  flag: ENC[AES256_GCM,data:Tzc...,type:str]"#,
        },
    }
}

fn explain_instance_gated() -> Explanation {
    Explanation {
        title: "Instance Challenge Requirements",
        description: "\
When `spec.instance: true` the challenge runs as a per-team container, so
`spec.image` and `spec.port` become required:
- `image` must match `ghcr.io/sp00kyskelet0n/skylinectf-challenges/<name>:<tag>`
  (images outside the owned registry path are not deployed).
- `port` must be an integer in 1-65535.
Static challenges (`instance` absent or false) never need either field.",
        remediation: "\
Add the missing fields, or set `instance: false` if the challenge is static.
Push the image to the `skylinectf-challenges` registry path and reference it
with an explicit tag.",
        examples: ExamplePair {
            before: r#"spec:
  instance: true"#,
            after: r#"spec:
  instance: true
  image: ghcr.io/sp00kyskelet0n/skylinectf-challenges/hello-web:latest
  port: 8080"#,
        },
    }
}

fn explain_sops_envelope() -> Explanation {
    Explanation {
        title: "SOPS Encryption Envelope",
        description: "\
The document must contain a top-level `sops` key, which SOPS adds when it
encrypts a file. Its presence signals that the whole file, not just the flag
field, went through the encryption pipeline. The contents of the section are
opaque to the validator.",
        remediation: "\
Run `sops --encrypt --in-place Challenge.yaml` (with the repository's SOPS
configuration) instead of committing the plaintext file.",
        examples: ExamplePair {
            before: r#"apiVersion: skyline.local/v1
kind: CTFChallenge
spec:
  flag: ENC[AES256_GCM,data:...,type:str]"#,
            after: r#"apiVersion: skyline.local/v1
kind: CTFChallenge
spec:
  flag: ENC[AES256_GCM,data:...,type:str]
sops:
  version: 3.8.1
  lastmodified: "2024-01-01T00:00:00Z""#,
        },
    }
}
