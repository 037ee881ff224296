use chalguard_types::RepoPath;
use std::collections::BTreeMap;
use std::fmt;

/// Literal discriminators of the CTFChallenge resource family.
///
/// These are contract constants of the CRD, not configuration.
pub const EXPECTED_API_VERSION: &str = "skyline.local/v1";
pub const EXPECTED_KIND: &str = "CTFChallenge";
pub const EXPECTED_NAMESPACE: &str = "ctfd";

/// Field-level marker SOPS leaves on an individually encrypted value.
pub const FLAG_ENCRYPTION_MARKER: &str = "ENC[";

/// Registry path prefix all instance challenge images must live under.
pub const IMAGE_REPOSITORY: &str = "ghcr.io/sp00kyskelet0n/skylinectf-challenges";

/// Spec fields that are required in every challenge, instance or static.
pub const REQUIRED_SPEC_FIELDS: &[&str] = &["name", "description", "category", "points", "flag"];

/// A scalar or composite value from a parsed document.
///
/// Checks do explicit typed access on this instead of downcasting a format
/// library's value type, so the domain can name the offending value or kind
/// in its findings without depending on the parser.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Name of the value's kind, for "expected X, got <kind>" messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::Seq(_) => "list",
            FieldValue::Map(_) => "mapping",
        }
    }
}

impl fmt::Display for FieldValue {
    /// Scalar values render as themselves; composites render as their kind.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::Seq(_) => write!(f, "<list>"),
            FieldValue::Map(_) => write!(f, "<mapping>"),
        }
    }
}

/// The `metadata` section of a challenge document.
///
/// Only present when the section exists and is a non-empty mapping; the
/// fields keep raw values so checks can report wrong kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub name: Option<FieldValue>,
    pub namespace: Option<FieldValue>,
}

/// The `spec` section of a challenge document.
///
/// The full mapping is retained: the required-fields rule distinguishes a
/// key that is absent from a key that is present with a null value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChallengeSpec {
    pub entries: BTreeMap<String, FieldValue>,
}

impl ChallengeSpec {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether this challenge runs as a per-team instance.
    ///
    /// Only a literal boolean `true` gates the instance requirements;
    /// anything else (including truthy strings) is treated as static.
    pub fn is_instance(&self) -> bool {
        matches!(self.get("instance"), Some(FieldValue::Bool(true)))
    }

    /// Recognized but currently inert: no rule consumes `upload_files` yet.
    pub fn upload_files(&self) -> bool {
        matches!(self.get("upload_files"), Some(FieldValue::Bool(true)))
    }
}

/// One parsed Challenge.yaml, immutable once loaded.
///
/// The engine only reads this; all mutation happens at construction time in
/// the parse layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeDoc {
    /// Repo-relative path to the originating file.
    pub path: RepoPath,
    pub api_version: Option<FieldValue>,
    pub kind: Option<FieldValue>,
    /// `None` when the section is absent, empty, or not a mapping.
    pub metadata: Option<Metadata>,
    /// `None` when the section is absent, empty, or not a mapping.
    pub spec: Option<ChallengeSpec>,
    /// Whether a top-level `sops` key exists (contents are opaque).
    pub has_sops: bool,
}

/// Why a document never made it into a [`ChallengeDoc`].
///
/// A parse failure is terminal for that document only: it becomes the
/// document's single finding and no other rules run against it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseFailure {
    #[error("invalid YAML: {cause}")]
    InvalidYaml {
        cause: String,
        line: Option<u32>,
        col: Option<u32>,
    },

    #[error("empty or invalid document: top level must be a mapping")]
    EmptyDocument,
}

/// One discovered document, parsed or not, as handed to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentInput {
    Parsed(ChallengeDoc),
    Unparsed { path: RepoPath, failure: ParseFailure },
}

impl DocumentInput {
    pub fn path(&self) -> &RepoPath {
        match self {
            DocumentInput::Parsed(doc) => &doc.path,
            DocumentInput::Unparsed { path, .. } => path,
        }
    }
}
