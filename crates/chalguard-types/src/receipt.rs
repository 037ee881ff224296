use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Stable schema identifier for chalguard reports.
pub const SCHEMA_REPORT_V1: &str = "chalguard.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
///
/// The fixed CRD rule set only emits `Error` today; the other levels exist so
/// the envelope shape does not change if advisory rules are added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub path: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Stable identifier intended for dedup and trending. A hash of:
    /// `check_id + code + document path + message`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

/// Verdict for the whole run.
///
/// `Skip` is the "nothing to validate" terminal state: zero documents were
/// discovered. It is distinct from `Pass` (at least one document, all clean).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Per-document validation outcome. Findings stay in check declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentReport {
    pub path: RepoPath,
    pub findings: Vec<Finding>,
}

impl DocumentReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Chalguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ChalguardData {
    pub root: String,

    pub documents_scanned: u32,
    pub documents_failed: u32,

    pub findings_total: u32,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows chalguard to embed tool-specific data while
/// still enforcing a stable outer shape. The envelope deliberately carries no
/// timestamps or host metadata: re-running on an unchanged tree must produce a
/// byte-identical report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ChalguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub verdict: Verdict,
    pub documents: Vec<DocumentReport>,
    pub data: TData,
}

pub type ChalguardReport = ReportEnvelope<ChalguardData>;
