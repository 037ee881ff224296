use crate::checks;
use crate::fingerprint::fingerprint_for_finding;
use crate::model::{DocumentInput, ParseFailure};
use crate::report::DomainReport;
use chalguard_types::{ids, ChalguardData, DocumentReport, Finding, Location, Severity, Verdict};
use serde_json::Value;

/// Evaluate one document: a parse failure becomes its single finding, a
/// parsed document runs the full rule list. Findings keep check declaration
/// order; fingerprints are filled in here.
pub fn evaluate_document(input: &DocumentInput) -> DocumentReport {
    let mut findings: Vec<Finding> = Vec::new();

    match input {
        DocumentInput::Unparsed { path, failure } => {
            let (code, line, col) = match failure {
                ParseFailure::InvalidYaml { line, col, .. } => {
                    (ids::CODE_INVALID_YAML, *line, *col)
                }
                ParseFailure::EmptyDocument => (ids::CODE_EMPTY_DOCUMENT, None, None),
            };
            findings.push(Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_DOC_SYNTAX.to_string(),
                code: code.to_string(),
                message: failure.to_string(),
                location: Some(Location {
                    path: path.clone(),
                    line,
                    col,
                }),
                help: Some("Fix the document so it parses as a YAML mapping.".to_string()),
                url: None,
                fingerprint: None,
                data: Value::Null,
            });
        }
        DocumentInput::Parsed(doc) => {
            checks::run_all(doc, &mut findings);
        }
    }

    let path = input.path().clone();
    for f in &mut findings {
        f.fingerprint = Some(fingerprint_for_finding(
            &f.check_id,
            &f.code,
            path.as_str(),
            &f.message,
        ));
    }

    DocumentReport { path, findings }
}

/// Evaluate every discovered document and aggregate the run verdict.
///
/// Zero documents is the distinct "nothing to validate" state (`Skip`), not a
/// pass and not a failure.
pub fn evaluate(root: &str, inputs: &[DocumentInput]) -> DomainReport {
    let documents: Vec<DocumentReport> = inputs.iter().map(evaluate_document).collect();

    let documents_failed = documents.iter().filter(|d| !d.is_clean()).count() as u32;
    let findings_total = documents.iter().map(|d| d.findings.len() as u32).sum();

    let verdict = if documents.is_empty() {
        Verdict::Skip
    } else if documents_failed > 0 {
        Verdict::Fail
    } else {
        Verdict::Pass
    };

    DomainReport {
        verdict,
        documents,
        data: ChalguardData {
            root: root.to_string(),
            documents_scanned: inputs.len() as u32,
            documents_failed,
            findings_total,
        },
    }
}
