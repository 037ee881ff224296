use anyhow::Context;
use chalguard_render::{
    RenderableData, RenderableDocument, RenderableFinding, RenderableLocation, RenderableReport,
    RenderableSeverity, RenderableVerdict,
};
use chalguard_types::{
    ids, ChalguardData, ChalguardReport, DocumentReport, Finding, RepoPath, Severity, Verdict,
    SCHEMA_REPORT_V1,
};

pub fn parse_report_json(text: &str) -> anyhow::Result<ChalguardReport> {
    let report: ChalguardReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

pub fn serialize_report(report: &ChalguardReport) -> anyhow::Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(report).context("serialize report")?;
    out.push(b'\n');
    Ok(out)
}

pub fn to_renderable(report: &ChalguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Fail => RenderableVerdict::Fail,
            Verdict::Skip => RenderableVerdict::Skip,
        },
        documents: report
            .documents
            .iter()
            .map(|doc| RenderableDocument {
                path: doc.path.as_str().to_string(),
                findings: doc.findings.iter().map(renderable_finding).collect(),
            })
            .collect(),
        data: RenderableData {
            documents_scanned: report.data.documents_scanned,
            documents_failed: report.data.documents_failed,
            findings_total: report.data.findings_total,
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
    }
}

/// Report emitted when the tool itself could not complete the run (an
/// external-collaborator failure, not a validation outcome).
pub fn runtime_error_report(root: &str, message: &str) -> ChalguardReport {
    ChalguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: crate::check::tool_meta(),
        verdict: Verdict::Fail,
        documents: vec![DocumentReport {
            path: RepoPath::new("."),
            findings: vec![Finding {
                severity: Severity::Error,
                check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
                code: ids::CODE_RUNTIME_ERROR.to_string(),
                message: message.to_string(),
                location: None,
                help: Some("Fix the tool error and re-run chalguard.".to_string()),
                url: None,
                fingerprint: None,
                data: serde_json::Value::Null,
            }],
        }],
        data: ChalguardData {
            root: root.to_string(),
            documents_scanned: 0,
            documents_failed: 1,
            findings_total: 1,
        },
    }
}
