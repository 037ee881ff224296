//! The `check` use case: validate every challenge and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use chalguard_types::{ChalguardReport, ToolMeta, Verdict, SCHEMA_REPORT_V1};

/// Input for the check use case.
#[derive(Clone, Copy, Debug)]
pub struct CheckInput<'a> {
    /// Repository root path (explicit input, never the ambient cwd).
    pub repo_root: &'a Utf8Path,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ChalguardReport,
}

/// Run the check use case: discover documents, evaluate rules, build the
/// envelope.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let documents = chalguard_repo::load_documents(input.repo_root).context("load documents")?;

    let domain_report = chalguard_domain::evaluate(input.repo_root.as_str(), &documents);

    let report = ChalguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        verdict: domain_report.verdict,
        documents: domain_report.documents,
        data: domain_report.data,
    };

    Ok(CheckOutput { report })
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "chalguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Map verdict to the CI merge-gate exit code: 0 = pass or nothing to
/// validate, 1 = at least one failing document.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Skip => 0,
        Verdict::Fail => 1,
    }
}
