use crate::{RenderableReport, RenderableSeverity, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Chalguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Fail => "FAIL",
        RenderableVerdict::Skip => "SKIP",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Documents: {} scanned, {} failing\n- Findings: {}\n\n",
        verdict,
        report.data.documents_scanned,
        report.data.documents_failed,
        report.data.findings_total
    ));

    if report.documents.is_empty() {
        out.push_str("No Challenge.yaml documents found.\n");
        return out;
    }

    for doc in &report.documents {
        if doc.findings.is_empty() {
            out.push_str(&format!("## ✅ `{}`\n\nNo findings.\n\n", doc.path));
            continue;
        }

        out.push_str(&format!("## ❌ `{}`\n\n", doc.path));
        for f in &doc.findings {
            let sev = match f.severity {
                RenderableSeverity::Info => "INFO",
                RenderableSeverity::Warning => "WARN",
                RenderableSeverity::Error => "ERROR",
            };
            out.push_str(&format!(
                "- [{}] `{}` / `{}`: {}\n",
                sev, f.check_id, f.code, f.message
            ));
            if let Some(help) = &f.help {
                out.push_str(&format!("  - help: {}\n", help));
            }
        }
        out.push('\n');
    }

    out
}
