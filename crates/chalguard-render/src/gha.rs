use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line},col={col}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for doc in &report.documents {
        for f in &doc.findings {
            let level = match f.severity {
                RenderableSeverity::Error => "error",
                RenderableSeverity::Warning => "warning",
                RenderableSeverity::Info => "notice",
            };

            let mut meta = String::new();
            if let Some(loc) = &f.location {
                meta.push_str(&format!("file={}", loc.path));
                if let Some(line) = loc.line {
                    meta.push_str(&format!(",line={}", line));
                }
                if let Some(col) = loc.col {
                    meta.push_str(&format!(",col={}", col));
                }
            }

            let message = format!("[{}:{}] {}", f.check_id, f.code, f.message)
                .replace('%', "%25")
                .replace('\r', "%0D")
                .replace('\n', "%0A");

            if meta.is_empty() {
                out.push(format!("::{}::{}", level, message));
            } else {
                out.push(format!("::{} {}::{}", level, meta, message));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RenderableData, RenderableDocument, RenderableFinding, RenderableLocation,
        RenderableVerdict,
    };

    #[test]
    fn formats_annotation_with_location_and_escapes() {
        let report = RenderableReport {
            verdict: RenderableVerdict::Fail,
            documents: vec![RenderableDocument {
                path: "web/chal/Challenge.yaml".to_string(),
                findings: vec![RenderableFinding {
                    severity: RenderableSeverity::Error,
                    check_id: "doc.syntax".to_string(),
                    code: "invalid_yaml".to_string(),
                    message: "invalid YAML: 100% broken\nsecond line".to_string(),
                    location: Some(RenderableLocation {
                        path: "web/chal/Challenge.yaml".to_string(),
                        line: Some(3),
                        col: Some(7),
                    }),
                    help: None,
                }],
            }],
            data: RenderableData {
                documents_scanned: 1,
                documents_failed: 1,
                findings_total: 1,
            },
        };

        let annotations = render_github_annotations(&report);
        assert_eq!(annotations.len(), 1);
        assert_eq!(
            annotations[0],
            "::error file=web/chal/Challenge.yaml,line=3,col=7::[doc.syntax:invalid_yaml] invalid YAML: 100%25 broken%0Asecond line"
        );
    }
}
