//! Developer tasks (schema generation, contract conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

const REPORT_SCHEMA_FILE: &str = "chalguard.report.v1.json";

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            std::env::current_dir().expect("Cannot determine current directory")
        });

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .expect("xtask has no parent")
            .to_path_buf()
    } else {
        manifest_dir
    }
}

fn contracts_schemas_dir() -> PathBuf {
    project_root().join("contracts").join("schemas")
}

fn test_fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// The report schema, pretty-printed with a trailing newline. Generated and
/// verified byte-for-byte so CI can catch drift between the Rust types and
/// the committed contract.
fn report_schema_json() -> anyhow::Result<String> {
    let schema = schema_for!(chalguard_types::ChalguardReport);
    let mut json = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = contracts_schemas_dir();
    fs::create_dir_all(&dir).context("create contracts/schemas directory")?;

    let path = dir.join(REPORT_SCHEMA_FILE);
    fs::write(&path, report_schema_json()?)
        .with_context(|| format!("write schema to {}", path.display()))?;
    println!("Wrote {}", path.display());

    Ok(())
}

fn validate_schemas() -> anyhow::Result<()> {
    let path = contracts_schemas_dir().join(REPORT_SCHEMA_FILE);
    if !path.exists() {
        eprintln!("Missing schema: {}", path.display());
        eprintln!("\nRun `cargo xtask emit-schemas` to generate it.");
        bail!("Schema validation failed");
    }

    let committed =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    if committed != report_schema_json()? {
        eprintln!("Schema out of date: {}", path.display());
        eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
        bail!("Schema validation failed");
    }

    println!("All schemas are up to date.");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate the report JSON Schema into contracts/schemas/");
    eprintln!("  validate-schemas  Check contracts/schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture golden reports against chalguard.report.v1");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

/// Token pattern for finding codes: lowercase snake_case.
fn is_valid_code(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Check IDs are dotted snake_case tokens, e.g. `schema.api_version`.
fn is_valid_check_id(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_valid_code)
}

/// A clean path is repo-relative: no absolute paths, no `../`, forward
/// slashes only, no Windows drive letters.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Validate chalguard.report.v1 conformance of the fixture golden reports.
///
/// Checks, per `expected.report.json`:
/// 1. validates against the committed chalguard.report.v1 schema
/// 2. every document and location path is clean
/// 3. every check_id and code matches its token grammar
fn conform() -> anyhow::Result<()> {
    let schema_path = contracts_schemas_dir().join(REPORT_SCHEMA_FILE);
    if !schema_path.exists() {
        bail!(
            "{} not found at {}\n\nRun `cargo xtask emit-schemas` first.",
            REPORT_SCHEMA_FILE,
            schema_path.display()
        );
    }

    let schema_content = fs::read_to_string(&schema_path)
        .with_context(|| format!("read {}", schema_path.display()))?;
    let mut schema_value: serde_json::Value =
        serde_json::from_str(&schema_content).context("parse report schema as JSON")?;
    // Remove $id since it's a logical identifier, not a resolvable URL.
    // The jsonschema crate tries to resolve $id as a URI.
    if let Some(obj) = schema_value.as_object_mut() {
        obj.remove("$id");
    }

    let compiled = jsonschema::draft7::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("compile schema: {}", e))?;

    println!("✓ {} compiles", REPORT_SCHEMA_FILE);

    let fixtures_dir = test_fixtures_dir();
    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for entry in fs::read_dir(&fixtures_dir).context("read tests/fixtures/")? {
        let entry = entry?;
        let golden_path = entry.path().join("expected.report.json");
        if !golden_path.exists() {
            continue;
        }

        let fixture_name = entry.file_name().to_string_lossy().to_string();
        let content = fs::read_to_string(&golden_path)
            .with_context(|| format!("read golden report for '{}'", fixture_name))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("parse golden report for '{}'", fixture_name))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", fixture_name, err));
        }

        check_hygiene(&fixture_name, &value, &mut errors);

        fixture_count += 1;
        println!("  ✓ {} validates", fixture_name);
    }

    if fixture_count == 0 {
        bail!("No golden reports found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!(
        "\n✓ All {} fixture golden reports pass conformance checks!",
        fixture_count
    );
    Ok(())
}

fn check_hygiene(fixture: &str, report: &serde_json::Value, errors: &mut Vec<String>) {
    let Some(documents) = report.get("documents").and_then(|v| v.as_array()) else {
        return;
    };

    for (d, doc) in documents.iter().enumerate() {
        if let Some(path) = doc.get("path").and_then(|v| v.as_str()) {
            if !is_clean_path(path) {
                errors.push(format!(
                    "{}: documents[{}].path '{}' is not clean (repo-relative, forward slashes)",
                    fixture, d, path
                ));
            }
        }

        let Some(findings) = doc.get("findings").and_then(|v| v.as_array()) else {
            continue;
        };
        for (i, finding) in findings.iter().enumerate() {
            if let Some(path) = finding
                .get("location")
                .and_then(|l| l.get("path"))
                .and_then(|v| v.as_str())
            {
                if !is_clean_path(path) {
                    errors.push(format!(
                        "{}: documents[{}].findings[{}].location.path '{}' is not clean",
                        fixture, d, i, path
                    ));
                }
            }
            if let Some(check_id) = finding.get("check_id").and_then(|v| v.as_str()) {
                if !is_valid_check_id(check_id) {
                    errors.push(format!(
                        "{}: documents[{}].findings[{}].check_id '{}' is not a valid token",
                        fixture, d, i, check_id
                    ));
                }
            }
            if let Some(code) = finding.get("code").and_then(|v| v.as_str()) {
                if !is_valid_code(code) {
                    errors.push(format!(
                        "{}: documents[{}].findings[{}].code '{}' is not a valid token",
                        fixture, d, i, code
                    ));
                }
            }
        }
    }
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = chalguard_types::explain::all_check_ids();
    let codes = chalguard_types::explain::all_codes();

    let mut errors = Vec::new();

    for identifier in check_ids.iter().chain(codes.iter()) {
        match chalguard_types::lookup_explanation(identifier) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("'{}' has empty title", identifier));
                }
                if exp.description.is_empty() {
                    errors.push(format!("'{}' has empty description", identifier));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("'{}' has empty remediation", identifier));
                }
            }
            None => {
                errors.push(format!("'{}' has no explanation", identifier));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", REPORT_SCHEMA_FILE.trim_end_matches(".json"));
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
