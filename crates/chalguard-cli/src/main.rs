//! CLI entry point for chalguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All business logic lives in the `chalguard-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use chalguard_app::{
    parse_report_json, render_annotations, render_markdown, run_check, run_explain,
    runtime_error_report, serialize_report, to_renderable, verdict_exit_code, CheckInput,
    ExplainOutput,
};
use chalguard_types::{ChalguardReport, Verdict};
use clap::{Parser, Subcommand};

/// Exit code for process-level aborts (filesystem unreadable, artifact
/// unwritable). `1` is reserved for the merge-gate "validation failed" signal.
const EXIT_ABORT: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "chalguard",
    version,
    about = "Challenge manifest validation gate for CTF repositories"
)]
struct Cli {
    /// Repository root (directory containing the challenge folders).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every Challenge.yaml and write the report artifact.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/chalguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/chalguard/summary.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/chalguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/chalguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit (default 10, per GHA best practices).
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "sops.envelope") or code (e.g., "missing_sops") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_check(&cli, report_out.clone(), write_markdown, markdown_out.clone()),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn cmd_check(
    cli: &Cli,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
) -> anyhow::Result<()> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !repo_root.exists() {
            anyhow::bail!("repo root does not exist: {}", repo_root);
        }

        let output = run_check(CheckInput {
            repo_root: &repo_root,
        })?;
        let report = &output.report;

        write_report_file(&report_out, report).context("write report json")?;

        if write_markdown {
            let renderable = to_renderable(report);
            let md = render_markdown(&renderable);
            write_text_file(&markdown_out, &md).context("write markdown")?;
        }

        print_summary(report);

        Ok(verdict_exit_code(report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(cli.repo_root.as_str(), &format!("{err:#}"));
            let _ = write_report_file(&report_out, &report);
            eprintln!("chalguard error: {err:#}");
            std::process::exit(EXIT_ABORT);
        }
    }
}

fn print_summary(report: &ChalguardReport) {
    match report.verdict {
        Verdict::Skip => {
            eprintln!("chalguard: no Challenge.yaml files found");
        }
        Verdict::Pass => {
            eprintln!(
                "chalguard: {} document(s) scanned, all valid",
                report.data.documents_scanned
            );
        }
        Verdict::Fail => {
            eprintln!(
                "chalguard: {} document(s) scanned, {} failing, {} finding(s)",
                report.data.documents_scanned,
                report.data.documents_failed,
                report.data.findings_total
            );
        }
    }
}

fn write_report_file(path: &camino::Utf8Path, report: &ChalguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &camino::Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);
    let md = render_markdown(&renderable);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);
    let annotations = render_annotations(&renderable, max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", chalguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                chalguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
