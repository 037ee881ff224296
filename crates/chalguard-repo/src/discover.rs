use camino::{Utf8Path, Utf8PathBuf};
use chalguard_types::RepoPath;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// File name every challenge definition must use.
pub const CHALLENGE_FILE_NAME: &str = "Challenge.yaml";

/// Discover challenge documents under `repo_root`.
///
/// Behavior:
/// - collect every file named `Challenge.yaml`
/// - never descend into hidden directories or directories named `scripts`
/// - return repo-relative paths in a stable sorted order
pub fn discover_challenges(repo_root: &Utf8Path) -> anyhow::Result<Vec<RepoPath>> {
    let mut out: Vec<RepoPath> = Vec::new();

    for abs in WalkDir::new(repo_root)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == CHALLENGE_FILE_NAME)
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
    {
        let rel = abs
            .strip_prefix(repo_root)
            .unwrap_or(&abs)
            .as_str()
            .replace('\\', "/");
        out.push(RepoPath::new(&rel));
    }

    // Stable order: the report mirrors this.
    out.sort();
    out.dedup();

    Ok(out)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    // Depth 0 is the walk root itself; skipping it would skip everything.
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || name == "scripts")
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
