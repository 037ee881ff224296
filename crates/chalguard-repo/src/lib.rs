//! Repository adapters: discover challenge documents and parse their YAML.
//!
//! This crate is allowed to do filesystem IO. It should not spawn external
//! processes; the repo root is an explicit input, never the ambient working
//! directory.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use chalguard_domain::model::DocumentInput;
use rayon::prelude::*;

pub use discover::{discover_challenges, CHALLENGE_FILE_NAME};
pub use parse::parse_document;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;
    use chalguard_types::RepoPath;

    /// Parse arbitrary text as a challenge document.
    ///
    /// Any input yields a `DocumentInput` (parsed or unparsed). **Never
    /// panics.**
    pub fn parse_challenge(text: &str) -> DocumentInput {
        parse::parse_document(RepoPath::new("fuzz/Challenge.yaml"), text)
    }
}

/// Discover and load every challenge document under `repo_root`.
///
/// Each document's validation input is a pure function of its own bytes and
/// location, so loading is parallel; the returned order still mirrors the
/// (sorted) discovery order. Only an unreadable filesystem is an error here;
/// unparseable documents come back as `DocumentInput::Unparsed`.
pub fn load_documents(repo_root: &Utf8Path) -> anyhow::Result<Vec<DocumentInput>> {
    let paths = discover::discover_challenges(repo_root).context("discover challenges")?;

    paths
        .par_iter()
        .map(|path| {
            let abs = repo_root.join(path.as_str());
            let text = std::fs::read_to_string(&abs).with_context(|| format!("read {abs}"))?;
            Ok(parse::parse_document(path.clone(), &text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use chalguard_domain::model::ParseFailure;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    #[test]
    fn load_documents_preserves_discovery_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("web/zz/Challenge.yaml"), "kind: CTFChallenge\n");
        write_file(&root.join("crypto/aa/Challenge.yaml"), "kind: CTFChallenge\n");
        write_file(&root.join("pwn/mm/Challenge.yaml"), "not: [valid\n");

        let docs = load_documents(&root).expect("load");
        let paths: Vec<&str> = docs.iter().map(|d| d.path().as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "crypto/aa/Challenge.yaml",
                "pwn/mm/Challenge.yaml",
                "web/zz/Challenge.yaml"
            ]
        );

        // The broken document is a per-document outcome, not a run error.
        assert!(matches!(
            docs[1],
            DocumentInput::Unparsed {
                failure: ParseFailure::InvalidYaml { .. },
                ..
            }
        ));
    }

    #[test]
    fn load_documents_empty_tree_is_ok_and_empty() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let docs = load_documents(&root).expect("load");
        assert!(docs.is_empty());
    }

    proptest! {
        #[test]
        fn fuzz_parser_never_panics(input in ".*") {
            let _ = fuzz::parse_challenge(&input);
        }
    }
}
