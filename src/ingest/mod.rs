//! Output-file ingestion — plugin run output in, decoded module trees out
//!
//! The dep-tree plugins report where they wrote their per-module JSON
//! dumps as a newline-separated path list on stdout. This layer turns
//! that raw block into decoded [`ModuleDepTree`] records, in file order.

use std::fs;
use std::path::Path;

use crate::graph::plugin_tree::ModuleDepTree;
use crate::{GavelError, GavelResult};

/// Decode every file named in `raw` (UTF-8 text, one path per line,
/// surrounding whitespace ignored, blank lines skipped).
///
/// The first unreadable or malformed file aborts the whole batch; no
/// partial results are returned.
pub fn parse_dep_tree_output(raw: &[u8]) -> GavelResult<Vec<ModuleDepTree>> {
    let text = String::from_utf8_lossy(raw);
    let mut modules = Vec::new();
    for line in text.lines() {
        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        modules.push(parse_dep_tree_file(Path::new(path))?);
    }
    Ok(modules)
}

fn parse_dep_tree_file(path: &Path) -> GavelResult<ModuleDepTree> {
    let contents = fs::read_to_string(path).map_err(|source| GavelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| GavelError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tree_file(dir: &Path, name: &str, json: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parses_files_in_list_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_tree_file(
            dir.path(),
            "first.json",
            r#"{"root": "m1", "nodes": {"m1": {"children": ["a"]}}}"#,
        );
        let second = write_tree_file(dir.path(), "second.json", r#"{"root": "m2", "nodes": {}}"#);

        let raw = format!("{}\n{}\n", first.display(), second.display());
        let modules = parse_dep_tree_output(raw.as_bytes()).unwrap();

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].root, "m1");
        assert_eq!(modules[1].root, "m2");
    }

    #[test]
    fn test_trims_whitespace_and_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tree_file(dir.path(), "tree.json", r#"{"root": "m", "nodes": {}}"#);

        let raw = format!("\n  {}  \n\n", path.display());
        let modules = parse_dep_tree_output(raw.as_bytes()).unwrap();
        assert_eq!(modules.len(), 1);
    }

    #[test]
    fn test_unreadable_path_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_tree_file(dir.path(), "good.json", r#"{"root": "m", "nodes": {}}"#);
        let missing = dir.path().join("missing.json");

        let raw = format!("{}\n{}\n", missing.display(), good.display());
        match parse_dep_tree_output(raw.as_bytes()) {
            Err(GavelError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_tree_file(dir.path(), "bad.json", "{not json");

        match parse_dep_tree_output(format!("{}\n", bad.display()).as_bytes()) {
            Err(GavelError::Decode { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
