//! Recursive, exclusion-aware file search over the user directories.

use crate::model::FileHit;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Hits for one named search root. Roots without hits are omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHits {
    pub root: String,
    pub hits: Vec<FileHit>,
}

/// Case-insensitive substring search of the path fragment below each root.
///
/// An exclusion fragment suppresses an entry when it occurs anywhere in the
/// path leading up to the entry's own name; the entry itself may still match
/// an excluded name. Results come back in traversal order.
pub fn search(roots: &[(String, PathBuf)], phrase: &str, exclusions: &[String]) -> Vec<RootHits> {
    let phrase = phrase.to_lowercase();
    let mut results = Vec::new();
    for (name, root) in roots {
        let hits = search_root(root, &phrase, exclusions);
        if !hits.is_empty() {
            results.push(RootHits {
                root: name.clone(),
                hits,
            });
        }
    }
    results
}

fn search_root(root: &Path, phrase_lower: &str, exclusions: &[String]) -> Vec<FileHit> {
    let mut hits = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        let ancestors = match path.parent() {
            Some(parent) => parent.to_string_lossy(),
            None => continue,
        };
        if exclusions
            .iter()
            .any(|ex| !ex.is_empty() && ancestors.contains(ex.as_str()))
        {
            continue;
        }
        let Ok(fragment) = path.strip_prefix(root) else {
            continue;
        };
        if fragment
            .to_string_lossy()
            .to_lowercase()
            .contains(phrase_lower)
        {
            hits.push(FileHit {
                path: path.to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }
    }
    hits
}
