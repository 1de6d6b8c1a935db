//! The application-entry index: deduplication, category buckets, sorting.

use crate::desktop::{self, ParseContext};
use crate::model::AppEntry;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub visible: usize,
    pub hidden: usize,
    pub duplicates: usize,
    pub unparsed: usize,
}

impl fmt::Display for RebuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} entries (+{} hidden)", self.visible, self.hidden)
    }
}

/// Owns the full entry collection. Rebuilt wholesale; never patched in place.
#[derive(Debug, Default)]
pub struct EntryIndex {
    entries: Vec<AppEntry>,
    by_id: HashMap<String, usize>,
    buckets: HashMap<&'static str, Vec<String>>,
}

impl EntryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous collection and parse the given descriptor paths.
    ///
    /// Ids collide on file base name; the first seen wins and later ones are
    /// counted as duplicates. Unreadable files are counted and skipped.
    pub fn rebuild(&mut self, paths: &[PathBuf], ctx: &ParseContext) -> RebuildSummary {
        self.entries.clear();
        self.by_id.clear();
        self.buckets.clear();

        let mut summary = RebuildSummary::default();
        let mut seen = HashSet::new();
        let mut parsed = Vec::new();

        for path in paths {
            let Some(id) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if seen.contains(&id) {
                summary.duplicates += 1;
                continue;
            }
            let entry = match desktop::parse_file(&id, path, ctx) {
                Ok(entry) => entry,
                Err(err) => {
                    summary.unparsed += 1;
                    debug!("skipping unreadable {}: {err}", path.display());
                    continue;
                }
            };
            seen.insert(id);
            if entry.hidden {
                summary.hidden += 1;
            }
            self.assign_bucket(&entry);
            parsed.push(entry);
        }

        summary.visible = parsed.len() - summary.hidden;
        parsed.sort_by_cached_key(|e| e.localized_name.to_lowercase());
        self.by_id = parsed
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        self.entries = parsed;
        summary
    }

    fn assign_bucket(&mut self, entry: &AppEntry) {
        let Some(bucket) = bucket_for(&entry.categories) else {
            return;
        };
        let ids = self.buckets.entry(bucket).or_default();
        if !ids.iter().any(|id| id == &entry.id) {
            ids.push(entry.id.clone());
        }
    }

    /// Entries sorted by localized name, case-insensitively.
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&AppEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Ids assigned to a bucket, in insertion order.
    pub fn bucket(&self, name: &str) -> &[String] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// First raw category token matching a group assigns the bucket; a non-empty
/// string matching nothing goes to "other"; an empty string goes nowhere.
pub fn bucket_for(categories: &str) -> Option<&'static str> {
    if categories.is_empty() {
        return None;
    }
    for token in categories.split(';') {
        let bucket = match token {
            "Utility" => "utility",
            "Development" => "development",
            "Game" => "game",
            "Graphics" => "graphics",
            "Network" => "internet-and-network",
            "Office" | "Science" | "Education" => "office",
            "AudioVideo" | "Audio" | "Video" => "audio-video",
            "Settings" | "System" | "DesktopSettings" | "PackageManager" => "system-tools",
            _ => continue,
        };
        return Some(bucket);
    }
    Some("other")
}

/// Non-recursive scan of the descriptor directories for *.desktop files,
/// sorted per directory so rebuilds are deterministic.
pub fn list_desktop_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in dirs {
        let Ok(read_dir) = fs::read_dir(dir) else {
            continue;
        };
        let mut batch: Vec<PathBuf> = read_dir
            .flatten()
            .map(|e| e.path())
            .filter(|p| has_desktop_suffix(p))
            .collect();
        batch.sort();
        paths.append(&mut batch);
    }
    paths
}

pub fn has_desktop_suffix(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("desktop")
}
