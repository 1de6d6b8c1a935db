use std::path::PathBuf;

/// The 9 fixed category buckets. "other" must stay last.
pub const CATEGORY_NAMES: [&str; 9] = [
    "utility",
    "development",
    "game",
    "graphics",
    "internet-and-network",
    "office",
    "audio-video",
    "system-tools",
    "other",
];

/// One parsed .desktop descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppEntry {
    pub id: String,                // descriptor file base name, e.g. "firefox.desktop"
    pub name: String,
    pub localized_name: String,    // falls back to `name` when no Name[<lang>] key
    pub comment: String,
    pub localized_comment: String, // same fallback rule
    pub icon: String,              // theme name, absolute path, or file name with extension
    pub exec: String,              // quotes stripped, truncated at the first '%'
    pub categories: String,        // raw ';'-delimited string, pre-bucketing
    pub terminal: bool,
    pub hidden: bool,              // resolved display suppression flag
}

/// One category bucket, loaded from a .directory descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub display_name: String,
    pub icon: String,
}

/// One file-search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHit {
    pub path: PathBuf,
    pub is_dir: bool,
}
