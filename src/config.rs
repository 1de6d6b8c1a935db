//! Configuration file, XDG directory resolution and small text-file loaders.

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use log::{debug, info, warn};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_terminal")]
    pub terminal: String,
    #[serde(default = "default_file_manager")]
    pub file_manager: String,
    /// Dispatch launches through "sway", "hyprland" or "uwsm"; empty = direct.
    #[serde(default)]
    pub wm: String,
    pub lang: Option<String>,
}

/// $TERM is "linux" rather than empty when started from a compositor
/// key binding, hence the extra check.
fn default_terminal() -> String {
    match env::var("TERM") {
        Ok(term) if !term.trim().is_empty() && term.trim() != "linux" => term.trim().to_string(),
        _ => "foot".to_string(),
    }
}

fn default_file_manager() -> String {
    "thunar".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            terminal: default_terminal(),
            file_manager: default_file_manager(),
            wm: String::new(),
            lang: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchConfig {
    /// Shortest phrase that triggers a file-search walk.
    #[serde(default = "default_min_phrase_len")]
    pub min_phrase_len: usize,
}

fn default_min_phrase_len() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_phrase_len: default_min_phrase_len(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "hatch", "hatch")
}

pub fn load_config() -> Result<Config> {
    let config_path = match project_dirs() {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    };
    if !config_path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", config_path.display()))?;
    Ok(config)
}

/// Per-user config dir, created if missing. Unresolvable = fatal.
pub fn config_dir() -> Result<PathBuf> {
    let dirs = project_dirs().context("couldn't determine config directory location")?;
    let dir = dirs.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    info!("Config dir: {}", dir.display());
    Ok(dir)
}

/// Per-user cache dir (pin cache lives here). Unresolvable = fatal.
pub fn cache_dir() -> Result<PathBuf> {
    let dirs = project_dirs().context("couldn't determine cache directory location")?;
    let dir = dirs.cache_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Per-user data dir (lock file lives here). Unresolvable = fatal.
pub fn data_home() -> Result<PathBuf> {
    let dirs = project_dirs().context("couldn't determine data directory location")?;
    let dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// First $XDG_DATA_DIRS member carrying our desktop-directories set.
pub fn drawer_data_dir() -> Option<PathBuf> {
    for dir in xdg_data_dirs() {
        let candidate = dir.join("hatch");
        if candidate.join("desktop-directories").is_dir() {
            info!("Data dir: {}", candidate.display());
            return Some(candidate);
        }
    }
    warn!("Data dir not found");
    None
}

fn xdg_data_dirs() -> Vec<PathBuf> {
    let raw = env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share/:/usr/share/".to_string());
    raw.split(':').map(PathBuf::from).collect()
}

/// All existing application-descriptor directories, deduplicated:
/// the user data home, every $XDG_DATA_DIRS member, and flatpak exports.
pub fn app_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let home = BaseDirs::new().map(|b| b.home_dir().to_path_buf());

    match env::var("XDG_DATA_HOME") {
        Ok(data_home) if !data_home.is_empty() => {
            dirs.push(PathBuf::from(data_home).join("applications"));
        }
        _ => {
            if let Some(home) = &home {
                dirs.push(home.join(".local/share/applications"));
            }
        }
    }
    for dir in xdg_data_dirs() {
        dirs.push(dir.join("applications"));
    }
    if let Some(home) = &home {
        dirs.push(home.join(".local/share/flatpak/exports/share/applications"));
    }
    dirs.push(PathBuf::from("/var/lib/flatpak/exports/share/applications"));

    let mut confirmed = Vec::new();
    for dir in dirs {
        if dir.is_dir() && !confirmed.contains(&dir) {
            confirmed.push(dir);
        }
    }
    confirmed
}

/// Language code: override, else $LANG with the encoding suffix removed.
pub fn language(override_lang: Option<&str>) -> String {
    if let Some(lang) = override_lang {
        if !lang.is_empty() {
            return lang.to_string();
        }
    }
    match env::var("LANG") {
        Ok(lang) => lang.split('.').next().unwrap_or_default().to_string(),
        Err(_) => String::new(),
    }
}

pub fn current_desktop() -> String {
    env::var("XDG_CURRENT_DESKTOP").unwrap_or_default()
}

/// Named search roots: home plus the XDG user dirs, with any overrides
/// from ~/.config/user-dirs.dirs applied.
pub fn user_dirs() -> Vec<(String, PathBuf)> {
    let Some(base) = BaseDirs::new() else {
        return Vec::new();
    };
    let home = base.home_dir().to_path_buf();
    let mut dirs = vec![
        ("home".to_string(), home.clone()),
        ("documents".to_string(), home.join("Documents")),
        ("downloads".to_string(), home.join("Downloads")),
        ("music".to_string(), home.join("Music")),
        ("pictures".to_string(), home.join("Pictures")),
        ("videos".to_string(), home.join("Videos")),
    ];

    let user_dirs_file = base.config_dir().join("user-dirs.dirs");
    let lines = match read_lines(&user_dirs_file) {
        Ok(lines) => {
            info!("Using XDG user dirs from {}", user_dirs_file.display());
            lines
        }
        Err(_) => {
            warn!(
                "userDirsFile {} not found, using defaults",
                user_dirs_file.display()
            );
            return dirs;
        }
    };
    for line in &lines {
        let target = match line.split('=').next() {
            Some("XDG_DOCUMENTS_DIR") => "documents",
            Some("XDG_DOWNLOAD_DIR") => "downloads",
            Some("XDG_MUSIC_DIR") => "music",
            Some("XDG_PICTURES_DIR") => "pictures",
            Some("XDG_VIDEOS_DIR") => "videos",
            _ => continue,
        };
        if let Some(path) = parse_user_dir(&home, line) {
            if let Some(slot) = dirs.iter_mut().find(|(name, _)| name == target) {
                slot.1 = path;
            }
        }
    }
    dirs
}

/// A line looks like `XDG_DOCUMENTS_DIR="$HOME/Documents"`.
fn parse_user_dir(home: &Path, line: &str) -> Option<PathBuf> {
    let (_, raw) = line.split_once('=')?;
    let unquoted = raw.trim().trim_matches('"');
    let expanded = unquoted.replacen("$HOME", &home.to_string_lossy(), 1);
    Some(PathBuf::from(expanded))
}

/// Trimmed, non-blank, non-`#` lines of a text file.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect())
}

/// One preferred-application override: first pattern matching the target
/// path wins.
#[derive(Debug, Clone)]
pub struct PreferredApp {
    pub pattern: Regex,
    pub command: String,
}

/// Read the JSON association table in file order into typed pairs.
/// Invalid patterns and non-string commands are logged and skipped.
pub fn preferred_apps(path: &Path) -> Result<Vec<PreferredApp>> {
    let text = fs::read_to_string(path)?;
    let table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;
    let mut apps = Vec::new();
    for (key, value) in table {
        let Some(command) = value.as_str() else {
            warn!("association for {key:?} is not a string, skipping");
            continue;
        };
        match Regex::new(&key) {
            Ok(pattern) => apps.push(PreferredApp {
                pattern,
                command: command.to_string(),
            }),
            Err(err) => warn!("invalid association pattern {key:?}: {err}"),
        }
    }
    debug!("{} preferred-app associations", apps.len());
    Ok(apps)
}

/// Path fragments excluded from file search, one per line.
pub fn exclusions(config_dir: &Path) -> Vec<String> {
    let path = config_dir.join("excluded-dirs");
    match read_lines(&path) {
        Ok(lines) => {
            info!("Found {} search exclusions in {}", lines.len(), path.display());
            lines
        }
        Err(_) => {
            info!("{} file not found", path.display());
            Vec::new()
        }
    }
}
