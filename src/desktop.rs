//! Parsing of freedesktop .desktop descriptors.

use crate::model::AppEntry;
use std::fs;
use std::io;
use std::path::Path;

/// Ambient facts the parser needs, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    /// Language code, e.g. "pl" or "pl_PL" (no encoding suffix).
    pub lang: String,
    /// $XDG_CURRENT_DESKTOP, empty when unset.
    pub current_desktop: String,
}

impl ParseContext {
    /// Primary subtag before any '_', e.g. "pl" for "pl_PL".
    pub fn primary_lang(&self) -> &str {
        self.lang.split('_').next().unwrap_or_default()
    }
}

pub fn parse_file(id: &str, path: &Path, ctx: &ParseContext) -> io::Result<AppEntry> {
    let text = fs::read_to_string(path)?;
    Ok(parse(id, &text, ctx))
}

/// Parse one descriptor. Only the section between the first `[Desktop Entry]`
/// header and the next `[...]` header is read; everything else is ignored.
pub fn parse(id: &str, text: &str, ctx: &ParseContext) -> AppEntry {
    let mut entry = AppEntry {
        id: id.to_string(),
        ..AppEntry::default()
    };
    let name_key = format!("Name[{}]", ctx.primary_lang());
    let comment_key = format!("Comment[{}]", ctx.primary_lang());

    let mut in_section = false;
    for line in text.lines() {
        let line = line.trim();
        if line == "[Desktop Entry]" {
            in_section = true;
            continue;
        }
        if line.starts_with('[') {
            if in_section {
                break;
            }
            continue;
        }
        if !in_section {
            continue;
        }

        let Some((key, value)) = split_keypair(line) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        match key {
            "Name" => entry.name = value.to_string(),
            "Comment" => entry.comment = value.to_string(),
            "Icon" => entry.icon = value.to_string(),
            "Categories" => entry.categories = value.to_string(),
            "Exec" => entry.exec = clean_exec(value),
            "Terminal" => {
                if let Some(b) = parse_bool(value) {
                    entry.terminal = b;
                }
            }
            // Visibility keys only act while hidden is still undecided.
            "NoDisplay" | "Hidden" => {
                if !entry.hidden {
                    entry.hidden = parse_bool(value).unwrap_or(false);
                }
            }
            "OnlyShowIn" => {
                if !entry.hidden {
                    entry.hidden = !(!ctx.current_desktop.is_empty()
                        && value.split(';').any(|d| d == ctx.current_desktop));
                }
            }
            "NotShowIn" => {
                if !entry.hidden
                    && !ctx.current_desktop.is_empty()
                    && value.split(';').any(|d| d == ctx.current_desktop)
                {
                    entry.hidden = true;
                }
            }
            k if k == name_key => entry.localized_name = value.to_string(),
            k if k == comment_key => entry.localized_comment = value.to_string(),
            _ => {}
        }
    }

    if entry.localized_name.is_empty() {
        entry.localized_name = entry.name.clone();
    }
    if entry.localized_comment.is_empty() {
        entry.localized_comment = entry.comment.clone();
    }
    entry
}

/// Split on the first '=', both sides trimmed. Tolerates spaces around '='.
fn split_keypair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Strip embedded quotes and truncate at the first '%' placeholder.
fn clean_exec(raw: &str) -> String {
    let mut cleaned: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();
    if let Some(cut) = cleaned.find('%') {
        cleaned.truncate(cut);
    }
    cleaned.trim_end().to_string()
}

/// Boolean per the descriptor format; `None` leaves the field untouched.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
