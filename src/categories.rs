//! The fixed category taxonomy, loaded from .directory descriptors.

use crate::config;
use crate::model::{CATEGORY_NAMES, Category};
use log::error;
use std::path::Path;

/// Load the catalog from `<data_dir>/desktop-directories/<name>.directory`.
///
/// Missing descriptors are logged and skipped. The 8 regular categories are
/// sorted by display name; "other" is appended last unconditionally.
pub fn load(data_dir: &Path, lang: &str) -> Vec<Category> {
    let mut catalog = Vec::new();
    let mut other = None;
    let primary = lang.split('_').next().unwrap_or_default();
    let primary_key = format!("Name[{primary}]=");
    let full_key = format!("Name[{lang}]=");

    for name in CATEGORY_NAMES {
        let path = data_dir
            .join("desktop-directories")
            .join(format!("{name}.directory"));
        let lines = match config::read_lines(&path) {
            Ok(lines) => lines,
            Err(err) => {
                error!("Couldn't open {}: {err}", path.display());
                continue;
            }
        };

        let mut plain = String::new();
        let mut localized = String::new();
        let mut icon = String::new();
        for line in &lines {
            if let Some(v) = line.strip_prefix("Name=") {
                plain = v.to_string();
            } else if let Some(v) = line.strip_prefix(&primary_key) {
                localized = v.to_string();
            } else if let Some(v) = line.strip_prefix("Icon=") {
                icon = v.to_string();
            }
        }
        // No Name[<primary>]? Try the full language_REGION form.
        if localized.is_empty() {
            if let Some(v) = lines.iter().find_map(|l| l.strip_prefix(&full_key)) {
                localized = v.to_string();
            }
        }

        let category = Category {
            name,
            display_name: if localized.is_empty() { plain } else { localized },
            icon,
        };
        if name == "other" {
            other = Some(category);
        } else {
            catalog.push(category);
        }
    }

    catalog.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    if let Some(other) = other {
        catalog.push(other);
    }
    catalog
}
