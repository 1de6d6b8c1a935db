//! The pinned-items store: a small ordered id list persisted to a flat file.

use crate::config;
use crate::index::EntryIndex;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::PathBuf;

pub struct Pins {
    path: PathBuf,
    items: Vec<String>,
}

impl Pins {
    /// Load the pin cache; a missing file is created empty.
    pub fn load(path: PathBuf) -> Self {
        let items = match config::read_lines(&path) {
            Ok(items) => items,
            Err(_) => {
                if let Err(err) = fs::write(&path, "") {
                    warn!("couldn't create pin cache {}: {err}", path.display());
                }
                Vec::new()
            }
        };
        Self { path, items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append an id and persist. Pinning an already-pinned id is a no-op.
    pub fn pin(&mut self, id: &str, index: &EntryIndex) -> io::Result<()> {
        if self.items.iter().any(|item| item == id) {
            warn!("{id} already pinned");
            return Ok(());
        }
        self.items.push(id.to_string());
        self.save(index)?;
        info!("{id} pinned");
        Ok(())
    }

    /// Remove an id and persist. Unpinning an absent id is a no-op.
    pub fn unpin(&mut self, id: &str, index: &EntryIndex) -> io::Result<()> {
        let Some(pos) = self.items.iter().position(|item| item == id) else {
            return Ok(());
        };
        self.items.remove(pos);
        self.save(index)?;
        info!("{id} unpinned");
        Ok(())
    }

    /// Re-read the file after an external change.
    pub fn reload(&mut self) {
        self.items = config::read_lines(&self.path).unwrap_or_default();
    }

    /// Write the list back, dropping ids the index can no longer resolve.
    pub fn save(&self, index: &EntryIndex) -> io::Result<()> {
        let mut out = String::new();
        for id in &self.items {
            if !id.is_empty() && index.contains(id) {
                out.push_str(id);
                out.push('\n');
            }
        }
        fs::write(&self.path, out)
    }
}
