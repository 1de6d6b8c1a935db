//! Filesystem watcher raising coarse invalidation events.
//!
//! The watcher never rebuilds anything itself; it posts events into the
//! event loop, which flips the session dirty flags at a safe point.

use crate::index::has_desktop_suffix;
use log::warn;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    IndexDirty,
    PinsDirty,
}

/// Keeps the underlying watcher alive for the session's lifetime.
pub struct FsWatcher {
    _watcher: RecommendedWatcher,
}

/// Watch all descriptor roots recursively plus the pinned-items file.
///
/// Recursive mode picks up subdirectories created later, so the watch set
/// grows with the tree. Per-path failures are logged and skipped.
pub fn spawn(
    app_dirs: &[PathBuf],
    pinned_file: &Path,
    tx: calloop::channel::Sender<WatchEvent>,
) -> notify::Result<FsWatcher> {
    let pinned = pinned_file.to_path_buf();
    let mut watcher =
        notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let Some(msg) = classify(&event, &pinned) {
                    let _ = tx.send(msg);
                }
            }
            Err(err) => warn!("watch error: {err}"),
        })?;

    for dir in app_dirs {
        if let Err(err) = watcher.watch(dir, RecursiveMode::Recursive) {
            warn!("failed to watch {}: {err}", dir.display());
        }
    }
    if let Err(err) = watcher.watch(pinned_file, RecursiveMode::NonRecursive) {
        warn!("failed to watch {}: {err}", pinned_file.display());
    }

    Ok(FsWatcher { _watcher: watcher })
}

/// Create/remove/rename of a *.desktop path invalidates the index; any event
/// targeting the pinned file exactly invalidates the pin cache.
fn classify(event: &Event, pinned_file: &Path) -> Option<WatchEvent> {
    let structural = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    );
    if structural && event.paths.iter().any(|p| has_desktop_suffix(p)) {
        return Some(WatchEvent::IndexDirty);
    }
    if event.paths.iter().any(|p| p == pinned_file) {
        return Some(WatchEvent::PinsDirty);
    }
    None
}
