use hatch::desktop::ParseContext;
use hatch::index::{self, EntryIndex};
use hatch::matcher::FuzzyMatcher;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn fixture_index() -> EntryIndex {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir: PathBuf = std::env::temp_dir()
        .join("hatch-tests")
        .join(format!("matcher-{unique}"));
    fs::create_dir_all(&dir).unwrap();

    let entries = [
        ("firefox", "Firefox", "Browse the web", false),
        ("files", "Files", "Browse your files", false),
        ("firewall", "Firewall", "Network rules", true),
        ("term", "Terminal", "A shell", false),
    ];
    for (id, name, comment, hidden) in entries {
        let mut body = format!("[Desktop Entry]\nName={name}\nComment={comment}\nExec={id}\n");
        if hidden {
            body.push_str("NoDisplay=true\n");
        }
        fs::write(dir.join(format!("{id}.desktop")), body).unwrap();
    }

    let mut idx = EntryIndex::new();
    idx.rebuild(
        &index::list_desktop_files(&[dir]),
        &ParseContext::default(),
    );
    idx
}

#[test]
fn phrase_ranks_matching_names_first() {
    let idx = fixture_index();
    let mut matcher = FuzzyMatcher::new();

    let hits = matcher.rank("fir", &idx);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "firefox.desktop");
}

#[test]
fn hidden_entries_never_match() {
    let idx = fixture_index();
    let mut matcher = FuzzyMatcher::new();

    let hits = matcher.rank("firewall", &idx);
    assert!(hits.is_empty());
}

#[test]
fn comment_matches_back_up_name_matches() {
    let idx = fixture_index();
    let mut matcher = FuzzyMatcher::new();

    // "browse" only occurs in comments
    let hits = matcher.rank("browse", &idx);
    let ids: Vec<&str> = hits.iter().map(|e| e.id.as_str()).collect();
    assert!(ids.contains(&"firefox.desktop"));
    assert!(ids.contains(&"files.desktop"));
}

#[test]
fn unmatched_phrase_yields_nothing() {
    let idx = fixture_index();
    let mut matcher = FuzzyMatcher::new();
    assert!(matcher.rank("zzzzzz", &idx).is_empty());
}
