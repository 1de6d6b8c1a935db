use hatch::files;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_tree(tag: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("hatch-tests")
        .join(format!("{tag}-{unique}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn documents_fixture(tag: &str) -> PathBuf {
    let home = temp_tree(tag);
    let docs = home.join("Documents");
    fs::create_dir_all(docs.join("Private")).unwrap();
    fs::create_dir_all(docs.join("Work")).unwrap();
    fs::write(docs.join("Private/report.pdf"), "secret").unwrap();
    fs::write(docs.join("Work/report.pdf"), "public").unwrap();
    docs
}

#[test]
fn excluded_ancestors_suppress_hits() {
    let docs = documents_fixture("exclusion");
    let roots = vec![("documents".to_string(), docs.clone())];
    let exclusions = vec!["Documents/Private".to_string()];

    let results = files::search(&roots, "report", &exclusions);
    assert_eq!(results.len(), 1);
    let hits = &results[0].hits;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, docs.join("Work/report.pdf"));
    assert!(!hits[0].is_dir);
}

#[test]
fn exclusion_does_not_apply_to_the_match_target_itself() {
    let docs = documents_fixture("target");
    let roots = vec![("documents".to_string(), docs.clone())];
    let exclusions = vec!["Documents/Private".to_string()];

    let results = files::search(&roots, "private", &exclusions);
    assert_eq!(results.len(), 1);
    let hits = &results[0].hits;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, docs.join("Private"));
    assert!(hits[0].is_dir);
}

#[test]
fn matching_is_case_insensitive_on_the_relative_fragment() {
    let docs = documents_fixture("case");
    let roots = vec![("documents".to_string(), docs.clone())];

    let results = files::search(&roots, "WORK", &[]);
    assert_eq!(results.len(), 1);
    let paths: Vec<&PathBuf> = results[0].hits.iter().map(|h| &h.path).collect();
    assert!(paths.contains(&&docs.join("Work")));
    assert!(paths.contains(&&docs.join("Work/report.pdf")));
}

#[test]
fn roots_without_hits_are_omitted() {
    let docs = documents_fixture("omit");
    let empty = temp_tree("omit-empty");
    let roots = vec![
        ("documents".to_string(), docs),
        ("music".to_string(), empty),
    ];

    let results = files::search(&roots, "report", &[]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].root, "documents");
}

#[test]
fn phrase_matches_directory_components_too() {
    let docs = documents_fixture("components");
    let roots = vec![("documents".to_string(), docs.clone())];

    // "work/report" only exists as a fragment spanning dir and file name
    let results = files::search(&roots, "work/report", &[]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].hits[0].path, docs.join("Work/report.pdf"));
}
