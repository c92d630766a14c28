//! Integration tests for the tip source.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use catchguide::{random_tip, TipSource, TipSourceError};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[test]
fn test_seeded_choice_is_one_of_the_lines() {
    let lines = [
        "Wet your hands before handling a fish you plan to release.",
        "Check sanctuary dates before fishing a new lake.",
        "Carry a measuring board; slot sizes vary by zone.",
    ];
    let file = create_test_file(&lines.join("\n"));
    let source = TipSource::load(file.path()).expect("Failed to load tips");
    assert_eq!(source.len(), 3);

    for seed in 0..50 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let tip = source.choose(&mut rng);
        assert!(lines.contains(&tip), "unexpected tip {:?}", tip);
    }
}

#[test]
fn test_same_seed_same_tip() {
    let file = create_test_file("a\nb\nc\nd\ne\n");
    let source = TipSource::load(file.path()).unwrap();

    let first = source.choose(&mut fastrand::Rng::with_seed(7)).to_string();
    let second = source.choose(&mut fastrand::Rng::with_seed(7)).to_string();
    assert_eq!(first, second);
}

#[test]
fn test_blank_lines_and_whitespace_ignored() {
    let file = create_test_file("\n  Use barbless hooks.  \n\n\t\nKeep your licence on you.\r\n");
    let source = TipSource::load(file.path()).unwrap();

    assert_eq!(
        source.tips(),
        ["Use barbless hooks.", "Keep your licence on you."]
    );
}

#[test]
fn test_empty_file() {
    let file = create_test_file("");
    let err = TipSource::load(file.path()).unwrap_err();

    assert!(matches!(err, TipSourceError::Empty(_)));
    assert_eq!(err.to_string(), "No tips available in the tips file.");
}

#[test]
fn test_whitespace_only_file_is_empty() {
    let file = create_test_file("\n   \n\t\n");
    assert!(matches!(
        TipSource::load(file.path()),
        Err(TipSourceError::Empty(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tips.txt");

    let err = random_tip(&path).unwrap_err();
    assert!(matches!(err, TipSourceError::NotFound(_)));
    assert!(err.to_string().contains("was not found"));
}

#[test]
fn test_random_tip_single_line() {
    let file = create_test_file("Only one tip");
    assert_eq!(random_tip(file.path()).unwrap(), "Only one tip");
}

#[test]
fn test_pick_with_seed_is_reproducible() {
    let file = create_test_file("pike\nbass\nwalleye\nperch\n");
    let source = TipSource::load(file.path()).unwrap();

    assert_eq!(source.pick(Some(42)), source.pick(Some(42)));
    assert!(source.tips().iter().any(|t| t == source.pick(None)));
}
