use super::*;
use crate::processor::reflection::SourceFile;
use std::collections::BTreeSet;

fn file(path: &str) -> SourceFile {
    SourceFile::new(path)
}

fn changed(paths: &[&str]) -> BTreeSet<SourceFile> {
    paths.iter().map(|p| file(p)).collect()
}

fn isolating(paths: &[&str]) -> Dependencies {
    let mut dependencies = Dependencies::new(false);
    for path in paths {
        dependencies.add(Some(&file(path)));
    }
    dependencies
}

#[test]
fn test_record_and_reverse_lookup() {
    let mut tracker = DependencyTracker::new();
    tracker.record("app/AbsSample.kt", &isolating(&["Sample.kt", "SampleSpec.kt"]));
    tracker.record("app/AbsOther.kt", &isolating(&["Other.kt", "SampleSpec.kt"]));

    assert_eq!(
        tracker.affected_by(&file("SampleSpec.kt")),
        vec!["app/AbsOther.kt", "app/AbsSample.kt"]
    );
    assert_eq!(tracker.affected_by(&file("Sample.kt")), vec!["app/AbsSample.kt"]);
    assert!(tracker.affected_by(&file("Unrelated.kt")).is_empty());
}

#[test]
fn test_record_replaces_previous_edges() {
    let mut tracker = DependencyTracker::new();
    tracker.record("app/AbsSample.kt", &isolating(&["Old.kt"]));
    tracker.record("app/AbsSample.kt", &isolating(&["New.kt"]));

    assert!(tracker.affected_by(&file("Old.kt")).is_empty());
    assert_eq!(tracker.affected_by(&file("New.kt")), vec!["app/AbsSample.kt"]);
}

#[test]
fn test_isolating_staleness() {
    let mut tracker = DependencyTracker::new();
    tracker.record("app/AbsSample.kt", &isolating(&["Sample.kt", "SampleSpec.kt"]));

    assert!(tracker.is_stale("app/AbsSample.kt", &changed(&["SampleSpec.kt"])));
    assert!(!tracker.is_stale("app/AbsSample.kt", &changed(&["Other.kt"])));
    assert!(!tracker.is_stale("app/AbsSample.kt", &changed(&[])));
}

#[test]
fn test_unknown_origins_always_stale() {
    let mut tracker = DependencyTracker::new();
    tracker.record("app/AbsSample.kt", &Dependencies::new(false));

    assert!(tracker.is_stale("app/AbsSample.kt", &changed(&[])));
    assert!(tracker.is_stale("app/Missing.kt", &changed(&[])));
}

#[test]
fn test_aggregating_stale_on_any_change() {
    let mut tracker = DependencyTracker::new();
    tracker.record(
        "app/AbsSample.kt",
        &Dependencies::new(true).with(Some(&file("Sample.kt"))),
    );

    assert!(tracker.is_stale("app/AbsSample.kt", &changed(&["Other.kt"])));
    assert!(!tracker.is_stale("app/AbsSample.kt", &changed(&[])));
}

#[test]
fn test_manifest_round_trip() {
    let mut tracker = DependencyTracker::new();
    tracker.record("app/AbsSample.kt", &isolating(&["Sample.kt"]));

    let json = serde_json::to_string(&tracker.to_manifest()).unwrap();
    let manifest: DependencyManifest = serde_json::from_str(&json).unwrap();

    assert_eq!(manifest.version, MANIFEST_VERSION);
    assert_eq!(DependencyTracker::from_manifest(&manifest), tracker);
}
