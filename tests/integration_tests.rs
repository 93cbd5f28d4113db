use tourpatch::{Differ, Error, Patch, Patcher, StrictPatcher};

use std::env;
use std::path::{Path, PathBuf};

// Helper function to get the path to the fixtures directory
fn fixtures_path() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    Path::new(&manifest_dir).join("fixtures").join("plans")
}

fn load_fixture(name: &str) -> String {
    let path = fixtures_path().join(name);
    std::fs::read_to_string(&path).unwrap()
}

#[test]
fn test_generate_and_apply_day_plan() {
    let old = load_fixture("day1_before.txt");
    let new = load_fixture("day1_after.txt");

    let diff = Differ::new(&old, &new).generate().to_string();
    let result = Patcher::new(&diff).apply(&old).unwrap();

    assert_eq!(result, new);
}

#[test]
fn test_generate_and_apply_weekend_plan() {
    let old = load_fixture("weekend_before.txt");
    let new = load_fixture("weekend_after.txt");

    let diff = Differ::new(&old, &new).generate().to_string();
    let result = Patcher::new(&diff).apply(&old).unwrap();

    assert_eq!(result, new);
}

#[test]
fn test_reverse_direction_diff_also_applies() {
    let before = load_fixture("weekend_before.txt");
    let after = load_fixture("weekend_after.txt");

    let diff = Differ::new(&after, &before).generate().to_string();
    let result = Patcher::new(&diff).apply(&after).unwrap();

    assert_eq!(result, before);
}

#[test]
fn test_extended_coffee_scenario() {
    let old = "10:00 - 11:30: Coffee\n11:30 - 12:30: Lunch\n";
    let diff = "\
--- original_tour_plan.txt
+++ modified_tour_plan.txt
@@ -1,2 +1,2 @@
-10:00 - 11:30: Coffee
+11:00 - 12:30: Extended Coffee
 11:30 - 12:30: Lunch
";

    let patch = Patch::parse(diff).unwrap();
    let result = StrictPatcher::new(&patch).apply(old).unwrap();

    assert_eq!(result, "11:00 - 12:30: Extended Coffee\n11:30 - 12:30: Lunch\n");
}

#[test]
fn test_handwritten_patch_without_labels() {
    // Upstream regularly omits the header labels entirely.
    let old = load_fixture("day1_before.txt");
    let diff = "\
---
+++
@@ -11,2 +11,2 @@
 17:30 - 18:30: Free time
-19:00 - 21:00: Dinner at Trattoria Ponte
+19:30 - 21:30: Dinner at Osteria del Mare
";

    let result = Patcher::new(diff).apply(&old).unwrap();
    assert!(result.contains("19:30 - 21:30: Dinner at Osteria del Mare\n"));
    assert!(!result.contains("Trattoria Ponte"));
}

#[test]
fn test_drifted_patch_recovered() {
    let old = load_fixture("day1_before.txt");
    // Same edit as above, but the hunk start is off by two lines, which the
    // strict applier must reject.
    let diff = "\
--- original_tour_plan.txt
+++ modified_tour_plan.txt
@@ -9,2 +9,2 @@
 17:30 - 18:30: Free time
-19:00 - 21:00: Dinner at Trattoria Ponte
+19:30 - 21:30: Dinner at Osteria del Mare
";

    let patch = Patch::parse(diff).unwrap();
    assert!(StrictPatcher::new(&patch).apply(&old).is_err());

    let result = Patcher::new(diff).apply(&old).unwrap();
    assert!(result.contains("19:30 - 21:30: Dinner at Osteria del Mare\n"));
    assert!(!result.contains("Trattoria Ponte"));
}

#[test]
fn test_whole_plan_rewrite_salvaged() {
    // No usable structure at all, just a replacement document written as
    // added lines. The salvage tier returns exactly those lines.
    let old = load_fixture("day1_before.txt");
    let diff = "\
@@ rewritten plan @@
+Tour Plan - Day 1 (revised)
+10:00 - 12:00: Boat tour
+12:00 - 13:30: Lunch
";

    let result = Patcher::new(diff).apply(&old).unwrap();
    assert_eq!(
        result,
        "Tour Plan - Day 1 (revised)\n10:00 - 12:00: Boat tour\n12:00 - 13:30: Lunch\n"
    );
}

#[test]
fn test_unusable_patch_surfaces_error() {
    let old = load_fixture("day1_before.txt");
    let diff = "I could not produce a diff for this request.\nPlease try again.\n";

    let err = Patcher::new(diff).apply(&old).unwrap_err();
    assert!(matches!(err, Error::UnapplicablePatch));
}

#[test]
fn test_reordered_hunks_rejected() {
    let old = load_fixture("day1_before.txt");
    let diff = "\
--- original_tour_plan.txt
+++ modified_tour_plan.txt
@@ -11,1 +11,1 @@
-17:30 - 18:30: Free time
+17:30 - 18:30: Souvenir shopping
@@ -3,1 +3,1 @@
-08:30 - 09:15: Breakfast at Hotel Aurora
+08:00 - 08:45: Breakfast at Hotel Aurora
";

    let patch = Patch::parse(diff).unwrap();
    let err = StrictPatcher::new(&patch).apply(&old).unwrap_err();
    assert!(matches!(err, Error::HunkOverlap { .. }));
}

#[test]
fn test_crlf_plan_round_trip() {
    let old = load_fixture("day1_before.txt").replace('\n', "\r\n");
    let new = load_fixture("day1_after.txt").replace('\n', "\r\n");

    let diff = Differ::new(&old, &new).generate().to_string();
    let result = Patcher::new(&diff).apply(&old).unwrap();

    assert_eq!(result, new);
}

#[test]
fn test_patch_display_reparses_identically() {
    let old = load_fixture("weekend_before.txt");
    let new = load_fixture("weekend_after.txt");

    let rendered = Differ::new(&old, &new).generate().to_string();
    let reparsed = Patch::parse(&rendered).unwrap();

    assert_eq!(reparsed.to_string(), rendered);
}
