//! Tests for the change classifier

use super::*;
use crate::model::FileStatus;

fn file(path: &str, status: FileStatus) -> ChangedFile {
    ChangedFile::new(path, status)
}

fn classifier() -> Classifier {
    Classifier::default()
}

#[test]
fn test_end_to_end_scenario() {
    let dirs = ServiceDirectories::new(["services/location", "services/events"]);
    let changes = vec![
        file("services/location/demo.go", FileStatus::Modified),
        file("services/location/examples/web/demo.go", FileStatus::Modified),
        file("services/platform-test/main.go", FileStatus::Removed),
        file("services/events/main.go", FileStatus::Added),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.bucket(ServiceStatus::Added), ["services/events"]);
    assert_eq!(result.bucket(ServiceStatus::Modified), ["services/location"]);
    assert_eq!(
        result.bucket(ServiceStatus::Removed),
        ["services/platform-test"]
    );
    assert_eq!(result.files_for("services/location").unwrap().len(), 2);
}

#[test]
fn test_classify_is_idempotent() {
    let dirs = ServiceDirectories::new(["a", "a/b", "c"]);
    let changes = vec![
        file("c/x.go", FileStatus::Modified),
        file("a/b/main.go", FileStatus::Added),
        file("a/y.go", FileStatus::Modified),
        file("d/main.go", FileStatus::Removed),
    ];

    let first = classifier().classify(&dirs, &changes);
    let second = classifier().classify(&dirs, &changes);

    assert_eq!(first, second);
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn test_nested_service_takes_precedence() {
    let dirs = ServiceDirectories::new(["a", "a/b"]);
    let changes = vec![file("a/b/main.go", FileStatus::Modified)];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.bucket(ServiceStatus::Modified), ["a/b"]);
    assert_eq!(result.status_of("a"), None);
}

#[test]
fn test_nested_precedence_independent_of_input_order() {
    // Supplied shortest-first; ordering must still favour the nested service
    let dirs = ServiceDirectories::new(["services", "services/api", "services/api/admin"]);
    let changes = vec![
        file("services/api/admin/handler.go", FileStatus::Modified),
        file("services/api/handler.go", FileStatus::Modified),
        file("services/shared.go", FileStatus::Modified),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(
        result.bucket(ServiceStatus::Modified),
        ["services/api/admin", "services/api", "services"]
    );
}

#[test]
fn test_removed_service_recovered_without_discovery() {
    let dirs = ServiceDirectories::default();
    let changes = vec![file("svc/main.go", FileStatus::Removed)];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.bucket(ServiceStatus::Removed), ["svc"]);
    // The caller's directory set is not mutated
    assert!(dirs.is_empty());
}

#[test]
fn test_removed_service_collects_its_other_files() {
    let dirs = ServiceDirectories::new(["services"]);
    let changes = vec![
        file("services/old/handler.go", FileStatus::Removed),
        file("services/old/main.go", FileStatus::Removed),
    ];

    let result = classifier().classify(&dirs, &changes);

    // The recovered directory is longer than `services`, so it wins for both files
    assert_eq!(result.bucket(ServiceStatus::Removed), ["services/old"]);
    assert_eq!(result.files_for("services/old").unwrap().len(), 2);
    assert_eq!(result.status_of("services"), None);
}

#[test]
fn test_default_to_modified() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![file("svc/helper.go", FileStatus::Modified)];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.bucket(ServiceStatus::Modified), ["svc"]);
}

#[test]
fn test_added_non_marker_file_is_modified() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![file("svc/new_handler.go", FileStatus::Added)];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.status_of("svc"), Some(ServiceStatus::Modified));
}

#[test]
fn test_marker_status_is_authoritative() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![
        file("svc/handler.go", FileStatus::Removed),
        file("svc/main.go", FileStatus::Modified),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.status_of("svc"), Some(ServiceStatus::Modified));
}

#[test]
fn test_first_marker_entry_wins_across_commits() {
    // Added in one commit, modified in a later one
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![
        file("svc/main.go", FileStatus::Added),
        file("svc/main.go", FileStatus::Modified),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.status_of("svc"), Some(ServiceStatus::Added));
}

#[test]
fn test_non_matching_files_dropped() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![
        file("unrelated/readme.md", FileStatus::Modified),
        file("README.md", FileStatus::Modified),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert!(result.is_empty());
    assert!(result.summary().is_empty());
}

#[test]
fn test_sibling_with_shared_prefix_not_matched() {
    let dirs = ServiceDirectories::new(["foo"]);
    let changes = vec![file("foo-bar/main.go", FileStatus::Modified)];

    let result = classifier().classify(&dirs, &changes);

    assert!(result.is_empty());
}

#[test]
fn test_renamed_and_unknown_files_ignored() {
    let dirs = ServiceDirectories::new(["svc", "other"]);
    let changes = vec![
        file("svc/moved.go", FileStatus::Renamed),
        file("other/handler.go", FileStatus::Unknown),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert!(result.is_empty());
}

#[test]
fn test_unknown_marker_status_is_modified() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![file("svc/main.go", FileStatus::Unknown)];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.status_of("svc"), Some(ServiceStatus::Modified));
    assert_eq!(result.bucket(ServiceStatus::Modified), ["svc"]);
    assert_eq!(result.files_for("svc").unwrap().len(), 1);
}

#[test]
fn test_unknown_marker_overrides_added_sibling() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![
        file("svc/main.go", FileStatus::Unknown),
        file("svc/new.go", FileStatus::Added),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.status_of("svc"), Some(ServiceStatus::Modified));
}

#[test]
fn test_dot_slash_removed_marker_is_recovered() {
    let changes = vec![file("./svc/main.go", FileStatus::Removed)];

    let result = classifier().classify(&ServiceDirectories::default(), &changes);

    assert_eq!(result.bucket(ServiceStatus::Removed), ["svc"]);
    assert_eq!(result.files_for("svc").unwrap()[0].path, "svc/main.go");
}

#[test]
fn test_backslash_paths_are_attributed() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![file(".\\svc\\x.go", FileStatus::Modified)];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.bucket(ServiceStatus::Modified), ["svc"]);
    assert_eq!(result.files_for("svc").unwrap()[0].path, "svc/x.go");
}

#[test]
fn test_renamed_marker_does_not_decide_status() {
    let dirs = ServiceDirectories::new(["svc"]);
    let changes = vec![
        file("svc/main.go", FileStatus::Renamed),
        file("svc/handler.go", FileStatus::Modified),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(result.status_of("svc"), Some(ServiceStatus::Modified));
    assert_eq!(result.files_for("svc").unwrap().len(), 1);
}

#[test]
fn test_added_marker_does_not_extend_working_set() {
    let dirs = ServiceDirectories::default();
    let changes = vec![file("fresh/main.go", FileStatus::Added)];

    let result = classifier().classify(&dirs, &changes);

    assert!(result.is_empty());
}

#[test]
fn test_root_marker_is_ignored() {
    let dirs = ServiceDirectories::default();
    let changes = vec![file("main.go", FileStatus::Removed)];

    let result = classifier().classify(&dirs, &changes);

    assert!(result.is_empty());
}

#[test]
fn test_buckets_keep_first_seen_order() {
    let dirs = ServiceDirectories::new(["zeta", "alpha", "mid"]);
    let changes = vec![
        file("zeta/a.go", FileStatus::Modified),
        file("mid/b.go", FileStatus::Modified),
        file("alpha/c.go", FileStatus::Modified),
        file("zeta/d.go", FileStatus::Modified),
    ];

    let result = classifier().classify(&dirs, &changes);

    assert_eq!(
        result.bucket(ServiceStatus::Modified),
        ["zeta", "mid", "alpha"]
    );
}

#[test]
fn test_custom_marker() {
    let marker = Marker::new("Dockerfile").unwrap();
    let dirs = ServiceDirectories::new(["apps/web"]);
    let changes = vec![
        file("apps/web/Dockerfile", FileStatus::Added),
        file("apps/worker/Dockerfile", FileStatus::Removed),
        file("apps/web/main.go", FileStatus::Removed),
    ];

    let result = classify(&marker, &dirs, &changes);

    assert_eq!(result.bucket(ServiceStatus::Added), ["apps/web"]);
    assert_eq!(result.bucket(ServiceStatus::Removed), ["apps/worker"]);
}

#[test]
fn test_empty_inputs() {
    let result = classifier().classify(&ServiceDirectories::default(), &[]);

    assert!(result.is_empty());
    for status in ServiceStatus::ALL {
        assert!(result.bucket(status).is_empty());
    }
}
