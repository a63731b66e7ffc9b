use crate::harness::{Assertion, Rejection, Scenario};

#[test]
fn test_commit_with_nothing_staged_is_rejected() {
    Scenario::new("empty_staging_rejected")
        .commit_rejected("Nothing here", Rejection::EmptyStaging)
        .assert_commit_count(0)
        .assert(Assertion::NoLeftoverFiles)
        .run()
        .unwrap();
}

#[test]
fn test_second_commit_without_staging_is_rejected() {
    Scenario::new("second_commit_rejected")
        .with_file("a.txt", b"a")
        .stages(&["a.txt"])
        .commits("first")
        .commit_rejected("second", Rejection::EmptyStaging)
        .assert_commit_count(1)
        .assert_head_message("first")
        .run()
        .unwrap();
}

#[test]
fn test_blank_message_keeps_staging() {
    Scenario::new("blank_message_rejected")
        .with_file("a.txt", b"a")
        .stages(&["a.txt"])
        .commit_rejected("", Rejection::EmptyMessage)
        .commit_rejected("   ", Rejection::EmptyMessage)
        .assert_commit_count(0)
        .assert_staged("a.txt")
        .run()
        .unwrap();
}

#[test]
fn test_corrupt_document_starts_fresh() {
    Scenario::new("corrupt_document")
        .with_file("a.txt", b"a")
        .stages(&["a.txt"])
        .commits("lost to corruption")
        .overwrites_document(b"{\"commit_history\": [ truncated")
        .assert_commit_count(0)
        .assert_staging_empty()
        .stages(&["a.txt"])
        .commits("fresh start")
        .assert_commit_count(1)
        .assert(Assertion::RootHasNoParent)
        .assert_chain_intact()
        .run()
        .unwrap();
}

#[test]
fn test_malformed_entries_are_dropped() {
    Scenario::new("malformed_entries")
        .with_file("b.txt", b"b")
        .overwrites_document(
            br#"{
  "commit_history": [],
  "staging_area": [
    {"file_path": "a.txt", "file_hash": "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"},
    {"file_path": 7},
    "not an entry"
  ]
}"#,
        )
        .assert(Assertion::StagedPaths(vec!["a.txt".into()]))
        .stages(&["b.txt"])
        .assert(Assertion::StagedPaths(vec!["a.txt".into(), "b.txt".into()]))
        .run()
        .unwrap();
}

#[test]
fn test_missing_keys_read_as_empty() {
    Scenario::new("missing_keys")
        .with_file("a.txt", b"a")
        .overwrites_document(b"{}")
        .assert_commit_count(0)
        .assert_staging_empty()
        .stages(&["a.txt"])
        .commits("from an empty object")
        .assert_commit_count(1)
        .run()
        .unwrap();
}
