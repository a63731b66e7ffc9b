use crate::harness::{Assertion, Scenario};

#[test]
fn test_restage_unchanged_file_is_idempotent() {
    Scenario::new("restage_idempotent")
        .with_file("a.txt", b"same")
        .stages(&["a.txt"])
        .stages(&["a.txt"])
        .stages(&["a.txt"])
        .assert(Assertion::StagingLen(1))
        .assert(Assertion::StagedHashMatchesFile {
            path: "a.txt".into(),
        })
        .run()
        .unwrap();
}

#[test]
fn test_restage_modified_file_updates_in_place() {
    Scenario::new("restage_updates_in_place")
        .with_file("a.txt", b"a")
        .with_file("b.txt", b"b")
        .stages(&["a.txt", "b.txt"])
        .writes("a.txt", b"a, edited")
        .stages(&["a.txt"])
        .assert(Assertion::StagedPaths(vec!["a.txt".into(), "b.txt".into()]))
        .assert(Assertion::StagedHashMatchesFile {
            path: "a.txt".into(),
        })
        .run()
        .unwrap();
}

#[test]
fn test_duplicate_inputs_keep_first_seen_order() {
    Scenario::new("duplicate_inputs")
        .with_file("x.txt", b"x")
        .with_file("y.txt", b"y")
        .stages(&["y.txt", "x.txt", "y.txt"])
        .assert(Assertion::StagedPaths(vec!["y.txt".into(), "x.txt".into()]))
        .assert(Assertion::LastStageCount(2))
        .run()
        .unwrap();
}

#[test]
fn test_missing_file_is_warned_and_rest_staged() {
    Scenario::new("partial_stage_failure")
        .with_file("file1.txt", b"content1")
        .stages(&["file1.txt", "missing.txt"])
        .assert(Assertion::LastStageWarned {
            path: "missing.txt".into(),
        })
        .assert(Assertion::LastStageCount(1))
        .assert(Assertion::StagedPaths(vec!["file1.txt".into()]))
        .commits("Only the file that exists")
        .assert(Assertion::HeadFileCount(1))
        .run()
        .unwrap();
}

#[test]
fn test_metadata_directory_is_never_staged() {
    Scenario::new("metadata_not_staged")
        .with_file("tracked.txt", b"tracked")
        .stages(&[".trk/metadata.json", "./.trk/config.toml", "tracked.txt"])
        .assert(Assertion::StagedPaths(vec!["tracked.txt".into()]))
        .run()
        .unwrap();
}

#[test]
fn test_file_removed_after_staging_still_commits() {
    Scenario::new("removed_after_staging")
        .with_file("gone.txt", b"soon gone")
        .stages(&["gone.txt"])
        .removes("gone.txt")
        .commits("Commit what was staged")
        .assert(Assertion::HeadContainsFile {
            path: "gone.txt".into(),
        })
        .assert_staging_empty()
        .run()
        .unwrap();
}

#[test]
fn test_metadata_reached_by_other_spellings_is_never_staged() {
    Scenario::new("metadata_other_spellings")
        .with_file("sub/keep.txt", b"keep")
        .stages(&["sub/../.trk/config.toml", "sub/keep.txt"])
        .assert(Assertion::Custom(Box::new(|repo| {
            let absolute = repo.trk_dir().join("metadata.json");
            let absolute = absolute
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("temp path is not UTF-8"))?;
            let report = repo.stage(&[absolute])?;
            anyhow::ensure!(report.is_empty(), "absolute path was staged: {:?}", report);
            Ok(())
        })))
        .assert(Assertion::StagedPaths(vec!["sub/keep.txt".into()]))
        .run()
        .unwrap();
}
