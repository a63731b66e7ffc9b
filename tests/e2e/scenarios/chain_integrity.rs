use crate::harness::{Assertion, Scenario};
use anyhow::{anyhow, ensure};
use std::time::Duration;
use trk_core::hash_commit;

fn three_commits() -> Scenario {
    Scenario::new("three_commits")
        .with_file("a.txt", b"a")
        .stages(&["a.txt"])
        .commits("one")
        .writes("b.txt", b"b")
        .stages(&["b.txt"])
        .commits("two")
        .wait(Duration::from_secs(3600))
        .writes("a.txt", b"a2")
        .stages(&["a.txt", "b.txt"])
        .commits("three")
}

#[test]
fn test_untouched_history_verifies() {
    three_commits()
        .assert_commit_count(3)
        .assert_chain_intact()
        .run()
        .unwrap();
}

#[test]
fn test_commit_id_recomputes_from_fields() {
    three_commits()
        .assert(Assertion::Custom(Box::new(|repo| {
            for record in repo.history(None) {
                let computed = hash_commit(
                    &record.commit_timestamp,
                    &record.commit_message,
                    &record.parent_commit_id,
                    &record.files,
                );
                ensure!(
                    computed.as_hex() == record.commit_id,
                    "commit {} recomputes to {}",
                    record.commit_id,
                    computed
                );
            }
            Ok(())
        })))
        .run()
        .unwrap();
}

#[test]
fn test_edited_message_is_detected() {
    three_commits()
        .assert(Assertion::Custom(Box::new(|repo| {
            let mut doc = repo.load();
            let middle = doc
                .commit_history
                .get_mut(1)
                .ok_or_else(|| anyhow!("expected three commits"))?;
            middle.commit_message = "rewritten".into();
            repo.document_store().save(&doc)?;
            Ok(())
        })))
        .assert(Assertion::ChainHasIssues)
        .run()
        .unwrap();
}

#[test]
fn test_dropped_commit_is_detected() {
    three_commits()
        .assert(Assertion::Custom(Box::new(|repo| {
            let mut doc = repo.load();
            doc.commit_history.remove(1);
            repo.document_store().save(&doc)?;
            Ok(())
        })))
        .assert_commit_count(2)
        .assert(Assertion::ChainHasIssues)
        .run()
        .unwrap();
}
