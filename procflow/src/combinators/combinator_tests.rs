//! Cross-combinator tests: deep nesting and panic containment.

use super::{concurrent, concurrent_group, region, sequence, task};
use crate::errors::ProcflowError;
use crate::process::Process;
use crate::testing::{blocks_until_cancelled, failing, succeeding, tracked};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_nested_tree_succeeds() {
    let ran = Arc::new(AtomicBool::new(false));

    // Depth 4: sequence -> group -> sequence -> leaf.
    let tree = sequence(vec![
        task(
            "setup",
            concurrent_group(vec![
                sequence(vec![succeeding(), tracked(ran.clone())]),
                region("sidecar", succeeding()),
            ]),
        ),
        succeeding(),
    ]);

    assert!(tree.run(CancellationToken::new()).await.is_ok());
    assert!(ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_nested_short_circuit_holds_at_every_level() {
    let after_inner_failure = Arc::new(AtomicBool::new(false));
    let after_outer_failure = Arc::new(AtomicBool::new(false));

    let tree = sequence(vec![
        task(
            "stage-one",
            sequence(vec![
                failing("root cause"),
                // Inner sequence short-circuits...
                tracked(after_inner_failure.clone()),
            ]),
        ),
        // ...and so does the outer one.
        tracked(after_outer_failure.clone()),
    ]);

    let err = tree
        .run(CancellationToken::new())
        .await
        .expect_err("tree should fail");

    assert_eq!(err.label(), Some("stage-one"));
    assert_eq!(
        err.cause().expect("labeled cause").to_string(),
        "root cause"
    );
    assert!(!after_inner_failure.load(Ordering::SeqCst));
    assert!(!after_outer_failure.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_nested_group_fail_fast_reaches_inner_leaves() {
    let observed = Arc::new(AtomicBool::new(false));

    // The blocked leaf sits two levels below the failing branch's group.
    let tree = concurrent_group(vec![
        task("failer", failing("trigger")),
        region("worker", sequence(vec![blocks_until_cancelled(observed.clone())])),
    ]);

    let err = tree
        .run(CancellationToken::new())
        .await
        .expect_err("group should fail");

    let has_trigger = match &err {
        ProcflowError::Aggregate(members) => members
            .iter()
            .any(|m| m.label() == Some("failer")),
        other => other.label() == Some("failer"),
    };
    assert!(has_trigger);
    assert!(observed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_labels_attribute_failures_across_branches() {
    let tree = concurrent(vec![
        task("alpha", failing("a")),
        task("beta", failing("b")),
        task("gamma", succeeding()),
    ]);

    let err = tree
        .run(CancellationToken::new())
        .await
        .expect_err("two branches fail");

    let members = err.members().expect("aggregate of two failures");
    let mut labels: Vec<&str> = members.iter().filter_map(ProcflowError::label).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_concurrent_contains_branch_panic() {
    let sibling_ran = Arc::new(AtomicBool::new(false));

    let combined = concurrent(vec![
        Process::new(|_token| async { panic!("branch blew up") }),
        tracked(sibling_ran.clone()),
    ]);

    let err = combined
        .run(CancellationToken::new())
        .await
        .expect_err("panicked branch becomes an error");

    assert!(err.to_string().contains("panic"));
    assert!(sibling_ran.load(Ordering::SeqCst));
}
