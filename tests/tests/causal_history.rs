mod common;
use std::sync::Arc;

use anyhow::Result;
use common::*;
use deduce_core::{
    history::{self, Falsification, ThreadEvent, Time, WorkerId},
    CausalError, FactStore, FalsifiedTime, HistoryConfig, SharedFactStore,
};

/// Every falsifying node is disjoint from every falsifying ancestor.
fn assert_audit_trail(origin: &Arc<Time<Claim>>) {
    for node in origin.descendant_layers().into_iter().flatten() {
        let Some(facts) = node.falsified() else { continue };
        assert!(!facts.is_empty());
        for ancestor in node.ancestors().iter().skip(1) {
            if let Some(earlier) = ancestor.falsified() {
                assert!(facts.is_disjoint(earlier), "{node} repeats facts of {ancestor}");
            }
        }
    }
}

#[test]
fn test_claim_retirement_chain() -> Result<()> {
    let store = SharedFactStore::new();
    let origin = Time::origin();
    let (f1, f2, f3) = (Claim::new(0, 1), Claim::new(0, 2), Claim::new(40, 5));

    let first = FalsifiedTime::new(Some(&origin), [f1, f2], &store)?;
    let second = FalsifiedTime::new(Some(first.time()), [f1, f3], &store)?;
    assert_eq!(second.facts().iter().copied().collect::<Vec<_>>(), vec![f3]);

    let err = FalsifiedTime::new(Some(second.time()), [f1], &store).unwrap_err();
    assert!(matches!(err, CausalError::NoUnaccountedFacts { .. }));
    assert_eq!(store.snapshot(), vec![f1, f2, f3]);
    assert_audit_trail(&origin);
    Ok(())
}

#[test]
fn test_racing_workers_record_every_contribution() -> Result<()> {
    const WORKERS: u8 = 12;
    let store = Arc::new(SharedFactStore::new());
    let origin = Time::origin();
    let root = ThreadEvent::root(FalsifiedTime::new(None, [Claim::new(80, 9)], store.as_ref())?, "solver");

    // pairs of workers find the same elimination
    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let (store, origin, root) = (store.clone(), origin.clone(), root.clone());
            std::thread::Builder::new()
                .name(format!("worker-{i}"))
                .spawn(move || -> Result<Option<ThreadEvent<Claim>>, CausalError> {
                    let worker = WorkerId::current();
                    let found = [Claim::new(i / 2, 4), Claim::new(i / 2 + 9, 4)];
                    let step = Falsification::compute(Some(&origin), found)?;
                    match step.commit_fresh(store.as_ref(), &worker) {
                        Ok(terminal) => Ok(Some(ThreadEvent::new(&root, terminal, worker))),
                        Err(CausalError::Stale { .. }) => Ok(None),
                        Err(err) => Err(err),
                    }
                })
                .expect("spawn worker")
        })
        .collect();

    let mut recorded = 0;
    for handle in handles {
        if handle.join().expect("worker panicked")?.is_some() {
            recorded += 1;
        }
    }

    assert_eq!(root.children().len(), recorded);
    assert!(recorded >= (WORKERS / 2) as usize);
    assert_eq!(store.len(), WORKERS as usize + 1);
    for child in root.children() {
        assert!(child.worker().as_str().starts_with("worker-"));
        assert_eq!(child.parent(), Some(root.clone()));
    }
    Ok(())
}

#[test]
fn test_generations_of_workers() -> Result<()> {
    let store = SharedFactStore::new();
    let origin = Time::origin();
    let root = ThreadEvent::root(FalsifiedTime::new(Some(&origin), [Claim::new(80, 9)], &store)?, "solver");

    let mut frontier = vec![root.clone()];
    for generation in 0..3u8 {
        let mut next = vec![];
        for (i, parent) in frontier.iter().enumerate() {
            let base = parent.terminal().time().clone();
            for branch in 0..2u8 {
                let claim = Claim::new(generation * 20 + i as u8 * 2 + branch, generation + 1);
                let step = FalsifiedTime::new(Some(&base), [claim], &store)?;
                next.push(ThreadEvent::new(parent, step, format!("g{generation}-{i}-{branch}")));
            }
        }
        frontier = next;
    }

    assert_eq!(root.subtree_len(), 1 + 2 + 4 + 8);
    assert_eq!(frontier.len(), 8);
    let leaf = &frontier[5];
    let chain = leaf.terminal().time().ancestors();
    assert_eq!(chain.len(), 5);
    assert_eq!(chain[3].id(), root.terminal().id());
    assert_audit_trail(&origin);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_recorder_owns_the_tree() -> Result<()> {
    let config: HistoryConfig = serde_json::from_str(r#"{ "recorder_capacity": 2 }"#)?;
    assert_eq!(config.recorder_capacity, 2);

    let store = Arc::new(SharedFactStore::new());
    let origin = Time::origin();
    let initial = FalsifiedTime::new(Some(&origin), [Claim::new(80, 9)], store.as_ref())?;
    let (recorder, task) = history::recorder::spawn(ThreadEvent::root(initial, "solver"), &config);

    let mut handles = vec![];
    for digit in 1..=9u8 {
        let (recorder, store, origin) = (recorder.clone(), store.clone(), origin.clone());
        handles.push(tokio::spawn(async move {
            let step = FalsifiedTime::new(Some(&origin), [Claim::new(digit, digit)], store.as_ref())?;
            anyhow::Ok(recorder.report(recorder.root(), step, format!("task-{digit}")).await?)
        }));
    }
    for handle in handles {
        handle.await??;
    }

    // a plain thread reports through the blocking interface
    let blocking = {
        let (recorder, store, origin) = (recorder.clone(), store.clone(), origin.clone());
        tokio::task::spawn_blocking(move || -> Result<ThreadEvent<Claim>> {
            let step = FalsifiedTime::new(Some(&origin), [Claim::new(80, 1)], store.as_ref())?;
            Ok(recorder.report_blocking(recorder.root(), step, "blocking")?)
        })
    };
    blocking.await??;

    let root = recorder.shutdown().await?;
    task.await?;
    assert_eq!(root.children().len(), 10);
    assert!(store.is_falsified(&Claim::new(80, 1)));
    assert_audit_trail(&origin);
    Ok(())
}

#[test]
fn test_default_history_config() -> Result<()> {
    let config: HistoryConfig = serde_json::from_str("{}")?;
    assert_eq!(config, HistoryConfig::default());
    Ok(())
}
