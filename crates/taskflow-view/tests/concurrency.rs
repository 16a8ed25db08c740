use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;
use taskflow_model::{EntityId, Task, TaskStatus};
use taskflow_test_utils::{tasks, tasks_for};
use taskflow_view::{DerivedView, FetchOutcome};

fn shifted(offset: u64) -> Vec<Task> {
    tasks()
        .into_iter()
        .map(|mut task| {
            task.id = EntityId(task.id.0 + offset);
            task
        })
        .collect()
}

fn ids(raw: &[u64]) -> Vec<EntityId> {
    raw.iter().copied().map(EntityId).collect()
}

#[test]
fn readers_never_see_a_mixed_collection() {
    let low = tasks();
    let high = shifted(100);
    let view = DerivedView::with_collection(low.clone());
    view.set_categorical_filter(Task::STATUS, "in-progress").unwrap();
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut seen = 0usize;
                    while !done.load(Ordering::Acquire) {
                        let snapshot = view.view();
                        let got = snapshot.ids();
                        assert!(
                            got == ids(&[2, 4, 5]) || got == ids(&[102, 104, 105]),
                            "torn view {got:?}"
                        );
                        let whole = view.collection();
                        assert_eq!(whole.len(), 6);
                        let first = whole[0].id.0;
                        assert!(whole.iter().all(|t| (t.id.0 > 100) == (first > 100)));
                        seen += 1;
                    }
                    seen
                })
            })
            .collect();

        for round in 0..500 {
            let next = if round % 2 == 0 { high.clone() } else { low.clone() };
            assert!(view.replace_collection(next));
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            assert!(reader.join().unwrap() > 0);
        }
    });

    assert_eq!(view.view().ids(), ids(&[2, 4, 5]));
}

#[test]
fn replacement_makes_older_fetch_stale() {
    let view = DerivedView::with_collection(tasks_for(1));
    let inflight = view.begin_fetch();
    assert!(view.replace_collection(tasks_for(2)));

    assert_eq!(view.apply_fetch(inflight, tasks()), FetchOutcome::Stale);
    assert_eq!(view.view().ids(), ids(&[3, 4]));
}

#[test]
fn no_op_local_edits_leave_fetch_live() {
    let view = DerivedView::with_collection(tasks_for(3));
    let inflight = view.begin_fetch();

    let unchanged = view.get(EntityId(5)).unwrap();
    assert!(!view.upsert(unchanged));
    assert!(view.remove(EntityId(42)).is_none());
    assert!(!view.replace_collection(tasks_for(3)));

    assert_eq!(view.apply_fetch(inflight, tasks()), FetchOutcome::Applied);
    assert_eq!(view.view().len(), 6);
}

#[test]
fn subscriber_holding_borrow_does_not_block_readers() {
    let view = DerivedView::with_collection(tasks());
    let changes = view.subscribe();
    let (tx, rx) = mpsc::channel();

    std::thread::scope(|scope| {
        let seen = changes.borrow();
        scope.spawn(|| {
            view.replace_collection(tasks_for(1));
            tx.send(()).unwrap();
        });
        // the writer blocks on the channel until the borrow ends, never on the view
        std::thread::sleep(Duration::from_millis(50));
        assert!(matches!(view.view().len(), 2 | 6));
        drop(seen);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    });

    assert_eq!(view.view().ids(), ids(&[1, 2]));
    assert_eq!(*view.subscribe().borrow(), view.revision());
}

#[test]
fn localized_labels_filter_fixture_tasks() {
    let view = DerivedView::with_collection(tasks());

    assert!(view.set_categorical_filter(Task::STATUS, "A fazer").unwrap());
    assert_eq!(view.view().ids(), ids(&[6]));

    assert!(view.set_categorical_filter(Task::STATUS, "Em progresso").unwrap());
    let view_now = view.view();
    assert_eq!(view_now.ids(), ids(&[2, 4, 5]));
    assert!(view_now.iter().all(|t| t.status == TaskStatus::InProgress));

    assert!(view.set_categorical_filter(Task::PRIORITY, "Alta").unwrap());
    assert_eq!(view.view().ids(), ids(&[2]));
}
