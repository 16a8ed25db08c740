use proptest::prelude::*;
use taskflow_model::{EntityId, Priority, Record, Task, TaskStatus};
use taskflow_view::{DerivedView, FetchOutcome, Selection};

fn status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

fn tasks() -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec(
        ("[a-cA-C ]{0,6}", proptest::option::of("[a-c]{0,4}"), status(), priority()),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(n, (title, description, status, priority))| {
                let mut task = Task::new(EntityId(n as u64 + 1), title)
                    .with_status(status)
                    .with_priority(priority);
                task.description = description;
                task
            })
            .collect()
    })
}

fn query_matches(task: &Task, query: &str) -> bool {
    let needle = query.to_lowercase();
    needle.is_empty()
        || task.title.to_lowercase().contains(&needle)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

proptest! {
    #[test]
    fn prop_view_is_ordered_subsequence(
        collection in tasks(),
        query in "[a-cA-C]{0,2}",
        wanted in status(),
    ) {
        let view = DerivedView::with_collection(collection.clone());
        view.set_query(&query);
        view.set_categorical_filter(Task::STATUS, wanted.as_str()).unwrap();

        let expected: Vec<EntityId> = collection
            .iter()
            .filter(|t| query_matches(t, &query) && t.status == wanted)
            .map(Record::id)
            .collect();

        prop_assert_eq!(view.view().ids(), expected);
    }

    #[test]
    fn prop_no_filters_is_identity(collection in tasks()) {
        let view = DerivedView::with_collection(collection.clone());
        let snapshot = view.view();
        prop_assert!(snapshot.is_identity());
        prop_assert_eq!(snapshot.to_vec(), collection);
    }

    #[test]
    fn prop_adding_a_filter_never_grows_the_view(
        collection in tasks(),
        query in "[a-c]{0,2}",
        wanted in priority(),
    ) {
        let view = DerivedView::with_collection(collection);
        view.set_query(&query);
        let before = view.view().ids();

        let key = view.filter_key(Task::PRIORITY).unwrap();
        view.set_filter(key, Selection::parse(wanted.as_str()));
        let after = view.view().ids();

        prop_assert!(after.iter().all(|id| before.contains(id)));
    }

    #[test]
    fn prop_view_is_idempotent(collection in tasks(), query in "[a-c]{0,2}") {
        let view = DerivedView::with_collection(collection);
        view.set_query(&query);
        let revision = view.revision();

        let first = view.view();
        let second = view.view();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.same_rows(&second));
        prop_assert_eq!(view.revision(), revision);
    }

    #[test]
    fn prop_latest_ticket_wins(
        older in tasks(),
        newer in tasks(),
        newer_lands_first in any::<bool>(),
    ) {
        let view = DerivedView::new();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        if newer_lands_first {
            prop_assert_eq!(view.apply_fetch(second, newer.clone()), FetchOutcome::Applied);
            prop_assert_eq!(view.apply_fetch(first, older), FetchOutcome::Stale);
        } else {
            prop_assert_eq!(view.apply_fetch(first, older), FetchOutcome::Applied);
            prop_assert_eq!(view.apply_fetch(second, newer.clone()), FetchOutcome::Applied);
        }

        prop_assert_eq!(view.collection().to_vec(), newer);
    }
}
