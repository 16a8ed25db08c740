use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use taskflow_client::{Method, ProjectDraft, TaskDraft};
use taskflow_core::{AppContext, AppError, TaskflowConfig};
use taskflow_model::{EntityId, ProjectStatus, TaskStatus};
use taskflow_view::Selection;
use taskflow_test_utils::{
    projects, projects_json, session_user, tasks_json, users_json, ScriptedTransport,
};
use tokio::sync::Notify;

fn context() -> (Arc<ScriptedTransport>, AppContext) {
    let transport = Arc::new(ScriptedTransport::new());
    let context = AppContext::with_transport(TaskflowConfig::new(), transport.clone());
    (transport, context)
}

fn first_projects(n: usize) -> Value {
    serde_json::to_value(&projects()[..n]).unwrap()
}

#[tokio::test]
async fn older_fetch_landing_late_is_discarded() {
    let (transport, context) = context();
    let gate = Arc::new(Notify::new());
    transport
        .gated(Method::Get, "projects", gate.clone(), first_projects(1))
        .json(Method::Get, "projects", projects_json());

    let board = context.project_board();
    let slow = tokio::spawn({
        let board = board.clone();
        async move { board.refresh().await }
    });
    while transport.calls(Method::Get, "projects") < 1 {
        tokio::task::yield_now().await;
    }

    let fast = board.refresh().await.unwrap();
    assert!(fast.is_applied());
    assert_eq!(board.view().view().len(), 4);

    gate.notify_one();
    let late = slow.await.unwrap().unwrap();
    assert!(!late.is_applied());
    assert_eq!(board.view().view().len(), 4);
}

#[tokio::test]
async fn sequential_fetches_each_apply() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "projects", first_projects(2))
        .json(Method::Get, "projects", projects_json());

    let board = context.project_board();
    assert!(board.refresh().await.unwrap().is_applied());
    assert_eq!(board.view().view().len(), 2);
    assert!(board.refresh().await.unwrap().is_applied());
    assert_eq!(board.view().view().len(), 4);
}

#[tokio::test]
async fn filters_survive_refresh() {
    let (transport, context) = context();
    transport.json(Method::Get, "projects", projects_json());

    let board = context.project_board();
    board
        .view()
        .set_categorical_filter("status", "done")
        .unwrap();
    board.refresh().await.unwrap();

    let view = board.view().view();
    assert_eq!(view.ids(), vec![EntityId(4)]);
    assert_eq!(view.get(0).map(|p| p.status), Some(ProjectStatus::Done));
}

#[tokio::test]
async fn project_mutations_refetch_the_list() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "projects", projects_json())
        .json(Method::Post, "projects", json!({"id": 5}))
        .json(Method::Put, "projects/2", json!({}))
        .json(Method::Delete, "projects/3", Value::Null);

    let board = context.project_board();
    let draft = ProjectDraft::new("Data Platform")
        .with_category(EntityId(1))
        .with_dates(
            chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );

    board.create(&draft).await.unwrap();
    board.finalize(EntityId(2)).await.unwrap();
    board.delete(EntityId(3)).await.unwrap();

    assert_eq!(transport.calls(Method::Get, "projects"), 3);
    let create = transport.last(Method::Post, "projects").unwrap();
    assert_eq!(create.json().and_then(|b| b.get("status")), Some(&json!("active")));
    let finalize = transport.last(Method::Put, "projects/2").unwrap();
    assert_eq!(finalize.json(), Some(&json!({"status": "done"})));
}

#[tokio::test]
async fn forbidden_mutation_is_reported_and_list_kept() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "projects", projects_json())
        .status(Method::Delete, "projects/1", 403);

    let board = context.project_board();
    board.refresh().await.unwrap();
    let revision = board.view().revision();

    let err = board.delete(EntityId(1)).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden { action: "delete project" }));
    assert_eq!(board.view().revision(), revision);
    assert_eq!(transport.calls(Method::Get, "projects"), 1);
}

#[tokio::test]
async fn member_candidates_hide_creator_and_root_admin() {
    let (transport, context) = context();
    transport.json(Method::Get, "users", users_json());

    let board = context.project_board();
    let picked = board
        .member_candidates(&session_user(2), taskflow_core::MemberPicker::Create)
        .await
        .unwrap();
    let ids: Vec<_> = picked.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![EntityId(3), EntityId(4)]);
}

#[tokio::test]
async fn task_status_change_patches_locally() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "projects/3/tasks", tasks_json(3))
        .json(Method::Put, "tasks/6", json!({}));

    let board = context.task_board(EntityId(3));
    board.refresh().await.unwrap();
    let key = board.view().filter_key("status").unwrap();
    board.view().set_filter(key, Selection::from("todo"));
    assert_eq!(board.view().view().ids(), vec![EntityId(6)]);

    let moved = board.set_status(EntityId(6), TaskStatus::InProgress).await.unwrap();
    assert_eq!(moved.status, TaskStatus::InProgress);
    assert!(board.view().view().is_empty());
    assert_eq!(transport.calls(Method::Get, "projects/3/tasks"), 1);

    let sent = transport.last(Method::Put, "tasks/6").unwrap();
    assert_eq!(
        sent.json().and_then(|b| b.get("title")),
        Some(&json!("Launch email campaign"))
    );
}

#[tokio::test]
async fn local_patch_supersedes_inflight_fetch() {
    let (transport, context) = context();
    let gate = Arc::new(Notify::new());
    transport
        .json(Method::Get, "projects/3/tasks", tasks_json(3))
        .gated(Method::Get, "projects/3/tasks", gate.clone(), tasks_json(3))
        .json(Method::Put, "tasks/5", json!({}));

    let board = context.task_board(EntityId(3));
    board.refresh().await.unwrap();

    let inflight = tokio::spawn({
        let board = board.clone();
        async move { board.refresh().await }
    });
    while transport.calls(Method::Get, "projects/3/tasks") < 2 {
        tokio::task::yield_now().await;
    }

    board.set_status(EntityId(5), TaskStatus::Completed).await.unwrap();
    gate.notify_one();

    assert!(!inflight.await.unwrap().unwrap().is_applied());
    assert_eq!(
        board.view().get(EntityId(5)).map(|t| t.status),
        Some(TaskStatus::Completed)
    );
}

#[tokio::test]
async fn task_board_columns_cover_every_status() {
    let (transport, context) = context();
    transport.json(Method::Get, "projects/1/tasks", tasks_json(1));

    let board = context.task_board(EntityId(1));
    board.refresh().await.unwrap();
    let columns = board.columns();

    assert_eq!(columns.len(), 3);
    assert!(columns[&TaskStatus::Todo].is_empty());
    assert_eq!(columns[&TaskStatus::InProgress].len(), 1);
    assert_eq!(columns[&TaskStatus::Completed].len(), 1);
}

#[tokio::test]
async fn created_task_appears_after_refetch() {
    let (transport, context) = context();
    let mut with_new = tasks_json(1);
    if let Value::Array(items) = &mut with_new {
        items.push(json!({"id": 7, "projectId": 1, "title": "Write copy", "status": "todo"}));
    }
    transport
        .json(Method::Get, "projects/1/tasks", tasks_json(1))
        .json(Method::Get, "projects/1/tasks", with_new)
        .json(Method::Post, "projects/1/tasks", json!({"id": 7}));

    let board = context.task_board(EntityId(1));
    board.refresh().await.unwrap();
    board.create(&TaskDraft::new("Write copy")).await.unwrap();

    assert_eq!(board.view().view().len(), 3);
    assert_eq!(
        board.view().get(EntityId(7)).map(|t| t.title),
        Some("Write copy".to_string())
    );
}

#[tokio::test]
async fn deleted_task_leaves_view() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "projects/2/tasks", tasks_json(2))
        .json(Method::Delete, "tasks/3", Value::Null);

    let board = context.task_board(EntityId(2));
    board.refresh().await.unwrap();
    board.delete(EntityId(3)).await.unwrap();

    assert_eq!(board.view().view().ids(), vec![EntityId(4)]);
}

#[tokio::test]
async fn comment_thread_reloads_after_posting() {
    let (transport, context) = context();
    transport
        .json(Method::Post, "tasks/1/comments", json!({"id": 10}))
        .json(
            Method::Get,
            "tasks/1/comments",
            json!([{"id": 10, "body": "Looks good", "taskId": 1}]),
        );

    let board = context.task_board(EntityId(1));
    let thread = board.add_comment(EntityId(1), "Looks good").await.unwrap();
    assert_eq!(thread.len(), 1);

    let blank = board.add_comment(EntityId(1), "   ").await.unwrap_err();
    assert!(matches!(blank, AppError::Client(_)));
    assert_eq!(transport.calls(Method::Post, "tasks/1/comments"), 1);
}

#[tokio::test]
async fn task_activity_loads_comments_and_attachments() {
    let (transport, context) = context();
    transport
        .json(
            Method::Get,
            "tasks/2/comments",
            json!([{"id": 1, "body": "On it", "taskId": 2}]),
        )
        .json(
            Method::Get,
            "tasks/2/attachments",
            json!([{"id": 3, "fileName": "nav.png", "size": 1024}]),
        );

    let board = context.task_board(EntityId(1));
    let (comments, attachments) = board.activity(EntityId(2)).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(attachments[0].file_name, "nav.png");
}
