use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use taskflow_client::{Credentials, Method};
use taskflow_core::{AppContext, AppError, Route, TaskflowConfig};
use taskflow_model::{EntityId, Role};
use taskflow_test_utils::{session_user, user_json, users_json, ScriptedTransport};

fn context() -> (Arc<ScriptedTransport>, AppContext) {
    let transport = Arc::new(ScriptedTransport::new());
    let context = AppContext::with_transport(TaskflowConfig::new(), transport.clone());
    (transport, context)
}

#[tokio::test]
async fn login_loads_session_user() {
    let (transport, context) = context();
    transport
        .json(Method::Post, "auth/login", json!({"ok": true}))
        .json(Method::Get, "auth/session", user_json(3));

    let session = context.session();
    let user = session
        .login(&Credentials::new("maria@taskflow.com", "secret"))
        .await
        .unwrap();

    assert_eq!(user, session_user(3));
    assert!(session.is_logged_in());
    assert!(!session.is_admin());
}

#[tokio::test]
async fn rejected_login_leaves_session_empty() {
    let (transport, context) = context();
    transport.status(Method::Post, "auth/login", 401);

    let err = context
        .session()
        .login(&Credentials::new("maria@taskflow.com", "wrong"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!context.session().is_logged_in());
    assert_eq!(transport.calls(Method::Get, "auth/session"), 0);
}

#[tokio::test]
async fn logout_clears_even_when_backend_fails() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "auth/session", user_json(2))
        .status(Method::Post, "auth/logout", 500);

    let session = context.session();
    session.refresh().await.unwrap();
    assert!(session.is_logged_in());

    assert!(session.logout().await.is_err());
    assert_eq!(session.current(), None);
}

#[tokio::test]
async fn same_user_does_not_wake_subscribers() {
    let (transport, context) = context();
    transport.json(Method::Get, "auth/session", user_json(2));

    let session = context.session();
    let mut updates = session.subscribe();

    session.refresh().await.unwrap();
    assert!(updates.has_changed().unwrap());
    updates.borrow_and_update();

    session.refresh().await.unwrap();
    assert!(!updates.has_changed().unwrap());

    let mut promoted = session_user(2);
    promoted.roles = vec![Role::Administrator];
    assert!(session.set_user(Some(promoted)));
    assert!(updates.has_changed().unwrap());
}

#[tokio::test]
async fn expired_session_refreshes_to_none() {
    let (transport, context) = context();
    transport.status(Method::Get, "auth/session", 401);

    assert_eq!(context.session().refresh().await.unwrap(), None);
}

#[tokio::test]
async fn server_error_on_refresh_is_returned() {
    let (transport, context) = context();
    transport.status(Method::Get, "auth/session", 503);

    let err = context.session().refresh().await.unwrap_err();
    assert!(matches!(err, AppError::Client(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn guards_redirect_by_access_level() {
    let (transport, context) = context();
    transport
        .status(Method::Get, "auth/session", 401)
        .json(Method::Get, "auth/session", user_json(3))
        .json(Method::Get, "auth/session", user_json(1));
    let session = context.session();

    assert_eq!(session.guard(Route::Welcome).await, Ok(()));
    assert_eq!(transport.calls(Method::Get, "auth/session"), 0);

    assert_eq!(session.guard(Route::Dashboard).await, Err(Route::Login));
    assert_eq!(session.guard(Route::Users).await, Err(Route::Dashboard));
    assert_eq!(session.guard(Route::Admin).await, Ok(()));
    assert_eq!(transport.calls(Method::Get, "auth/session"), 3);
}

#[tokio::test]
async fn authenticated_guard_loads_user() {
    let (transport, context) = context();
    transport.json(Method::Get, "auth/session", user_json(4));

    let user = context.session().require_authenticated().await.unwrap();
    assert_eq!(user.id, EntityId(4));
    assert_eq!(context.session().current().map(|u| u.id), Some(EntityId(4)));
    assert_eq!(
        Route::parse("/dashboard/projects/2").access(),
        taskflow_core::Access::Authenticated
    );
}

#[tokio::test]
async fn directory_filters_by_role_and_grants() {
    let (transport, context) = context();
    transport
        .json(Method::Get, "users", users_json())
        .json(Method::Post, "users/4/roles", json!({}));

    let directory = context.user_directory().unwrap();
    directory.refresh().await.unwrap();
    directory.filter_role(Some(&Role::Member));
    assert_eq!(directory.view().view().ids(), vec![EntityId(3), EntityId(4)]);

    directory.view().set_query("pedro");
    assert_eq!(directory.view().view().ids(), vec![EntityId(4)]);

    directory.assign_role(EntityId(4), EntityId(2)).await.unwrap();
    let grant = transport.last(Method::Post, "users/4/roles").unwrap();
    assert_eq!(grant.json(), Some(&json!({"roleId": 2})));
    assert_eq!(transport.calls(Method::Get, "users"), 2);
}
