//! Testing utilities for the TaskFlow workspace
//!
//! Seed fixtures and a scripted transport for driving services without a
//! backend.

#![allow(missing_docs)]

mod fixtures;
mod scripted;

pub use fixtures::{
    admin, categories, category, project_json, projects, projects_json, session_user, tasks,
    tasks_for, tasks_json, user_json, users, users_json,
};
pub use scripted::{Reply, ScriptedTransport};

use std::sync::Arc;
use taskflow_client::ApiClient;

/// Client over a fresh scripted transport, returning both
pub fn scripted_client() -> (Arc<ScriptedTransport>, ApiClient) {
    let transport = Arc::new(ScriptedTransport::new());
    let client = ApiClient::new(transport.clone());
    (transport, client)
}
