//! Application context
//!
//! Everything the screens need is built here from one [`Transport`] and
//! handed out explicitly. There is no global client or session.

use crate::config::TaskflowConfig;
use crate::error::AppError;
use crate::projects::ProjectBoard;
use crate::session::Session;
use crate::tasks::TaskBoard;
use crate::users::UserDirectory;
use std::sync::Arc;
use taskflow_client::{
    ActivityService, ApiClient, AuthService, ClientError, HttpTransport, ProjectService,
    TaskService, Transport, UserService,
};
use taskflow_model::EntityId;

/// Shared services and session
#[derive(Debug, Clone)]
pub struct AppContext {
    config: TaskflowConfig,
    api: ApiClient,
    session: Arc<Session>,
    projects: ProjectService,
    tasks: TaskService,
    activity: ActivityService,
    users: UserService,
}

impl AppContext {
    /// Connect to the configured backend over HTTP
    ///
    /// # Errors
    /// The HTTP client could not be built
    pub fn new(config: TaskflowConfig) -> Result<Self, AppError> {
        let transport = HttpTransport::new(config.api_url.clone(), config.timeout())
            .map_err(ClientError::from)?;
        tracing::debug!(api_url = %config.api_url, "http transport ready");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build over any transport
    #[must_use]
    pub fn with_transport(config: TaskflowConfig, transport: Arc<dyn Transport>) -> Self {
        let api = ApiClient::new(transport);
        Self {
            session: Arc::new(Session::new(AuthService::new(api.clone()))),
            projects: ProjectService::new(api.clone()),
            tasks: TaskService::new(api.clone()),
            activity: ActivityService::new(api.clone()),
            users: UserService::new(api.clone()),
            api,
            config,
        }
    }

    /// Effective configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TaskflowConfig {
        &self.config
    }

    /// Raw API client
    #[inline]
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The session, shared by every clone of this context
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Project endpoints
    #[inline]
    #[must_use]
    pub fn projects(&self) -> &ProjectService {
        &self.projects
    }

    /// New dashboard board
    #[must_use]
    pub fn project_board(&self) -> ProjectBoard {
        ProjectBoard::new(self.projects.clone(), self.users.clone())
    }

    /// New task board for `project`
    #[must_use]
    pub fn task_board(&self, project: EntityId) -> TaskBoard {
        TaskBoard::new(project, self.tasks.clone(), self.activity.clone())
    }

    /// New user directory
    ///
    /// # Errors
    /// Never in practice; see [`UserDirectory::new`]
    pub fn user_directory(&self) -> Result<UserDirectory, AppError> {
        Ok(UserDirectory::new(self.users.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_test_utils::{session_user, user_json, ScriptedTransport};

    #[tokio::test]
    async fn clones_share_session() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.json(taskflow_client::Method::Get, "auth/session", user_json(2));

        let context = AppContext::with_transport(TaskflowConfig::new(), transport);
        let other = context.clone();

        context.session().refresh().await.unwrap();
        assert_eq!(other.session().current(), Some(session_user(2)));
    }
}
