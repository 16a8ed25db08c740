//! A derived view bound to the collaborator that fills it

use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use taskflow_client::{ClientError, ProjectService, TaskService, UserService};
use taskflow_model::{EntityId, Project, Record, Task, User};
use taskflow_view::{DerivedView, FetchOutcome};

/// Source of a whole entity collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetch<R: Send + Sync + 'static>: Send + Sync {
    /// Fetch every entity
    async fn fetch_all(&self) -> Result<Vec<R>, ClientError>;
}

#[async_trait]
impl Fetch<Project> for ProjectService {
    async fn fetch_all(&self) -> Result<Vec<Project>, ClientError> {
        self.list().await
    }
}

#[async_trait]
impl Fetch<User> for UserService {
    async fn fetch_all(&self) -> Result<Vec<User>, ClientError> {
        self.list().await
    }
}

/// Tasks of one project
#[derive(Debug, Clone)]
pub struct ProjectTasks {
    /// Task endpoints
    pub service: TaskService,
    /// Project the tasks belong to
    pub project: EntityId,
}

#[async_trait]
impl Fetch<Task> for ProjectTasks {
    async fn fetch_all(&self) -> Result<Vec<Task>, ClientError> {
        self.service.list(self.project).await
    }
}

/// [`DerivedView`] plus its fetch collaborator
pub struct Board<R: Record> {
    view: Arc<DerivedView<R>>,
    source: Arc<dyn Fetch<R>>,
}

impl<R: Record> Board<R> {
    /// Create an empty board over `source`
    #[must_use]
    pub fn new(source: Arc<dyn Fetch<R>>) -> Self {
        Self {
            view: Arc::new(DerivedView::new()),
            source,
        }
    }

    /// The view
    #[inline]
    #[must_use]
    pub fn view(&self) -> &Arc<DerivedView<R>> {
        &self.view
    }

    /// Fetch everything and apply it unless a newer result already landed
    ///
    /// On failure the collection is left as it was.
    ///
    /// # Errors
    /// The fetch failure
    pub async fn refresh(&self) -> Result<FetchOutcome, AppError> {
        let ticket = self.view.begin_fetch();
        match self.source.fetch_all().await {
            Ok(entities) => Ok(self.view.apply_fetch(ticket, entities)),
            Err(err) => {
                tracing::warn!(
                    kind = %R::KIND,
                    ticket = ticket.sequence(),
                    error = %err,
                    "fetch failed, keeping current collection"
                );
                Err(err.into())
            }
        }
    }

    /// Canonical entity by id
    ///
    /// # Errors
    /// [`AppError::NotFound`] if it is not in the collection
    pub fn entity(&self, id: EntityId) -> Result<R, AppError> {
        self.view
            .get(id)
            .ok_or(AppError::NotFound { kind: R::KIND, id })
    }
}

impl<R: Record> Clone for Board<R> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            source: Arc::clone(&self.source),
        }
    }
}

impl<R: Record> std::fmt::Debug for Board<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board").field("view", &self.view).finish_non_exhaustive()
    }
}
