//! Project list: filters, CRUD and member selection

use crate::board::Board;
use crate::error::AppError;
use std::sync::Arc;
use taskflow_client::{ProjectDraft, ProjectService, UserService};
use taskflow_model::{Category, EntityId, Project, User};
use taskflow_view::{DerivedView, FetchOutcome};

/// The built-in administrator account, never offered as a project member
pub const ROOT_ADMIN: EntityId = EntityId(1);

/// Which project form the member picker serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPicker {
    /// New project: the creator becomes manager and is not offered
    Create,
    /// Editing an existing project
    Update,
}

/// Users that may be picked as members
///
/// The root administrator is never offered, and on create neither is the
/// current user. When the current user is the root administrator nobody is
/// excluded.
#[must_use]
pub fn assignable_members(users: &[User], current: &User, picker: MemberPicker) -> Vec<User> {
    let blocked = match picker {
        _ if current.id == ROOT_ADMIN => vec![],
        MemberPicker::Create => vec![current.id, ROOT_ADMIN],
        MemberPicker::Update => vec![ROOT_ADMIN],
    };
    users
        .iter()
        .filter(|user| !blocked.contains(&user.id))
        .cloned()
        .collect()
}

/// Whether `user` may edit, finalize or delete `project`
#[inline]
#[must_use]
pub fn can_manage(project: &Project, user: &User) -> bool {
    project.is_managed_by(user.id) || user.is_admin()
}

/// Dashboard project list
#[derive(Debug, Clone)]
pub struct ProjectBoard {
    board: Board<Project>,
    projects: ProjectService,
    users: UserService,
}

impl ProjectBoard {
    /// Create an empty board
    #[must_use]
    pub fn new(projects: ProjectService, users: UserService) -> Self {
        Self {
            board: Board::new(Arc::new(projects.clone())),
            projects,
            users,
        }
    }

    /// The filtered view
    #[inline]
    #[must_use]
    pub fn view(&self) -> &Arc<DerivedView<Project>> {
        self.board.view()
    }

    /// Re-fetch the project list
    ///
    /// # Errors
    /// Fetch failure; the list is left unchanged
    pub async fn refresh(&self) -> Result<FetchOutcome, AppError> {
        self.board.refresh().await
    }

    /// Canonical project by id
    ///
    /// # Errors
    /// [`AppError::NotFound`] if it is not loaded
    pub fn project(&self, id: EntityId) -> Result<Project, AppError> {
        self.board.entity(id)
    }

    /// Categories for the category filter and form
    ///
    /// # Errors
    /// Fetch failure
    pub async fn categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.projects.categories().await?)
    }

    /// Users the picker offers
    ///
    /// # Errors
    /// Fetch failure
    pub async fn member_candidates(
        &self,
        current: &User,
        picker: MemberPicker,
    ) -> Result<Vec<User>, AppError> {
        let users = self.users.list().await?;
        Ok(assignable_members(&users, current, picker))
    }

    /// Create a project, then re-fetch
    ///
    /// # Errors
    /// Invalid draft or backend rejection
    pub async fn create(&self, draft: &ProjectDraft) -> Result<(), AppError> {
        self.projects
            .create(draft)
            .await
            .map_err(|e| AppError::from_client(e, "create project"))?;
        self.refresh_after("created").await
    }

    /// Edit a project, then re-fetch
    ///
    /// # Errors
    /// Invalid draft, [`AppError::Forbidden`] unless manager or admin
    pub async fn update(&self, id: EntityId, draft: &ProjectDraft) -> Result<(), AppError> {
        self.projects
            .update(id, draft)
            .await
            .map_err(|e| AppError::from_client(e, "update project"))?;
        self.refresh_after("updated").await
    }

    /// Mark a project done, then re-fetch
    ///
    /// # Errors
    /// [`AppError::Forbidden`] unless manager or admin
    pub async fn finalize(&self, id: EntityId) -> Result<(), AppError> {
        self.projects
            .finalize(id)
            .await
            .map_err(|e| AppError::from_client(e, "finalize project"))?;
        self.refresh_after("finalized").await
    }

    /// Delete a project, then re-fetch
    ///
    /// # Errors
    /// [`AppError::Forbidden`] unless manager or admin
    pub async fn delete(&self, id: EntityId) -> Result<(), AppError> {
        self.projects
            .delete(id)
            .await
            .map_err(|e| AppError::from_client(e, "delete project"))?;
        self.refresh_after("deleted").await
    }

    async fn refresh_after(&self, action: &'static str) -> Result<(), AppError> {
        tracing::info!(action, "project changed, refreshing list");
        self.refresh().await.map(|_| ())
    }
}
