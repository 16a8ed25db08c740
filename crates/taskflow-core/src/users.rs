//! User directory

use crate::board::Board;
use crate::error::AppError;
use indexmap::IndexMap;
use std::sync::Arc;
use taskflow_client::{ProfileUpdate, UserService};
use taskflow_model::{EntityId, FilterValue, Role, User};
use taskflow_view::{DerivedView, FetchOutcome, FilterKey, Selection, ViewError};

/// User list with search and role filter
#[derive(Debug, Clone)]
pub struct UserDirectory {
    board: Board<User>,
    users: UserService,
    role: FilterKey<User>,
}

impl UserDirectory {
    /// Create an empty directory
    ///
    /// # Errors
    /// [`ViewError::InvalidFilterName`] if users stop exposing a role field
    pub fn new(users: UserService) -> Result<Self, ViewError> {
        let board = Board::new(Arc::new(users.clone()));
        let role = board.view().filter_key(User::ROLE)?;
        Ok(Self { board, users, role })
    }

    /// The filtered view
    #[inline]
    #[must_use]
    pub fn view(&self) -> &Arc<DerivedView<User>> {
        self.board.view()
    }

    /// Re-fetch the directory
    ///
    /// # Errors
    /// Fetch failure; the list is left unchanged
    pub async fn refresh(&self) -> Result<FetchOutcome, AppError> {
        self.board.refresh().await
    }

    /// Canonical user by id
    ///
    /// # Errors
    /// [`AppError::NotFound`] if not loaded
    pub fn user(&self, id: EntityId) -> Result<User, AppError> {
        self.board.entity(id)
    }

    /// Restrict to one role, or lift the restriction with `None`
    pub fn filter_role(&self, role: Option<&Role>) -> bool {
        let selection = role.map_or(Selection::Any, |r| Selection::Only(r.slug()));
        self.view().set_filter(self.role, selection)
    }

    /// Users per primary role, over the whole directory
    #[must_use]
    pub fn role_counts(&self) -> IndexMap<FilterValue, usize> {
        self.view().counts_by(self.role)
    }

    /// Edit the signed-in user's profile and patch the local entry
    ///
    /// # Errors
    /// Blank name or backend rejection
    pub async fn update_profile(&self, me: &User, update: &ProfileUpdate) -> Result<User, AppError> {
        self.users
            .update_profile(update)
            .await
            .map_err(|e| AppError::from_client(e, "update profile"))?;
        let mut patched = me.clone();
        patched.full_name.clone_from(&update.full_name);
        patched.avatar_url.clone_from(&update.avatar_url);
        patched.position.clone_from(&update.position);
        if self.view().get(me.id).is_some() {
            self.view().upsert(patched.clone());
        }
        Ok(patched)
    }

    /// Grant a role, then re-fetch
    ///
    /// # Errors
    /// [`AppError::Forbidden`] unless administrator
    pub async fn assign_role(&self, user: EntityId, role: EntityId) -> Result<(), AppError> {
        self.users
            .assign_role(user, role)
            .await
            .map_err(|e| AppError::from_client(e, "assign role"))?;
        tracing::info!(%user, %role, "role assigned");
        self.refresh().await.map(|_| ())
    }
}
