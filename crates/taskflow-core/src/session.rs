//! Signed-in user state and route guards
//!
//! [`Session`] holds the current user in a `watch` channel. Updates are
//! distinct-until-changed: setting the same user twice does not wake
//! subscribers.

use crate::error::AppError;
use std::fmt;
use taskflow_client::{AuthService, Credentials, Registration};
use taskflow_model::{EntityId, User};
use tokio::sync::watch;

/// Navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page
    Welcome,
    /// Sign in
    Login,
    /// Sign up
    Register,
    /// Password recovery
    ForgotPassword,
    /// Password reset link target
    ResetPassword,
    /// Project list
    Dashboard,
    /// One project with its tasks
    Project(EntityId),
    /// Own profile
    Profile,
    /// User directory
    Users,
    /// Administration
    Admin,
    /// Anything else
    NotFound,
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone
    Public,
    /// Any signed-in user
    Authenticated,
    /// Administrators only
    Admin,
}

impl Route {
    /// Resolve a URL path
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["welcome"] => Self::Welcome,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["auth", "reset-password"] => Self::ResetPassword,
            ["dashboard"] => Self::Dashboard,
            ["dashboard", "projects", id] => id.parse().map_or(Self::NotFound, Self::Project),
            ["profile"] => Self::Profile,
            ["users"] => Self::Users,
            ["admin"] => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// URL path
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Welcome => "/welcome".into(),
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::ForgotPassword => "/forgot-password".into(),
            Self::ResetPassword => "/auth/reset-password".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::Project(id) => format!("/dashboard/projects/{id}"),
            Self::Profile => "/profile".into(),
            Self::Users => "/users".into(),
            Self::Admin => "/admin".into(),
            Self::NotFound => "/404".into(),
        }
    }

    /// Guard applied to this route
    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Dashboard | Self::Project(_) | Self::Profile => Access::Authenticated,
            Self::Users | Self::Admin => Access::Admin,
            Self::Welcome
            | Self::Login
            | Self::Register
            | Self::ForgotPassword
            | Self::ResetPassword
            | Self::NotFound => Access::Public,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current user plus the auth endpoints
#[derive(Debug)]
pub struct Session {
    auth: AuthService,
    current: watch::Sender<Option<User>>,
}

impl Session {
    /// Create a signed-out session
    #[must_use]
    pub fn new(auth: AuthService) -> Self {
        let (current, _) = watch::channel(None);
        Self { auth, current }
    }

    /// Current user
    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    /// Receiver woken on every distinct user change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// Whether a user is signed in
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Whether the signed-in user is an administrator
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.borrow().as_ref().is_some_and(User::is_admin)
    }

    /// Replace the current user; returns whether it changed
    pub fn set_user(&self, user: Option<User>) -> bool {
        let changed = self.current.send_if_modified(|current| {
            if *current == user {
                return false;
            }
            *current = user;
            true
        });
        if changed {
            match &*self.current.borrow() {
                Some(user) => tracing::info!(user = %user.id, "session user changed"),
                None => tracing::info!("session cleared"),
            }
        }
        changed
    }

    /// Ask the backend who is signed in
    ///
    /// A 401 clears the session and yields `None`.
    ///
    /// # Errors
    /// Any other transport failure
    pub async fn refresh(&self) -> Result<Option<User>, AppError> {
        match self.auth.session().await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) if err.is_unauthorized() => {
                self.set_user(None);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Sign in and load the session user
    ///
    /// # Errors
    /// Invalid credentials, rejected login, or no session afterwards
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AppError> {
        self.auth
            .login(credentials)
            .await
            .map_err(|e| AppError::from_client(e, "log in"))?;
        self.refresh().await?.ok_or(AppError::NotLoggedIn)
    }

    /// Sign out
    ///
    /// # Errors
    /// Transport failure; the local session is cleared regardless
    pub async fn logout(&self) -> Result<(), AppError> {
        let result = self.auth.logout().await;
        self.set_user(None);
        result.map_err(AppError::from)
    }

    /// Create an account; does not sign in
    ///
    /// # Errors
    /// Invalid form or rejected registration
    pub async fn register(&self, registration: &Registration) -> Result<(), AppError> {
        self.auth.register(registration).await?;
        tracing::info!(email = %registration.email, "account registered");
        Ok(())
    }

    /// Allow if signed in, otherwise redirect to [`Route::Login`]
    ///
    /// # Errors
    /// The redirect target
    pub async fn require_authenticated(&self) -> Result<User, Route> {
        match self.auth.session().await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "session check failed");
                self.set_user(None);
                Err(Route::Login)
            }
        }
    }

    /// Allow administrators, otherwise redirect to [`Route::Dashboard`]
    ///
    /// # Errors
    /// The redirect target
    pub async fn require_admin(&self) -> Result<User, Route> {
        match self.auth.session().await {
            Ok(user) if user.is_admin() => Ok(user),
            Ok(_) => Err(Route::Dashboard),
            Err(err) => {
                tracing::warn!(error = %err, "permission check failed");
                Err(Route::Dashboard)
            }
        }
    }

    /// Run the guard `route` declares
    ///
    /// # Errors
    /// The redirect target
    pub async fn guard(&self, route: Route) -> Result<(), Route> {
        match route.access() {
            Access::Public => Ok(()),
            Access::Authenticated => self.require_authenticated().await.map(|_| ()),
            Access::Admin => self.require_admin().await.map(|_| ()),
        }
    }
}
