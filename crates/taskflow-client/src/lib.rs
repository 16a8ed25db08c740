//! TaskFlow Client
//!
//! REST collaborators for the TaskFlow backend.
//!
//! # Overview
//!
//! - **Transport**: the async seam every request goes through
//! - **HttpTransport**: reqwest implementation with a cookie-backed session
//! - **ApiClient**: typed get/post/put/patch/delete helper
//! - **Services**: projects, tasks, comments/attachments, users, auth
//! - **Drafts**: request payloads validated before they are sent
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use taskflow_client::{ApiClient, HttpTransport, ProjectService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new("http://localhost:3000", Duration::from_secs(10))?;
//! let projects = ProjectService::new(ApiClient::new(Arc::new(transport)));
//!
//! for project in projects.list().await? {
//!     println!("{} {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod draft;
pub mod error;
pub mod http;
pub mod request;
pub mod services;
pub mod transport;

// Re-exports
pub use client::ApiClient;
pub use draft::{
    CommentDraft, Credentials, ProfileUpdate, ProjectDraft, Registration, RoleAssignment,
    TaskDraft, Validate,
};
pub use error::{ClientError, TransportError, ValidationError};
pub use http::{HttpTransport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use request::{Body, Method, Part, Request};
pub use services::{ActivityService, AuthService, ProjectService, TaskService, UserService};
pub use transport::Transport;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for talking to the backend
    pub use crate::{
        ApiClient, ClientError, HttpTransport, ProjectDraft, ProjectService, TaskDraft,
        TaskService, Transport, UserService,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
