//! TaskFlow Core
//!
//! Application layer of the TaskFlow client.
//!
//! # Overview
//!
//! - **Board**: a derived view bound to the collaborator that fills it,
//!   with last-writer-wins refresh
//! - **ProjectBoard / TaskBoard / UserDirectory**: the three list screens
//!   and their mutations
//! - **Session**: observable signed-in user plus route guards
//! - **AppContext**: constructor-injected services, no globals
//! - **TaskflowConfig / telemetry**: TOML config with env overrides and
//!   `tracing` initialization
//!
//! # Example
//!
//! ```rust,no_run
//! use taskflow_core::{AppContext, TaskflowConfig};
//!
//! # async fn example() -> Result<(), taskflow_core::AppError> {
//! let context = AppContext::new(TaskflowConfig::load(None)?)?;
//! let board = context.project_board();
//! board.refresh().await?;
//!
//! board.view().set_query("web");
//! for project in &board.view().view() {
//!     println!("{} {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod board;
pub mod config;
pub mod context;
pub mod error;
pub mod projects;
pub mod session;
pub mod tasks;
pub mod telemetry;
pub mod users;

// Re-exports
pub use board::{Board, Fetch, ProjectTasks};
pub use config::{LogConfig, LogFormat, TaskflowConfig, ENV_API_URL, ENV_LOG};
pub use context::AppContext;
pub use error::AppError;
pub use projects::{assignable_members, can_manage, MemberPicker, ProjectBoard, ROOT_ADMIN};
pub use session::{Access, Route, Session};
pub use tasks::TaskBoard;
pub use users::UserDirectory;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the application layer
    pub use crate::{
        AppContext, AppError, ProjectBoard, Route, Session, TaskBoard, TaskflowConfig,
        UserDirectory,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
