//! TaskFlow Model
//!
//! Tagged entity schema shared by every TaskFlow crate.
//!
//! # Overview
//!
//! - **EntityId**: one canonical identifier type, accepting numeric and
//!   string forms at the serialization boundary
//! - **Project / Task / User**: typed entities with their workflow enums
//! - **Comment / Attachment**: task activity
//! - **Record**: the searchable and filterable surface of an entity
//!
//! # Example
//!
//! ```rust
//! use taskflow_model::{EntityId, FilterValue, Project, ProjectStatus, Record};
//!
//! let project = Project::new(EntityId(1), "Website Redesign")
//!     .with_status(ProjectStatus::Active);
//!
//! assert_eq!(
//!     project.filter_value(Project::STATUS),
//!     Some(FilterValue::new("active"))
//! );
//! ```

#![warn(missing_docs)]

pub mod activity;
pub mod date;
pub mod error;
pub mod id;
pub mod project;
pub mod record;
pub mod task;
pub mod user;

// Re-exports
pub use activity::{Attachment, Comment};
pub use error::ModelError;
pub use id::EntityId;
pub use project::{Category, CategoryRef, Project, ProjectCounts, ProjectMember, ProjectStatus};
pub use record::{EntityKind, FilterValue, Record, SearchFields};
pub use task::{Priority, Task, TaskStatus, TaskType};
pub use user::{Role, User, UserSummary};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with TaskFlow entities
    pub use crate::{
        EntityId, EntityKind, FilterValue, Priority, Project, ProjectStatus, Record, Role, Task,
        TaskStatus, User,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
