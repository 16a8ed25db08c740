//! TaskFlow View
//!
//! Filtered, order-preserving projections over entity collections.
//!
//! # Overview
//!
//! - **DerivedView**: owns one canonical collection plus the filter state and
//!   produces memoized [`ViewSnapshot`]s
//! - **FilterSchema / FilterKey**: categorical field names validated once, at
//!   configuration time
//! - **Selection**: one categorical filter value, with `"all"` meaning none
//! - **FetchTicket**: last-writer-wins sequencing for concurrent fetch-all calls
//!
//! # Example
//!
//! ```rust
//! use taskflow_model::{EntityId, Project, ProjectStatus};
//! use taskflow_view::DerivedView;
//!
//! let view = DerivedView::with_collection(vec![
//!     Project::new(EntityId(1), "Website Redesign").with_status(ProjectStatus::Active),
//!     Project::new(EntityId(2), "Mobile App").with_status(ProjectStatus::Done),
//! ]);
//!
//! view.set_query("web");
//! assert_eq!(view.view().ids(), vec![EntityId(1)]);
//!
//! view.clear_filters();
//! assert_eq!(view.view().ids(), vec![EntityId(1), EntityId(2)]);
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod filter;
pub mod snapshot;

// Re-exports
pub use engine::{DerivedView, FetchOutcome, FetchTicket, Revision};
pub use error::ViewError;
pub use filter::{FilterKey, FilterSchema, FilterState, Selection, ALL};
pub use snapshot::{Iter, ViewSnapshot};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building derived views
    pub use crate::{DerivedView, FetchOutcome, FilterKey, Selection, ViewError, ViewSnapshot};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
