//! Per-resource services over [`ApiClient`](crate::ApiClient)

pub mod activity;
pub mod projects;
pub mod tasks;
pub mod users;

pub use activity::ActivityService;
pub use projects::ProjectService;
pub use tasks::TaskService;
pub use users::{AuthService, UserService};
