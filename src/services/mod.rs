//! Domain services: authentication and owner-scoped task management.

pub mod auth;
pub mod tasks;

pub use auth::{AuthService, AuthenticatedUser, UserView};
pub use tasks::{NewTask, TaskPage, TaskPatch, TaskService, TaskView};
