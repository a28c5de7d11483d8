mod auth;
mod prefs;
mod task;

pub use auth::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
pub use prefs::{PrefsCommands, PrefsSetArgs};
pub use task::{TaskCommands, TaskCreateArgs, TaskFeedArgs, TaskListArgs};
