pub mod auth;
pub mod dispatch;
pub mod prefs;
pub mod serve;
pub mod shared;
pub mod task;
