//! User model and the settings that seed new users.

mod settings;
mod user;

pub use settings::{AuthMethod, ServerSettings, Settings, UserDefaults};
pub use user::{Permissions, Sorting, User, ViewMode};
