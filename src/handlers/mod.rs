mod auth;
mod users;

pub use auth::{handle_login, handle_register, handle_logout, current_user, auth_events};
pub use users::{list_users, health};
