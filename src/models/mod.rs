mod user;
mod forms;
mod auth;

pub use user::{AuthUser, Role, UserRecord, ADMIN_EMAIL, USER_EMAIL};
pub use forms::{LoginForm, RegisterForm};
pub use auth::AuthResponse;
