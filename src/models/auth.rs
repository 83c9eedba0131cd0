use serde::{Deserialize, Serialize};
use super::user::AuthUser;

/// Success payload of `login` and `register`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthResponse {
    pub message: String,
    pub user: AuthUser,
    pub token: String,
}
