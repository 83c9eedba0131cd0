use serde::{Deserialize, Serialize};

pub const ADMIN_EMAIL: &str = "admin@gmail.com";
pub const USER_EMAIL: &str = "user@gmail.com";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// A directory entry as persisted under the `users` key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,  // plaintext, see AuthService docs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub created_at: String,
}

/// Public view of a user: everything but the password.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserRecord {
    pub fn public_view(&self) -> AuthUser {
        AuthUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.unwrap_or_default(),
        }
    }
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.email == ADMIN_EMAIL
    }
}
