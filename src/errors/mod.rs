// Error taxonomy for the auth core, plus its HTTP mapping in `response`.
use thiserror::Error;

pub mod response;
pub mod store;

pub use response::ApiError;
pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    #[error("Name must be at least 3 characters")]
    NameTooShort,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    // Not part of the credential/validation taxonomy: the backing store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Stable machine-readable code, used as the `error` field of API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::EmailTaken => "email_taken",
            AuthError::TermsNotAccepted => "terms_not_accepted",
            AuthError::NameTooShort => "name_too_short",
            AuthError::PasswordTooShort => "password_too_short",
            AuthError::Storage(_) => "storage",
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
