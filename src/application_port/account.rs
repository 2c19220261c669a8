use crate::domain_model::{User, UserId};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("email already registered")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Failures of a collaborator rather than of the caller's input.
    pub fn is_dependency(&self) -> bool {
        matches!(self, AccountError::Store(_) | AccountError::Internal(_))
    }
}

impl From<validator::ValidationErrors> for AccountError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AccountError::Validation(errors.to_string())
    }
}

impl From<crate::domain_model::PrepareError> for AccountError {
    fn from(error: crate::domain_model::PrepareError) -> Self {
        AccountError::Validation(error.to_string())
    }
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AccountError>;
    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AccountError>;
}

#[async_trait::async_trait]
pub trait TokenManager: Send + Sync {
    /// Issues an access token whose subject is the user's id.
    async fn generate_token(&self, user: &User) -> Result<String, AccountError>;
    /// Returns the subject of a valid access token.
    async fn parse_token(&self, token: &str) -> Result<UserId, AccountError>;
    fn new_refresh_token(&self) -> String;
}
