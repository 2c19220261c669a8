use crate::application_port::AccountError;
use crate::domain_model::{InputUser, SignInInput, UserId, UserWithToken};

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn sign_up(&self, input: InputUser) -> Result<UserWithToken, AccountError>;
    async fn sign_in(&self, input: SignInInput) -> Result<UserWithToken, AccountError>;
    async fn verify_token(&self, token: &str) -> Result<UserId, AccountError>;
}

/// Policy consulted by the user service; fixed for the lifetime of the service.
#[derive(Debug, Clone)]
pub struct UserConfig {
    pub min_password_len: usize,
    pub max_password_len: usize,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            min_password_len: 6,
            max_password_len: 128,
        }
    }
}
