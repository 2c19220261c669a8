use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a prepared user. A taken email is reported as `AccountError::Conflict`.
    async fn create(&self, user: &User) -> Result<User, AccountError>;

    /// Look a user up by normalized email. `Ok(None)` means no such user.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;
}
