use crate::application_port::{
    AccountError, CredentialHasher, TokenManager, UserConfig, UserService,
};
use crate::domain_model::{
    InputUser, SignInInput, User, UserId, UserWithToken, normalize_email,
};
use crate::domain_port::UserRepo;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

pub struct RealUserService {
    config: Arc<UserConfig>,
    user_repo: Arc<dyn UserRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_manager: Arc<dyn TokenManager>,
}

impl RealUserService {
    pub fn new(
        config: Arc<UserConfig>,
        user_repo: Arc<dyn UserRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_manager: Arc<dyn TokenManager>,
    ) -> RealUserService {
        RealUserService {
            config,
            user_repo,
            credential_hasher,
            token_manager,
        }
    }

    fn check_password_policy(&self, password: &str) -> Result<(), AccountError> {
        let len = password.chars().count();
        if len < self.config.min_password_len {
            return Err(AccountError::Validation(format!(
                "password must be at least {} characters",
                self.config.min_password_len
            )));
        }
        if len > self.config.max_password_len {
            return Err(AccountError::Validation(format!(
                "password must be at most {} characters",
                self.config.max_password_len
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn sign_up(&self, input: InputUser) -> Result<UserWithToken, AccountError> {
        let InputUser {
            name,
            email,
            password,
        } = input;

        self.check_password_policy(&password)?;

        let mut user = User {
            id: UserId::new(),
            name,
            email,
            password: self.credential_hasher.hash_password(&password).await?,
            created_at: Utc::now(),
        };
        user.prepare_create()?;

        if let Some(existing) = self.user_repo.find_by_email(&user.email).await? {
            debug!(user_id = %existing.id, "email already registered");
            return Err(AccountError::Conflict);
        }

        user.validate()?;

        let created = self.user_repo.create(&user).await?;
        let access_token = self.token_manager.generate_token(&created).await?;

        info!(user_id = %created.id, "user signed up");
        Ok(UserWithToken {
            user: created,
            access_token,
        })
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn sign_in(&self, input: SignInInput) -> Result<UserWithToken, AccountError> {
        let SignInInput { email, password } = input;

        let found = self
            .user_repo
            .find_by_email(&normalize_email(&email))
            .await?
            .ok_or(AccountError::NotFound)?;

        let ok = self
            .credential_hasher
            .verify_password(&password, &found.password)
            .await?;
        if !ok {
            debug!(user_id = %found.id, "password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        let access_token = self.token_manager.generate_token(&found).await?;

        info!(user_id = %found.id, "user signed in");
        Ok(UserWithToken {
            user: found,
            access_token,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<UserId, AccountError> {
        self.token_manager.parse_token(token).await
    }
}
