use crate::application_port::*;
use crate::domain_model::{InputUser, SignInInput, User, UserId, UserWithToken, normalize_email};
use chrono::{DateTime, Utc};

#[derive(Debug, Default)]
pub struct FakeUserService;

impl FakeUserService {
    pub fn new() -> Self {
        Self
    }
}

// Deterministic, storage-free responses for running the HTTP layer alone.
// `taken@example.com` and `ghost@example.com` simulate the conflict and not-found paths.
#[async_trait::async_trait]
impl UserService for FakeUserService {
    async fn sign_up(&self, input: InputUser) -> Result<UserWithToken, AccountError> {
        let email = normalize_email(&input.email);
        if email.is_empty() {
            return Err(AccountError::Validation("email is not valid".into()));
        }
        if email == "taken@example.com" {
            return Err(AccountError::Conflict);
        }
        Ok(get_fake_envelope(&input.name, &email))
    }

    async fn sign_in(&self, input: SignInInput) -> Result<UserWithToken, AccountError> {
        let email = normalize_email(&input.email);
        if email == "ghost@example.com" {
            return Err(AccountError::NotFound);
        }
        Ok(get_fake_envelope("fake", &email))
    }

    async fn verify_token(&self, token: &str) -> Result<UserId, AccountError> {
        if let Some(email) = token.strip_prefix("fake-access-token:") {
            Ok(get_fake_id(email))
        } else {
            Err(AccountError::TokenInvalid)
        }
    }
}

fn get_fake_id(email: &str) -> UserId {
    UserId(uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, email.as_bytes()))
}

fn get_fake_envelope(name: &str, email: &str) -> UserWithToken {
    UserWithToken {
        user: User {
            id: get_fake_id(email),
            name: name.to_string(),
            email: email.to_string(),
            password: String::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        },
        access_token: format!("fake-access-token:{}", email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_stable_per_email() {
        let svc = FakeUserService::new();
        let a = svc
            .sign_in(SignInInput {
                email: "Bob@example.com".into(),
                password: "x".into(),
            })
            .await
            .unwrap();
        let id = svc.verify_token(&a.access_token).await.unwrap();
        assert_eq!(id, a.user.id);
        assert_eq!(a.user.email, "bob@example.com");
    }

    #[tokio::test]
    async fn simulated_failures() {
        let svc = FakeUserService::new();
        let err = svc
            .sign_up(InputUser {
                name: "t".into(),
                email: "taken@example.com".into(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Conflict));
        assert!(matches!(
            svc.verify_token("nope").await,
            Err(AccountError::TokenInvalid)
        ));
    }
}
