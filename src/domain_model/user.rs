use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    pub fn new() -> Self {
        UserId(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(UserId)
    }
}

/// A registered account. `password` always holds the hasher's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: UserId,
    #[validate(length(min = 1, max = 64, message = "name must be 1-64 characters"))]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[serde(skip_serializing, default)]
    #[validate(length(min = 1, message = "password hash is empty"))]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Normalizes a freshly built candidate and fills the derived fields.
    pub fn prepare_create(&mut self) -> Result<(), PrepareError> {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        if self.password.trim().is_empty() {
            return Err(PrepareError::EmptyPassword);
        }
        self.id = UserId::new();
        self.created_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PrepareError {
    #[error("password must not be empty")]
    EmptyPassword,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Untrusted sign-up payload.
#[derive(Clone, Deserialize)]
pub struct InputUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for InputUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Deserialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInInput")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserWithToken {
    pub user: User,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(email: &str, password: &str) -> User {
        User {
            id: UserId::default(),
            name: "  Ada Lovelace ".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn prepare_create_normalizes_fields() {
        let mut user = candidate("  Ada@Example.COM ", "$argon2id$hash");
        let before = user.id;
        user.prepare_create().unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.id, before);
        assert!(user.created_at > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn prepare_create_rejects_empty_hash() {
        let mut user = candidate("ada@example.com", " ");
        assert_eq!(user.prepare_create(), Err(PrepareError::EmptyPassword));
    }

    #[test]
    fn validate_catches_bad_email_and_name() {
        let mut user = candidate("not-an-email", "$argon2id$hash");
        user.prepare_create().unwrap();
        let errs = user.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("email"));

        let mut user = candidate("ada@example.com", "$argon2id$hash");
        user.name = String::new();
        let errs = user.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("name"));
    }

    #[test]
    fn password_is_never_serialized() {
        let mut user = candidate("ada@example.com", "$argon2id$secret");
        user.prepare_create().unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn debug_output_hides_plaintext() {
        let input = InputUser {
            name: "ada".into(),
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        };
        assert!(!format!("{:?}", input).contains("hunter22"));
    }
}
