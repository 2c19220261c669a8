use super::util::is_unique_violation;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserRepo { pool }
    }

    fn row_to_user(row: PgRow) -> Result<User, AccountError> {
        let id: UserId = row
            .try_get("id")
            .map_err(|e| AccountError::Store(e.to_string()))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| AccountError::Store(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| AccountError::Store(e.to_string()))?;
        let password: String = row
            .try_get("password_hash")
            .map_err(|e| AccountError::Store(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AccountError::Store(e.to_string()))?;

        Ok(User {
            id,
            name,
            email,
            password,
            created_at,
        })
    }
}

#[async_trait::async_trait]
impl UserRepo for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AccountError> {
        let res = sqlx::query(
            r#"
INSERT INTO users (id, name, email, password_hash, created_at)
VALUES ($1, $2, $3, $4, $5)
RETURNING id, name, email, password_hash, created_at
"#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(row) => Self::row_to_user(row),
            Err(e) if is_unique_violation(&e) => Err(AccountError::Conflict),
            Err(e) => Err(AccountError::Store(format!("insert user: {e}"))),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let row_opt: Option<PgRow> = sqlx::query(
            r#"
SELECT id, name, email, password_hash, created_at
FROM users
WHERE email = $1
"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Store(format!("query user: {e}")))?;

        row_opt.map(Self::row_to_user).transpose()
    }
}

pub struct PostgresHealthProbe {
    pool: PgPool,
}

impl PostgresHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        PostgresHealthProbe { pool }
    }
}

#[async_trait::async_trait]
impl HealthProbe for PostgresHealthProbe {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let _: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
