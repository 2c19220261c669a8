use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_postgres::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::server::*;
use crate::settings::Settings;
use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

// One year.
const MAX_ACCESS_TTL_SECS: u64 = 365 * 24 * 60 * 60;

pub struct Server {
    pub services: Arc<Services>,
    pool: Option<PgPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let user_backend: UserBackend = settings.user.backend.parse()?;

        if settings.jwt.signing_key.is_empty() {
            anyhow::bail!("jwt.signing_key must be set");
        }
        if !(1..=MAX_ACCESS_TTL_SECS).contains(&settings.jwt.access_ttl_secs) {
            anyhow::bail!(
                "jwt.access_ttl_secs must be between 1 and {}",
                MAX_ACCESS_TTL_SECS
            );
        }
        let token_manager: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(JwtConfig {
            issuer: settings.jwt.issuer.clone(),
            audience: settings.jwt.audience.clone(),
            access_ttl: settings.jwt.access_ttl(),
            signing_key: settings.jwt.signing_key.clone().into_bytes(),
        }));
        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher::new());

        let mut probes: Vec<Arc<dyn HealthProbe>> = Vec::new();

        let (user_repo, pool): (Arc<dyn UserRepo>, Option<PgPool>) =
            match settings.store.backend.as_str() {
                "postgres" => {
                    let pool = PgPoolOptions::new()
                        .max_connections(settings.store.max_connections)
                        .connect(&settings.store.postgres_dsn)
                        .await
                        .context("connect to postgres")?;
                    sqlx::migrate!("./migrations")
                        .run(&pool)
                        .await
                        .context("run migrations")?;
                    probes.push(Arc::new(PostgresHealthProbe::new(pool.clone())));
                    let repo: Arc<dyn UserRepo> = Arc::new(PostgresUserRepo::new(pool.clone()));
                    (repo, Some(pool))
                }
                "memory" => {
                    warn!("using in-memory user store; accounts are lost on restart");
                    let repo = Arc::new(MemoryUserRepo::new());
                    probes.push(repo.clone());
                    let repo: Arc<dyn UserRepo> = repo;
                    (repo, None)
                }
                other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
            };

        if settings.redis.enabled {
            let redis = RedisHealthProbe::connect(&settings.redis.dsn)
                .await
                .context("connect to redis")?;
            probes.push(Arc::new(redis));
        }

        let services = Services::new(Deps {
            config: Arc::new(settings.user.to_config()),
            user_repo,
            credential_hasher,
            token_manager,
            probes,
            user_backend,
        });

        info!(
            store = %settings.store.backend,
            user = %settings.user.backend,
            "server started"
        );

        Ok(Self {
            services: Arc::new(services),
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::parse_settings_str;

    fn settings(access_ttl_secs: u64) -> Settings {
        parse_settings_str(&format!(
            r#"
[http]
address = "127.0.0.1:0"

[jwt]
issuer = "turnstile"
audience = "turnstile-clients"
access_ttl_secs = {access_ttl_secs}
signing_key = "server-test-key"

[log]
filter = "info"

[redis]
enabled = false
dsn = "redis://127.0.0.1:6379"

[store]
backend = "memory"
postgres_dsn = ""
max_connections = 1

[user]
backend = "real"
min_password_len = 6
max_password_len = 128
"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn memory_backend_starts() {
        let server = Server::try_new(&settings(900)).await.unwrap();
        assert_eq!(server.services.health().await.len(), 1);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn access_ttl_out_of_range_fails_startup() {
        for ttl in [0, MAX_ACCESS_TTL_SECS + 1, i64::MAX as u64] {
            assert!(Server::try_new(&settings(ttl)).await.is_err(), "ttl {ttl}");
        }
    }
}
