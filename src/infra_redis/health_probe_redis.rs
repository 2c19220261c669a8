use crate::domain_port::*;
use anyhow::anyhow;
use redis::aio::ConnectionManager;

pub struct RedisHealthProbe {
    conn: ConnectionManager,
}

impl RedisHealthProbe {
    pub fn new(conn: ConnectionManager) -> Self {
        RedisHealthProbe { conn }
    }

    pub async fn connect(dsn: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(dsn)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self::new(conn))
    }
}

#[async_trait::async_trait]
impl HealthProbe for RedisHealthProbe {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| anyhow!(e))?;
        if pong != "PONG" {
            return Err(anyhow!("unexpected PING reply: {pong}"));
        }
        Ok(())
    }
}
