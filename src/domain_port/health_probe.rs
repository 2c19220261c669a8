#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &'static str;
    async fn ping(&self) -> anyhow::Result<()>;
}
