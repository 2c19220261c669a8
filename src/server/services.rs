use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserBackend {
    Real,
    Fake,
}

impl FromStr for UserBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "real" => Ok(UserBackend::Real),
            "fake" => Ok(UserBackend::Fake),
            other => anyhow::bail!("Unknown user backend: {}", other),
        }
    }
}

/// Concrete adapters chosen at startup.
pub struct Deps {
    pub config: Arc<UserConfig>,
    pub user_repo: Arc<dyn UserRepo>,
    pub credential_hasher: Arc<dyn CredentialHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub probes: Vec<Arc<dyn HealthProbe>>,
    pub user_backend: UserBackend,
}

pub struct Services {
    pub user: Arc<dyn UserService>,
    probes: Vec<Arc<dyn HealthProbe>>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ProbeStatus {
    pub name: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Services {
    pub fn new(deps: Deps) -> Self {
        let user: Arc<dyn UserService> = match deps.user_backend {
            UserBackend::Fake => Arc::new(FakeUserService::new()),
            UserBackend::Real => Arc::new(RealUserService::new(
                deps.config,
                deps.user_repo,
                deps.credential_hasher,
                deps.token_manager,
            )),
        };

        Services {
            user,
            probes: deps.probes,
        }
    }

    pub async fn health(&self) -> Vec<ProbeStatus> {
        let mut out = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            let res = probe.ping().await;
            out.push(ProbeStatus {
                name: probe.name(),
                ok: res.is_ok(),
                error: res.err().map(|e| e.to_string()),
            });
        }
        out
    }
}
