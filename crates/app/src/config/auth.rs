//! Auth Config

use std::time::Duration;

use clap::Args;

/// Identity provider settings.
#[derive(Debug, Clone, Args)]
pub struct AuthConfig {
    /// Simulated identity provider latency in milliseconds
    #[arg(long, env = "MINGLED_AUTH_LATENCY_MS", default_value_t = 800_u64)]
    pub auth_latency_ms: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }
}
