//! App configuration

use clap::Args;

use crate::config::{auth::AuthConfig, observability::LoggingConfig};

pub mod auth;
pub mod observability;

/// Settings shared by every CLI command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}
