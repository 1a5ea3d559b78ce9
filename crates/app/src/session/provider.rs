//! Identity providers.

use std::time::Duration;

use async_trait::async_trait;
use mingled::identity::Identity;
use mockall::automock;
use tokio::time::sleep;
use tracing::debug;

use crate::session::{Credentials, SessionError};

/// Stand-in provider that accepts any credentials after a fixed delay.
///
/// Sign-up behaves exactly like sign-in: both return the identity derived
/// from the email address.
#[derive(Debug, Clone)]
pub struct DemoIdentityProvider {
    latency: Duration,
}

impl DemoIdentityProvider {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Identity {
        debug!(latency_ms = self.latency.as_millis(), "contacting identity provider");

        sleep(self.latency).await;

        Identity::for_email(&credentials.email)
    }
}

#[async_trait]
impl IdentityProvider for DemoIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        Ok(self.authenticate(credentials).await)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        Ok(self.authenticate(credentials).await)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, SessionError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, SessionError>;

    async fn sign_out(&self) -> Result<(), SessionError>;
}
