//! Session service.

use std::{fmt, sync::Arc};

use mingled::{identity::Identity, profiles::ProfileDirectory};
use tracing::{info, warn};

use crate::session::{Credentials, IdentityProvider, SessionError, SessionPhase};

/// Holds the signed-in identity, if any.
pub struct Session {
    provider: Arc<dyn IdentityProvider>,
    identity: Option<Identity>,
}

impl Session {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            identity: None,
        }
    }

    /// Sign in with an existing account.
    ///
    /// Credentials are validated before the provider is contacted.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for missing credentials, or the
    /// provider's error. The current identity is kept on error.
    pub async fn sign_in(&mut self, credentials: Credentials) -> Result<&Identity, SessionError> {
        credentials.validate()?;

        let identity = self.provider.sign_in(&credentials).await?;

        info!(user_uuid = %identity.id, "signed in");

        Ok(&*self.identity.insert(identity))
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for missing credentials, or the
    /// provider's error. The current identity is kept on error.
    pub async fn sign_up(&mut self, credentials: Credentials) -> Result<&Identity, SessionError> {
        credentials.validate()?;

        let identity = self.provider.sign_up(&credentials).await?;

        info!(user_uuid = %identity.id, "signed up");

        Ok(&*self.identity.insert(identity))
    }

    /// Forget the current identity, returning it if someone was signed in.
    ///
    /// Takes effect immediately; the provider is told separately by
    /// [`Session::end_provider_session`].
    pub fn sign_out(&mut self) -> Option<Identity> {
        let identity = self.identity.take()?;

        info!(user_uuid = %identity.id, "signed out");

        Some(identity)
    }

    /// Tell the provider the session has ended. Provider errors are only
    /// logged.
    pub async fn end_provider_session(&self) {
        if let Err(error) = self.provider.sign_out().await {
            warn!(%error, "identity provider sign-out failed");
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Onboarding phase of the current user.
    #[must_use]
    pub fn phase(&self, profiles: &ProfileDirectory) -> SessionPhase {
        match &self.identity {
            None => SessionPhase::Anonymous,
            Some(identity) if profiles.contains(identity.id) => SessionPhase::Active,
            Some(_) => SessionPhase::Authenticated,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
