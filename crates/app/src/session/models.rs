//! Session models.

use std::fmt;

use mingled::validation::ValidationError;

/// Email and password as entered in the identity form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank email or an empty
    /// password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }

        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }

        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the current user is in the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nobody is signed in.
    Anonymous,

    /// Signed in, profile not completed yet.
    Authenticated,

    /// Signed in with a completed profile.
    Active,
}
