//! Identity

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<Identity>;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque id, stable for a given email address.
    pub id: UserUuid,

    /// Email address the user signed in with.
    pub email: String,
}

impl Identity {
    /// Build the identity for an email address.
    ///
    /// Emails are compared case-insensitively, so `A@B.com` and `a@b.com` map
    /// to the same id.
    #[must_use]
    pub fn for_email(email: &str) -> Self {
        let email = email.trim();

        Self {
            id: user_uuid_for_email(email),
            email: email.to_string(),
        }
    }
}

/// Derive the user id for an email address.
#[must_use]
pub fn user_uuid_for_email(email: &str) -> UserUuid {
    UserUuid::from_name(&format!("mailto:{}", email.trim().to_lowercase()))
}
