//! Session errors.

use mingled::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}
