//! Session
//!
//! The signed-in identity and the mocked identity provider behind it.

mod errors;
mod models;
mod provider;
mod service;

pub use errors::*;
pub use models::*;
pub use provider::*;
pub use service::*;
