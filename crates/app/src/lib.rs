//! Session handling, application context and view routing for the Mingled
//! demo app.

pub mod config;
pub mod context;
pub mod observability;
pub mod session;
pub mod views;
