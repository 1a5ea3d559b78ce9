//! Mingled
//!
//! Domain model and in-memory stores for Mingled, a small-group activity
//! organiser: hosts publish activities, members apply, hosts rank and review
//! applicants, then record who turned up.

pub mod activities;
pub mod attendance;
pub mod catalog;
pub mod fixtures;
pub mod identity;
pub mod prelude;
pub mod profiles;
pub mod signups;
pub mod uuids;
pub mod validation;
