//! Fixtures
//!
//! Seed data for the demo, loaded from YAML.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    activities::ActivityKey,
    attendance::AttendanceLedger,
    catalog::{Catalog, CatalogError},
    fixtures::{
        activities::{ActivityFixture, AttendanceFixture},
        users::UserFixture,
    },
    identity::{UserUuid, user_uuid_for_email},
    profiles::{ProfileDirectory, ProfileError},
    signups::{Applicant, Decision, ReviewState, SignupError},
};

pub mod activities;
pub mod users;

/// The bundled demo data set.
pub const DEMO_YAML: &str = include_str!("../../fixtures/demo.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A section referred to a user key that is not defined
    #[error("User not found: {0}")]
    UnknownUser(String),

    /// A section referred to an activity key that is not defined
    #[error("Activity not found: {0}")]
    UnknownActivity(String),

    /// An activity failed validation
    #[error("Invalid activity {key}: {source}")]
    Catalog {
        /// Fixture key of the activity
        key: String,

        /// Underlying error
        #[source]
        source: CatalogError,
    },

    /// An applicant could not be seeded
    #[error("Invalid applicant on {key}: {source}")]
    Signup {
        /// Fixture key of the activity
        key: String,

        /// Underlying error
        #[source]
        source: SignupError,
    },

    /// A profile failed validation
    #[error("Invalid profile for {key}: {source}")]
    Profile {
        /// Fixture key of the user
        key: String,

        /// Underlying error
        #[source]
        source: ProfileError,
    },
}

#[derive(Debug, Deserialize)]
struct DemoFixture {
    users: FxHashMap<String, UserFixture>,
    activities: Vec<ActivityFixture>,
    attendance: Option<AttendanceFixture>,
}

/// Seeded in-memory state for the demo.
#[derive(Debug)]
pub struct Demo {
    /// Activities and their signups
    pub catalog: Catalog,

    /// Member profiles
    pub profiles: ProfileDirectory,

    /// Attendance roster of the event being wrapped up
    pub attendance: AttendanceLedger,

    users: FxHashMap<String, UserUuid>,
    activities: FxHashMap<String, ActivityKey>,
}

impl Demo {
    /// Load the bundled demo data, with start times relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the bundled data is invalid.
    pub fn load(now: Timestamp) -> Result<Self, FixtureError> {
        Self::from_yaml(DEMO_YAML, now)
    }

    /// Load demo data from a YAML document, with start times relative to `now`.
    ///
    /// Activities are listed newest first, so they are created in reverse
    /// document order.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the YAML is malformed, refers to unknown
    /// users or activities, or contains data that fails validation.
    pub fn from_yaml(yaml: &str, now: Timestamp) -> Result<Self, FixtureError> {
        let fixture: DemoFixture = serde_norway::from_str(yaml)?;

        let mut demo = Self {
            catalog: Catalog::new(),
            profiles: ProfileDirectory::new(),
            attendance: AttendanceLedger::new(),
            users: FxHashMap::default(),
            activities: FxHashMap::default(),
        };

        let mut names = FxHashMap::default();

        for (key, user) in fixture.users {
            let id = user_uuid_for_email(&user.email);
            let (draft, show_up) = user.profile.into_parts();

            let profile = demo
                .profiles
                .restore(id, draft, show_up)
                .map_err(|source| FixtureError::Profile {
                    key: key.clone(),
                    source,
                })?;

            names.insert(id, profile.display_name());
            demo.users.insert(key, id);
        }

        for activity in fixture.activities.iter().rev() {
            demo.seed_activity(activity, &names, now)?;
        }

        if let Some(attendance) = fixture.attendance {
            let activity = demo.activity(&attendance.activity)?;
            let mut ledger = AttendanceLedger::for_activity(activity);

            for participant in &attendance.participants {
                let id = demo.user(participant)?;
                let name = names.get(&id).cloned().unwrap_or_default();

                ledger.register(id, name);
            }

            demo.attendance = ledger;
        }

        Ok(demo)
    }

    fn seed_activity(
        &mut self,
        fixture: &ActivityFixture,
        names: &FxHashMap<UserUuid, String>,
        now: Timestamp,
    ) -> Result<(), FixtureError> {
        let host = self.user(&fixture.host)?;

        let key = self
            .catalog
            .create(fixture.draft(host, now))
            .map_err(|source| FixtureError::Catalog {
                key: fixture.key.clone(),
                source,
            })?
            .key;

        self.activities.insert(fixture.key.clone(), key);

        let signup_error = |source| FixtureError::Signup {
            key: fixture.key.clone(),
            source,
        };

        for applicant in &fixture.applicants {
            let user = self.user(&applicant.user)?;
            let name = names.get(&user).cloned().unwrap_or_default();

            let signup = self
                .catalog
                .apply(key, Applicant::new(user, name))
                .map_err(signup_error)?;

            self.catalog
                .set_rank(signup.key, applicant.rank)
                .map_err(signup_error)?;

            let decision = match applicant.state {
                ReviewState::Pending => None,
                ReviewState::Accepted => Some(Decision::Accept),
                ReviewState::Rejected => Some(Decision::Reject),
            };

            if let Some(decision) = decision {
                self.catalog
                    .review(signup.key, decision)
                    .map_err(signup_error)?;
            }
        }

        Ok(())
    }

    /// Id of the user with fixture key `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownUser`] if the key is not defined.
    pub fn user(&self, key: &str) -> Result<UserUuid, FixtureError> {
        self.users
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::UnknownUser(key.to_string()))
    }

    /// Catalog key of the activity with fixture key `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownActivity`] if the key is not defined.
    pub fn activity(&self, key: &str) -> Result<ActivityKey, FixtureError> {
        self.activities
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::UnknownActivity(key.to_string()))
    }
}
