//! User Fixtures

use jiff::civil::Date;
use serde::Deserialize;

use crate::profiles::{Gender, Intents, Interest, ProfileDraft, ShowUpRecord};

/// User fixture from YAML
#[derive(Debug, Deserialize)]
pub struct UserFixture {
    /// Email address the user signs in with
    pub email: String,

    /// Completed profile
    pub profile: ProfileFixture,
}

/// Profile fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProfileFixture {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Date of birth, e.g. "1997-06-15"
    pub date_of_birth: Date,

    /// Gender
    pub gender: Gender,

    /// What the user is looking for
    #[serde(default)]
    pub intents: Intents,

    /// Picked interests
    #[serde(default)]
    pub interests: Vec<Interest>,

    /// Preferred age range as `[min, max]`
    pub age_range: (u8, u8),

    /// Search radius in kilometres
    pub max_distance_km: u16,

    /// Attendance history
    #[serde(default)]
    pub show_up: ShowUpRecord,
}

impl ProfileFixture {
    /// Split into the editable profile and its show-up history.
    pub fn into_parts(self) -> (ProfileDraft, ShowUpRecord) {
        let (age_min, age_max) = self.age_range;

        let draft = ProfileDraft {
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            date_of_birth: Some(self.date_of_birth),
            gender: Some(self.gender),
            intents: self.intents,
            interests: self.interests.into_iter().collect(),
            age_min: Some(age_min),
            age_max: Some(age_max),
            max_distance_km: Some(self.max_distance_km),
        };

        (draft, self.show_up)
    }
}
