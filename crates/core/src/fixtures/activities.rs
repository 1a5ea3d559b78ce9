//! Activity Fixtures

use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    activities::{ActivityCriteria, ActivityDraft, BudgetBand, Category},
    identity::UserUuid,
    profiles::Gender,
    signups::ReviewState,
};

/// Activity fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ActivityFixture {
    /// Fixture key other sections refer to
    pub key: String,

    /// User key of the host
    pub host: String,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Kind of activity
    pub category: Category,

    /// Start time as an offset from "now", in hours
    pub starts_in_hours: i64,

    /// Area or district label
    pub area: String,

    /// Number of people who can join
    pub max_spots: u8,

    /// Rough price band
    pub budget: BudgetBand,

    /// Optional restrictions
    #[serde(default)]
    pub criteria: Option<CriteriaFixture>,

    /// Signups, in application order
    #[serde(default)]
    pub applicants: Vec<ApplicantFixture>,
}

impl ActivityFixture {
    /// Build the create-form draft for this activity, hosted by `host`.
    pub fn draft(&self, host: UserUuid, now: Timestamp) -> ActivityDraft {
        let criteria = self
            .criteria
            .as_ref()
            .map(CriteriaFixture::to_criteria)
            .unwrap_or_default();

        ActivityDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            category: Some(self.category),
            starts_at: now
                .checked_add(SignedDuration::from_hours(self.starts_in_hours))
                .ok(),
            area: Some(self.area.clone()),
            max_spots: Some(self.max_spots),
            budget: Some(self.budget),
            criteria,
            ..ActivityDraft::new(host)
        }
    }
}

/// Criteria fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CriteriaFixture {
    /// Youngest preferred age
    #[serde(default)]
    pub age_min: Option<u8>,

    /// Oldest preferred age
    #[serde(default)]
    pub age_max: Option<u8>,

    /// Genders the host is looking for
    #[serde(default)]
    pub genders: Vec<Gender>,
}

impl CriteriaFixture {
    fn to_criteria(&self) -> ActivityCriteria {
        ActivityCriteria {
            age_min: self.age_min,
            age_max: self.age_max,
            genders_allowed: self.genders.iter().copied().collect::<SmallVec<_>>(),
        }
    }
}

/// Applicant fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ApplicantFixture {
    /// User key of the applicant
    pub user: String,

    /// Host's star rank
    #[serde(default)]
    pub rank: u8,

    /// Review state
    #[serde(default)]
    pub state: ReviewState,
}

/// Attendance fixture from YAML
#[derive(Debug, Deserialize)]
pub struct AttendanceFixture {
    /// Activity key the roster belongs to
    pub activity: String,

    /// User keys on the roster
    pub participants: Vec<String>,
}
