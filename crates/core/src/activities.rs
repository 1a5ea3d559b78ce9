//! Activities

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::Deserialize;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::{
    identity::UserUuid,
    profiles::{Gender, MAX_AGE, MIN_AGE},
    validation::{UnknownLabel, ValidationError, within},
};

new_key_type! {
    /// Activity Key
    pub struct ActivityKey;
}

/// Smallest number of spots an activity may offer.
pub const MIN_SPOTS: u8 = 1;

/// Largest number of spots an activity may offer.
pub const MAX_SPOTS: u8 = 6;

/// What kind of outing an activity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Galleries, museums, theatre
    Cultural,

    /// Playing or watching sport
    Sports,

    /// Food and drink
    Culinary,

    /// Bars, clubs, late events
    Nightlife,

    /// Hikes and anything outdoors
    Outdoor,

    /// Anything else
    Other,
}

impl Category {
    /// Every category, in the order the feed offers them.
    pub const ALL: [Self; 6] = [
        Self::Cultural,
        Self::Sports,
        Self::Culinary,
        Self::Nightlife,
        Self::Outdoor,
        Self::Other,
    ];

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cultural => "cultural",
            Self::Sports => "sports",
            Self::Culinary => "culinary",
            Self::Nightlife => "nightlife",
            Self::Outdoor => "outdoor",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel::new("category", value))
    }
}

/// Which activities a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every activity
    #[default]
    All,

    /// Only activities in one category
    Only(Category),
}

impl CategoryFilter {
    /// Whether an activity in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        value.parse().map(Self::Only)
    }
}

/// Rough price band of an activity. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    /// Free or under €20
    Free,

    /// €20 to €50
    Medium,

    /// Over €50
    Premium,
}

impl BudgetBand {
    /// Every band, cheapest first.
    pub const ALL: [Self; 3] = [Self::Free, Self::Medium, Self::Premium];

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Medium => "medium",
            Self::Premium => "premium",
        }
    }

    /// Human readable price range.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Free => "Free - Low (<€20)",
            Self::Medium => "Medium (€20-50)",
            Self::Premium => "Premium (>€50)",
        }
    }
}

impl fmt::Display for BudgetBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetBand {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|band| band.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel::new("budget band", value))
    }
}

/// Lifecycle status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityStatus {
    /// Accepting applications
    #[default]
    Open,
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
        }
    }
}

/// Optional restrictions a host puts on who should apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCriteria {
    /// Youngest preferred age
    pub age_min: Option<u8>,

    /// Oldest preferred age
    pub age_max: Option<u8>,

    /// Genders the host is looking for; empty means anyone
    pub genders_allowed: SmallVec<[Gender; 3]>,
}

impl ActivityCriteria {
    /// Check the age bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if an age is outside 18–100 or the
    /// minimum exceeds the maximum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(age_min) = self.age_min {
            within("age_min", age_min, MIN_AGE.into(), MAX_AGE.into())?;
        }

        if let Some(age_max) = self.age_max {
            within("age_max", age_max, MIN_AGE.into(), MAX_AGE.into())?;
        }

        match (self.age_min, self.age_max) {
            (Some(age_min), Some(age_max)) if age_min > age_max => {
                Err(ValidationError::InvertedRange {
                    min_field: "age_min",
                    max_field: "age_max",
                })
            }
            _ => Ok(()),
        }
    }
}

/// Activity as submitted from the create form. Every field but the criteria
/// is required; `None` means the user left it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    /// The user creating the activity
    pub host: UserUuid,

    /// Short title
    pub title: Option<String>,

    /// Longer description
    pub description: Option<String>,

    /// Kind of activity
    pub category: Option<Category>,

    /// When it starts
    pub starts_at: Option<Timestamp>,

    /// Area or district label
    pub area: Option<String>,

    /// Number of people who can join
    pub max_spots: Option<u8>,

    /// Rough price band
    pub budget: Option<BudgetBand>,

    /// Optional restrictions
    pub criteria: ActivityCriteria,
}

impl ActivityDraft {
    /// An empty draft for `host`.
    #[must_use]
    pub fn new(host: UserUuid) -> Self {
        Self {
            host,
            title: None,
            description: None,
            category: None,
            starts_at: None,
            area: None,
            max_spots: None,
            budget: None,
            criteria: ActivityCriteria::default(),
        }
    }
}

/// Activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Catalog key
    pub key: ActivityKey,

    /// The user hosting the activity
    pub host: UserUuid,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Kind of activity
    pub category: Category,

    /// When it starts
    pub starts_at: Timestamp,

    /// Area or district label
    pub area: String,

    /// Number of people who can join, between 1 and 6
    pub max_spots: u8,

    /// Rough price band
    pub budget: BudgetBand,

    /// Optional restrictions
    pub criteria: ActivityCriteria,

    /// Lifecycle status
    pub status: ActivityStatus,
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn category_round_trips_through_label() -> TestResult {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>()?, category);
        }

        Ok(())
    }

    #[test]
    fn category_parse_is_case_insensitive() -> TestResult {
        assert_eq!("Outdoor".parse::<Category>()?, Category::Outdoor);

        Ok(())
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = "knitting".parse::<Category>();

        assert_eq!(result, Err(UnknownLabel::new("category", "knitting")));
    }

    #[test]
    fn filter_parses_all_and_categories() -> TestResult {
        assert_eq!("all".parse::<CategoryFilter>()?, CategoryFilter::All);
        assert_eq!(
            "sports".parse::<CategoryFilter>()?,
            CategoryFilter::Only(Category::Sports)
        );

        Ok(())
    }

    #[test]
    fn filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Nightlife));
        assert!(CategoryFilter::Only(Category::Culinary).matches(Category::Culinary));
        assert!(!CategoryFilter::Only(Category::Culinary).matches(Category::Outdoor));
    }

    #[test]
    fn budget_band_descriptions() {
        assert_eq!(BudgetBand::Free.description(), "Free - Low (<€20)");
        assert_eq!(BudgetBand::Premium.description(), "Premium (>€50)");
    }

    #[test]
    fn criteria_rejects_inverted_ages() {
        let criteria = ActivityCriteria {
            age_min: Some(40),
            age_max: Some(30),
            genders_allowed: smallvec![],
        };

        assert_eq!(
            criteria.validate(),
            Err(ValidationError::InvertedRange {
                min_field: "age_min",
                max_field: "age_max",
            })
        );
    }

    #[test]
    fn criteria_rejects_underage_minimum() {
        let criteria = ActivityCriteria {
            age_min: Some(16),
            ..ActivityCriteria::default()
        };

        assert!(
            matches!(
                criteria.validate(),
                Err(ValidationError::OutOfRange {
                    field: "age_min",
                    ..
                })
            ),
            "ages under 18 should be rejected"
        );
    }

    #[test]
    fn empty_criteria_is_valid() {
        assert_eq!(ActivityCriteria::default().validate(), Ok(()));
    }
}
