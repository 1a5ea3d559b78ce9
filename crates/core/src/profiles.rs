//! Profiles
//!
//! One profile per user, created once after the first sign-in and edited by
//! its owner afterwards.

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    identity::UserUuid,
    validation::{UnknownLabel, ValidationError, required, required_text, within},
};

/// Youngest age a profile or activity may target.
pub const MIN_AGE: u8 = 18;

/// Oldest age a profile or activity may target.
pub const MAX_AGE: u8 = 100;

/// Largest search radius, in kilometres.
pub const MAX_DISTANCE_KM: u16 = 100;

/// Show-up score at or above which a member counts as reliable, in percent.
pub const RELIABLE_SHOW_UP_PERCENT: u32 = 90;

/// Errors raised by profile operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The submitted profile failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The user already completed their profile.
    #[error("profile for {0} already exists")]
    ProfileExists(UserUuid),

    /// The user has no profile yet.
    #[error("profile for {0} not found")]
    ProfileNotFound(UserUuid),
}

/// Gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,

    /// Female
    Female,

    /// Other
    Other,
}

impl Gender {
    /// Every gender option.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel::new("gender", value))
    }
}

/// Interests a user can pick during profile setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Interest {
    /// Art & Culture
    ArtAndCulture,

    /// Sports & Fitness
    SportsAndFitness,

    /// Food & Dining
    FoodAndDining,

    /// Music & Concerts
    MusicAndConcerts,

    /// Outdoor Activities
    OutdoorActivities,

    /// Photography
    Photography,

    /// Travel
    Travel,

    /// Books & Literature
    BooksAndLiterature,

    /// Technology
    Technology,

    /// Gaming
    Gaming,

    /// Dancing
    Dancing,

    /// Yoga & Meditation
    YogaAndMeditation,
}

impl Interest {
    /// Every interest, in the order the setup screen lists them.
    pub const ALL: [Self; 12] = [
        Self::ArtAndCulture,
        Self::SportsAndFitness,
        Self::FoodAndDining,
        Self::MusicAndConcerts,
        Self::OutdoorActivities,
        Self::Photography,
        Self::Travel,
        Self::BooksAndLiterature,
        Self::Technology,
        Self::Gaming,
        Self::Dancing,
        Self::YogaAndMeditation,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ArtAndCulture => "Art & Culture",
            Self::SportsAndFitness => "Sports & Fitness",
            Self::FoodAndDining => "Food & Dining",
            Self::MusicAndConcerts => "Music & Concerts",
            Self::OutdoorActivities => "Outdoor Activities",
            Self::Photography => "Photography",
            Self::Travel => "Travel",
            Self::BooksAndLiterature => "Books & Literature",
            Self::Technology => "Technology",
            Self::Gaming => "Gaming",
            Self::Dancing => "Dancing",
            Self::YogaAndMeditation => "Yoga & Meditation",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interest {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interest| interest.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel::new("interest", value))
    }
}

impl TryFrom<String> for Interest {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Selected interests, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interests(SmallVec<[Interest; 12]>);

impl Interests {
    /// Select `interest` if it is not selected, deselect it otherwise.
    pub fn toggle(&mut self, interest: Interest) {
        if let Some(position) = self.0.iter().position(|picked| *picked == interest) {
            self.0.remove(position);
        } else {
            self.0.push(interest);
        }
    }

    /// Whether `interest` is selected.
    #[must_use]
    pub fn contains(&self, interest: Interest) -> bool {
        self.0.contains(&interest)
    }

    /// Iterate in selection order.
    pub fn iter(&self) -> impl Iterator<Item = Interest> + '_ {
        self.0.iter().copied()
    }

    /// Number of selected interests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Interest> for Interests {
    fn from_iter<I: IntoIterator<Item = Interest>>(iter: I) -> Self {
        let mut interests = Self::default();

        for interest in iter {
            if !interests.contains(interest) {
                interests.0.push(interest);
            }
        }

        interests
    }
}

/// What the user is looking for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Intents {
    /// Open to new friends
    #[serde(default)]
    pub friend: bool,

    /// Open to dating
    #[serde(default)]
    pub dating: bool,
}

/// Preferred age range of people to meet. `min <= max`, both within 18–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u8,
    max: u8,
}

impl AgeRange {
    /// Build a validated range.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when either bound is outside 18–100 or
    /// `min` exceeds `max`.
    pub fn new(min: u8, max: u8) -> Result<Self, ValidationError> {
        within("age_min", min, MIN_AGE.into(), MAX_AGE.into())?;
        within("age_max", max, MIN_AGE.into(), MAX_AGE.into())?;

        if min > max {
            return Err(ValidationError::InvertedRange {
                min_field: "age_min",
                max_field: "age_max",
            });
        }

        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(self) -> u8 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(self) -> u8 {
        self.max
    }

    /// Whether `age` falls inside the range.
    #[must_use]
    pub fn contains(self, age: i16) -> bool {
        (i16::from(self.min)..=i16::from(self.max)).contains(&age)
    }
}

/// How often a member turned up to activities they joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ShowUpRecord {
    /// Activities the member was expected at
    pub total: u32,

    /// Activities the member actually attended
    pub attended: u32,
}

impl ShowUpRecord {
    /// Check the member did not attend more activities than they joined.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedRange`] if `attended` exceeds
    /// `total`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.attended > self.total {
            return Err(ValidationError::InvertedRange {
                min_field: "attended",
                max_field: "total",
            });
        }

        Ok(())
    }

    /// Count one more activity.
    pub fn record(&mut self, attended: bool) {
        self.total = self.total.saturating_add(1);

        if attended {
            self.attended = self.attended.saturating_add(1);
        }
    }

    /// Fraction of activities attended; `None` before the first activity.
    #[must_use]
    pub fn score(&self) -> Option<Percentage> {
        if self.total == 0 {
            return None;
        }

        Some(Percentage::from(
            Decimal::from(self.attended) / Decimal::from(self.total),
        ))
    }

    /// Score in percent points rounded to one decimal, e.g. `91.7`.
    #[must_use]
    pub fn percent_points(&self) -> Option<Decimal> {
        // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 for points.
        self.score()
            .map(|score| ((score * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(1))
    }

    /// Whether the member shows up at least 90% of the time.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        self.total > 0
            && u64::from(self.attended) * 100
                >= u64::from(self.total) * u64::from(RELIABLE_SHOW_UP_PERCENT)
    }
}

/// Profile as submitted from the setup form. `None` means left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Date of birth
    pub date_of_birth: Option<Date>,

    /// Gender
    pub gender: Option<Gender>,

    /// What the user is looking for
    pub intents: Intents,

    /// Picked interests
    pub interests: Interests,

    /// Youngest person to meet
    pub age_min: Option<u8>,

    /// Oldest person to meet
    pub age_max: Option<u8>,

    /// Search radius in kilometres
    pub max_distance_km: Option<u16>,
}

impl ProfileDraft {
    /// Pick `interest`, or drop it if it was already picked.
    pub fn toggle_interest(&mut self, interest: Interest) {
        self.interests.toggle(interest);
    }
}

impl From<&Profile> for ProfileDraft {
    fn from(profile: &Profile) -> Self {
        Self {
            first_name: Some(profile.first_name.clone()),
            last_name: Some(profile.last_name.clone()),
            date_of_birth: Some(profile.date_of_birth),
            gender: Some(profile.gender),
            intents: profile.intents,
            interests: profile.interests.clone(),
            age_min: Some(profile.age_range.min()),
            age_max: Some(profile.age_range.max()),
            max_distance_km: Some(profile.max_distance_km),
        }
    }
}

/// A member's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Owning user
    pub owner: UserUuid,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Date of birth
    pub date_of_birth: Date,

    /// Gender
    pub gender: Gender,

    /// What the user is looking for
    pub intents: Intents,

    /// Picked interests
    pub interests: Interests,

    /// Preferred age range
    pub age_range: AgeRange,

    /// Search radius in kilometres
    pub max_distance_km: u16,

    /// Attendance history
    pub show_up: ShowUpRecord,
}

impl Profile {
    fn from_draft(
        owner: UserUuid,
        draft: ProfileDraft,
        show_up: ShowUpRecord,
    ) -> Result<Self, ValidationError> {
        let first_name = required_text("first_name", draft.first_name)?;
        let last_name = required_text("last_name", draft.last_name)?;
        let date_of_birth = required("date_of_birth", draft.date_of_birth)?;
        let gender = required("gender", draft.gender)?;
        let age_min = required("age_min", draft.age_min)?;
        let age_max = required("age_max", draft.age_max)?;
        let age_range = AgeRange::new(age_min, age_max)?;
        let max_distance_km = within(
            "max_distance_km",
            required("max_distance_km", draft.max_distance_km)?,
            1,
            MAX_DISTANCE_KM.into(),
        )?;

        Ok(Self {
            owner,
            first_name,
            last_name,
            date_of_birth,
            gender,
            intents: draft.intents,
            interests: draft.interests,
            age_range,
            max_distance_km,
            show_up,
        })
    }

    /// Full name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Initials, e.g. "SJ".
    #[must_use]
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|name| name.chars().next())
            .collect()
    }

    /// Age in whole years on `today`.
    #[must_use]
    pub fn age_on(&self, today: Date) -> i16 {
        let born = self.date_of_birth;
        let mut age = today.year() - born.year();

        if (today.month(), today.day()) < (born.month(), born.day()) {
            age -= 1;
        }

        age
    }
}

/// Profiles of every member, keyed by owner.
#[derive(Debug, Default)]
pub struct ProfileDirectory {
    profiles: FxHashMap<UserUuid, Profile>,
}

impl ProfileDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the profile for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::ProfileExists`] if `owner` already has a
    /// profile and [`ProfileError::Validation`] for invalid input.
    pub fn create(
        &mut self,
        owner: UserUuid,
        draft: ProfileDraft,
    ) -> Result<&Profile, ProfileError> {
        if self.profiles.contains_key(&owner) {
            return Err(ProfileError::ProfileExists(owner));
        }

        let profile = Profile::from_draft(owner, draft, ShowUpRecord::default())?;

        Ok(self.profiles.entry(owner).or_insert(profile))
    }

    /// Replace the editable fields of an existing profile. The show-up
    /// history is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::ProfileNotFound`] if `owner` has no profile and
    /// [`ProfileError::Validation`] for invalid input.
    pub fn update(
        &mut self,
        owner: UserUuid,
        draft: ProfileDraft,
    ) -> Result<&Profile, ProfileError> {
        let existing = self
            .profiles
            .get_mut(&owner)
            .ok_or(ProfileError::ProfileNotFound(owner))?;

        *existing = Profile::from_draft(owner, draft, existing.show_up)?;

        Ok(&*existing)
    }

    /// Count one finished activity towards the show-up score of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::ProfileNotFound`] if `owner` has no profile.
    pub fn record_outcome(
        &mut self,
        owner: UserUuid,
        attended: bool,
    ) -> Result<&ShowUpRecord, ProfileError> {
        let profile = self
            .profiles
            .get_mut(&owner)
            .ok_or(ProfileError::ProfileNotFound(owner))?;

        profile.show_up.record(attended);

        Ok(&profile.show_up)
    }

    /// Look up a profile.
    #[must_use]
    pub fn get(&self, owner: UserUuid) -> Option<&Profile> {
        self.profiles.get(&owner)
    }

    /// Whether `owner` has completed a profile.
    #[must_use]
    pub fn contains(&self, owner: UserUuid) -> bool {
        self.profiles.contains_key(&owner)
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub(crate) fn restore(
        &mut self,
        owner: UserUuid,
        draft: ProfileDraft,
        show_up: ShowUpRecord,
    ) -> Result<&Profile, ProfileError> {
        if self.profiles.contains_key(&owner) {
            return Err(ProfileError::ProfileExists(owner));
        }

        show_up.validate()?;

        let profile = Profile::from_draft(owner, draft, show_up)?;

        Ok(self.profiles.entry(owner).or_insert(profile))
    }
}
