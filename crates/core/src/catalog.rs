//! Activity Catalog
//!
//! Stores every activity along with its signups. Listings are newest first.

use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    activities::{
        Activity, ActivityDraft, ActivityKey, ActivityStatus, CategoryFilter, MAX_SPOTS, MIN_SPOTS,
    },
    identity::UserUuid,
    signups::{Applicant, Decision, Signup, SignupError, SignupKey, SignupLedger},
    validation::{ValidationError, required, required_text, within},
};

/// Errors raised by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The submitted activity failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The activity does not exist.
    #[error("activity {0:?} not found")]
    ActivityNotFound(ActivityKey),
}

/// Every activity known to the app.
#[derive(Debug, Default)]
pub struct Catalog {
    activities: SlotMap<ActivityKey, Activity>,
    order: Vec<ActivityKey>,
    signups: SignupLedger,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and publish it as an open activity.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] naming the first missing or
    /// out-of-range field. Nothing is stored on error.
    pub fn create(&mut self, draft: ActivityDraft) -> Result<&Activity, CatalogError> {
        let title = required_text("title", draft.title)?;
        let description = required_text("description", draft.description)?;
        let category = required("category", draft.category)?;
        let starts_at = required("starts_at", draft.starts_at)?;
        let area = required_text("area", draft.area)?;
        let max_spots = within(
            "max_spots",
            required("max_spots", draft.max_spots)?,
            MIN_SPOTS.into(),
            MAX_SPOTS.into(),
        )?;
        let budget = required("budget", draft.budget)?;

        draft.criteria.validate()?;

        let key = self.activities.insert_with_key(|key| Activity {
            key,
            host: draft.host,
            title,
            description,
            category,
            starts_at,
            area,
            max_spots,
            budget,
            criteria: draft.criteria,
            status: ActivityStatus::Open,
        });

        self.order.push(key);

        self.activities
            .get(key)
            .ok_or(CatalogError::ActivityNotFound(key))
    }

    /// Activities matching `filter`, most recently created first.
    pub fn list(&self, filter: CategoryFilter) -> impl Iterator<Item = &Activity> {
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.activities.get(*key))
            .filter(move |activity| filter.matches(activity.category))
    }

    /// Activities hosted by `user`, most recently created first.
    pub fn hosted_by(&self, user: UserUuid) -> impl Iterator<Item = &Activity> {
        self.list(CategoryFilter::All)
            .filter(move |activity| activity.host == user)
    }

    /// Look up an activity.
    #[must_use]
    pub fn get(&self, key: ActivityKey) -> Option<&Activity> {
        self.activities.get(key)
    }

    /// Spots remaining on an activity. Every signup takes a spot, including
    /// rejected ones.
    #[must_use]
    pub fn spots_left(&self, activity: &Activity) -> u8 {
        self.signups.spots_left(activity)
    }

    /// Whether an activity has no spots left.
    #[must_use]
    pub fn is_full(&self, activity: &Activity) -> bool {
        self.spots_left(activity) == 0
    }

    /// Number of activities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Apply to join an activity.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::ActivityNotFound`] for unknown activities, and
    /// otherwise whatever [`SignupLedger::apply`] returns.
    pub fn apply(
        &mut self,
        activity: ActivityKey,
        applicant: Applicant,
    ) -> Result<Signup, SignupError> {
        let activity = self
            .activities
            .get(activity)
            .ok_or(SignupError::ActivityNotFound(activity))?;

        self.signups.apply(activity, applicant)
    }

    /// Overwrite the host's rank for a signup.
    ///
    /// # Errors
    ///
    /// See [`SignupLedger::set_rank`].
    pub fn set_rank(&mut self, signup: SignupKey, rank: u8) -> Result<&Signup, SignupError> {
        self.signups.set_rank(signup, rank)
    }

    /// Accept or reject a pending signup.
    ///
    /// # Errors
    ///
    /// See [`SignupLedger::review`].
    pub fn review(
        &mut self,
        signup: SignupKey,
        decision: Decision,
    ) -> Result<&Signup, SignupError> {
        self.signups.review(signup, decision)
    }

    /// Signups on an activity, highest rank first.
    #[must_use]
    pub fn ranked_view(&self, activity: ActivityKey) -> Vec<&Signup> {
        self.signups.ranked_view(activity)
    }

    /// The signup ledger behind this catalog.
    #[must_use]
    pub fn signups(&self) -> &SignupLedger {
        &self.signups
    }
}
