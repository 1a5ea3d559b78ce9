//! Signup Ledger
//!
//! Applications to join an activity, the host's star rank for each applicant
//! and the host's accept/reject decision.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    activities::{Activity, ActivityKey, MAX_SPOTS},
    identity::UserUuid,
};

new_key_type! {
    /// Signup Key
    pub struct SignupKey;
}

/// Highest star rank a host can give.
pub const MAX_RANK: u8 = 5;

/// Errors raised by signup operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    /// The activity does not exist.
    #[error("activity {0:?} not found")]
    ActivityNotFound(ActivityKey),

    /// The signup does not exist.
    #[error("signup {0:?} not found")]
    SignupNotFound(SignupKey),

    /// The user already has a signup on this activity.
    #[error("already applied to this activity")]
    AlreadyApplied,

    /// No spots are left on the activity.
    #[error("activity is full")]
    ActivityFull,

    /// Rank outside 0–5.
    #[error("rank must be between 0 and {MAX_RANK}, got {0}")]
    InvalidRank(u8),

    /// Review attempted on a signup that has already been decided.
    #[error("cannot move signup from {from} to {to}")]
    InvalidTransition {
        /// Current state
        from: ReviewState,

        /// Requested state
        to: ReviewState,
    },
}

/// Host-assigned preference score, 0 to 5 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rank(u8);

impl Rank {
    /// Unranked.
    pub const ZERO: Self = Self(0);

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rank {
    type Error = SignupError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= MAX_RANK {
            Ok(Self(value))
        } else {
            Err(SignupError::InvalidRank(value))
        }
    }
}

/// Where a signup is in the host's review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    /// Waiting for the host
    #[default]
    Pending,

    /// Host accepted the applicant
    Accepted,

    /// Host turned the applicant down
    Rejected,
}

impl ReviewState {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host's verdict on a pending signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the applicant join
    Accept,

    /// Turn the applicant down
    Reject,
}

impl Decision {
    /// State the signup moves to.
    #[must_use]
    pub const fn outcome(self) -> ReviewState {
        match self {
            Self::Accept => ReviewState::Accepted,
            Self::Reject => ReviewState::Rejected,
        }
    }
}

/// Who is applying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    /// Applying user
    pub user: UserUuid,

    /// Name shown to the host
    pub name: String,
}

impl Applicant {
    /// Create a new applicant.
    pub fn new(user: UserUuid, name: impl Into<String>) -> Self {
        Self {
            user,
            name: name.into(),
        }
    }
}

/// A user's application to join an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    /// Ledger key
    pub key: SignupKey,

    /// Activity applied to
    pub activity: ActivityKey,

    /// Applying user
    pub user: UserUuid,

    /// Name shown to the host
    pub name: String,

    /// Host's star rank
    pub rank: Rank,

    /// Review state
    pub state: ReviewState,
}

type ActivitySignups = SmallVec<[SignupKey; MAX_SPOTS as usize]>;

/// Signups for every activity, in application order per activity.
#[derive(Debug, Default)]
pub struct SignupLedger {
    signups: SlotMap<SignupKey, Signup>,
    by_activity: FxHashMap<ActivityKey, ActivitySignups>,
}

impl SignupLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply to join `activity`.
    ///
    /// The new signup is pending with rank 0.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::AlreadyApplied`] if the user already applied and
    /// [`SignupError::ActivityFull`] if no spots are left.
    pub fn apply(
        &mut self,
        activity: &Activity,
        applicant: Applicant,
    ) -> Result<Signup, SignupError> {
        if self.has_applied(activity.key, applicant.user) {
            return Err(SignupError::AlreadyApplied);
        }

        if self.spots_left(activity) == 0 {
            return Err(SignupError::ActivityFull);
        }

        let key = self.signups.insert_with_key(|key| Signup {
            key,
            activity: activity.key,
            user: applicant.user,
            name: applicant.name,
            rank: Rank::ZERO,
            state: ReviewState::Pending,
        });

        self.by_activity.entry(activity.key).or_default().push(key);

        self.signups
            .get(key)
            .cloned()
            .ok_or(SignupError::SignupNotFound(key))
    }

    /// Overwrite the host's rank for a signup.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::InvalidRank`] for ranks above 5 and
    /// [`SignupError::SignupNotFound`] for unknown signups.
    pub fn set_rank(&mut self, key: SignupKey, rank: u8) -> Result<&Signup, SignupError> {
        let rank = Rank::try_from(rank)?;
        let signup = self
            .signups
            .get_mut(key)
            .ok_or(SignupError::SignupNotFound(key))?;

        signup.rank = rank;

        Ok(&*signup)
    }

    /// Accept or reject a pending signup.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::InvalidTransition`] if the signup has already
    /// been reviewed and [`SignupError::SignupNotFound`] for unknown signups.
    pub fn review(&mut self, key: SignupKey, decision: Decision) -> Result<&Signup, SignupError> {
        let signup = self
            .signups
            .get_mut(key)
            .ok_or(SignupError::SignupNotFound(key))?;

        if signup.state != ReviewState::Pending {
            return Err(SignupError::InvalidTransition {
                from: signup.state,
                to: decision.outcome(),
            });
        }

        signup.state = decision.outcome();

        Ok(&*signup)
    }

    /// Look up a signup.
    #[must_use]
    pub fn get(&self, key: SignupKey) -> Option<&Signup> {
        self.signups.get(key)
    }

    /// Signups for an activity in application order.
    pub fn signups(&self, activity: ActivityKey) -> impl Iterator<Item = &Signup> {
        self.by_activity
            .get(&activity)
            .into_iter()
            .flatten()
            .filter_map(|key| self.signups.get(*key))
    }

    /// Signups for an activity, highest rank first. Equal ranks keep their
    /// application order.
    #[must_use]
    pub fn ranked_view(&self, activity: ActivityKey) -> Vec<&Signup> {
        let mut ranked: Vec<&Signup> = self.signups(activity).collect();

        // `sort_by` is stable, which keeps ties in application order.
        ranked.sort_by(|a, b| b.rank.cmp(&a.rank));

        ranked
    }

    /// Number of signups on an activity, whatever their review state.
    #[must_use]
    pub fn count(&self, activity: ActivityKey) -> usize {
        self.by_activity.get(&activity).map_or(0, SmallVec::len)
    }

    /// Number of accepted signups on an activity.
    #[must_use]
    pub fn accepted_count(&self, activity: ActivityKey) -> usize {
        self.signups(activity)
            .filter(|signup| signup.state == ReviewState::Accepted)
            .count()
    }

    /// Whether `user` has a signup on `activity`.
    #[must_use]
    pub fn has_applied(&self, activity: ActivityKey, user: UserUuid) -> bool {
        self.signups(activity).any(|signup| signup.user == user)
    }

    /// Spots remaining on an activity.
    ///
    /// Every signup occupies a spot, including rejected ones.
    #[must_use]
    pub fn spots_left(&self, activity: &Activity) -> u8 {
        let taken = u8::try_from(self.count(activity.key)).unwrap_or(u8::MAX);

        activity.max_spots.saturating_sub(taken)
    }
}
