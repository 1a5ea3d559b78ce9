//! Mingled prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    activities::{
        Activity, ActivityCriteria, ActivityDraft, ActivityKey, ActivityStatus, BudgetBand,
        Category, CategoryFilter,
    },
    attendance::{
        Arrival, AttendanceError, AttendanceLedger, AttendanceRecord, AttendanceSummary,
        Feedback, ShowUp,
    },
    catalog::{Catalog, CatalogError},
    fixtures::{Demo, FixtureError},
    identity::{Identity, UserUuid, user_uuid_for_email},
    profiles::{
        AgeRange, Gender, Intents, Interest, Interests, Profile, ProfileDirectory, ProfileDraft,
        ProfileError, ShowUpRecord,
    },
    signups::{
        Applicant, Decision, Rank, ReviewState, Signup, SignupError, SignupKey, SignupLedger,
    },
    validation::{UnknownLabel, ValidationError},
};
