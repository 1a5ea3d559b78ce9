//! Attendance Ledger
//!
//! Tracks who turned up to a finished activity and the host's feedback on
//! each participant.

use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    activities::ActivityKey,
    identity::UserUuid,
    signups::{ReviewState, SignupLedger},
};

/// Errors raised by attendance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceError {
    /// Feedback was given for someone who was not marked as arrived.
    #[error("participant {0} has not been marked as arrived")]
    NotArrived(UserUuid),
}

/// Whether a participant turned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrival {
    /// Not marked yet
    #[default]
    Unknown,

    /// Turned up
    Arrived,

    /// Did not turn up
    NoShow,
}

impl Arrival {
    /// Map the host's yes/no answer.
    #[must_use]
    pub const fn from_arrived(arrived: bool) -> Self {
        if arrived { Self::Arrived } else { Self::NoShow }
    }
}

impl fmt::Display for Arrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Arrived => "arrived",
            Self::NoShow => "no-show",
        })
    }
}

/// Host's thumbs up or down on a participant who arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Thumbs up
    Positive,

    /// Thumbs down
    Negative,
}

impl Feedback {
    /// Map the host's yes/no answer.
    #[must_use]
    pub const fn from_positive(positive: bool) -> Self {
        if positive { Self::Positive } else { Self::Negative }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        })
    }
}

/// One participant's attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// Participant
    pub participant: UserUuid,

    /// Name shown to the host
    pub name: String,

    /// Whether they turned up
    pub arrival: Arrival,

    /// Host feedback, only ever set when `arrival` is [`Arrival::Arrived`]
    pub feedback: Option<Feedback>,
}

/// Attended vs. registered participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceSummary {
    /// Participants marked as arrived
    pub attended_count: usize,

    /// Participants on the roster
    pub total_count: usize,
}

impl fmt::Display for AttendanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} attended", self.attended_count, self.total_count)
    }
}

/// Final outcome for one participant once the event is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowUp {
    /// Participant
    pub participant: UserUuid,

    /// Whether they turned up
    pub attended: bool,
}

/// Attendance for a single activity, in roster order.
#[derive(Debug, Default)]
pub struct AttendanceLedger {
    activity: Option<ActivityKey>,
    records: FxHashMap<UserUuid, AttendanceRecord>,
    roster: Vec<UserUuid>,
}

impl AttendanceLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty roster for `activity`.
    #[must_use]
    pub fn for_activity(activity: ActivityKey) -> Self {
        Self {
            activity: Some(activity),
            ..Self::default()
        }
    }

    /// Roster made of the accepted signups of `activity`.
    #[must_use]
    pub fn from_accepted(signups: &SignupLedger, activity: ActivityKey) -> Self {
        let mut ledger = Self::for_activity(activity);

        for signup in signups
            .signups(activity)
            .filter(|signup| signup.state == ReviewState::Accepted)
        {
            ledger.register(signup.user, signup.name.clone());
        }

        ledger
    }

    /// Activity this roster belongs to, if it was built from one.
    #[must_use]
    pub const fn activity(&self) -> Option<ActivityKey> {
        self.activity
    }

    /// Add a participant with unknown arrival. Registering someone already on
    /// the roster keeps their existing record.
    pub fn register(
        &mut self,
        participant: UserUuid,
        name: impl Into<String>,
    ) -> &AttendanceRecord {
        self.entry(participant, name.into())
    }

    /// Mark whether `participant` turned up. Unknown participants are added
    /// to the roster. Marking someone as not arrived clears their feedback.
    pub fn mark_arrival(&mut self, participant: UserUuid, arrived: bool) -> &AttendanceRecord {
        let record = self.entry(participant, String::new());

        record.arrival = Arrival::from_arrived(arrived);

        if !arrived {
            record.feedback = None;
        }

        &*record
    }

    /// Record the host's feedback on a participant who arrived.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::NotArrived`] unless `participant` is marked
    /// as arrived.
    pub fn mark_feedback(
        &mut self,
        participant: UserUuid,
        positive: bool,
    ) -> Result<&AttendanceRecord, AttendanceError> {
        let record = self
            .records
            .get_mut(&participant)
            .filter(|record| record.arrival == Arrival::Arrived)
            .ok_or(AttendanceError::NotArrived(participant))?;

        record.feedback = Some(Feedback::from_positive(positive));

        Ok(&*record)
    }

    /// Look up a participant's record.
    #[must_use]
    pub fn get(&self, participant: UserUuid) -> Option<&AttendanceRecord> {
        self.records.get(&participant)
    }

    /// Records in roster order.
    pub fn records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.roster
            .iter()
            .filter_map(|participant| self.records.get(participant))
    }

    /// Attended vs. total participants.
    #[must_use]
    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary {
            attended_count: self
                .records
                .values()
                .filter(|record| record.arrival == Arrival::Arrived)
                .count(),
            total_count: self.records.len(),
        }
    }

    /// Final outcome per participant, in roster order. Participants whose
    /// arrival was never marked are left out.
    #[must_use]
    pub fn complete(&self) -> Vec<ShowUp> {
        self.records()
            .filter_map(|record| match record.arrival {
                Arrival::Unknown => None,
                Arrival::Arrived => Some(ShowUp {
                    participant: record.participant,
                    attended: true,
                }),
                Arrival::NoShow => Some(ShowUp {
                    participant: record.participant,
                    attended: false,
                }),
            })
            .collect()
    }

    fn entry(&mut self, participant: UserUuid, name: String) -> &mut AttendanceRecord {
        let roster = &mut self.roster;

        self.records.entry(participant).or_insert_with(|| {
            roster.push(participant);

            AttendanceRecord {
                participant,
                name,
                arrival: Arrival::Unknown,
                feedback: None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn user(name: &str) -> UserUuid {
        UserUuid::from_name(name)
    }

    fn roster() -> AttendanceLedger {
        let mut ledger = AttendanceLedger::new();

        for name in ["alice", "bob", "carol"] {
            ledger.register(user(name), name);
        }

        ledger
    }

    #[test]
    fn register_starts_unknown() {
        let ledger = roster();

        assert!(
            ledger
                .records()
                .all(|record| record.arrival == Arrival::Unknown && record.feedback.is_none())
        );
        assert_eq!(
            ledger.summary(),
            AttendanceSummary {
                attended_count: 0,
                total_count: 3,
            }
        );
    }

    #[test]
    fn register_twice_keeps_existing_record() {
        let mut ledger = roster();

        ledger.mark_arrival(user("alice"), true);
        let record = ledger.register(user("alice"), "Alice again");

        assert_eq!(record.name, "alice");
        assert_eq!(record.arrival, Arrival::Arrived);
        assert_eq!(ledger.summary().total_count, 3);
    }

    #[test]
    fn summary_counts_arrivals() {
        let mut ledger = roster();

        ledger.mark_arrival(user("alice"), true);
        ledger.mark_arrival(user("bob"), true);
        ledger.mark_arrival(user("carol"), false);

        let summary = ledger.summary();

        assert_eq!(summary.attended_count, 2);
        assert_eq!(summary.to_string(), "2/3 attended");
    }

    #[test]
    fn feedback_requires_arrival() {
        let mut ledger = roster();

        let result = ledger.mark_feedback(user("alice"), true).map(|r| r.feedback);

        assert_eq!(result, Err(AttendanceError::NotArrived(user("alice"))));
    }

    #[test]
    fn feedback_on_no_show_is_rejected() {
        let mut ledger = roster();

        ledger.mark_arrival(user("bob"), false);
        let result = ledger.mark_feedback(user("bob"), false).map(|r| r.feedback);

        assert_eq!(result, Err(AttendanceError::NotArrived(user("bob"))));
    }

    #[test]
    fn marking_no_show_clears_feedback() -> TestResult {
        let mut ledger = roster();

        ledger.mark_arrival(user("alice"), true);
        ledger.mark_feedback(user("alice"), true)?;

        let record = ledger.mark_arrival(user("alice"), false);

        assert_eq!(record.arrival, Arrival::NoShow);
        assert_eq!(record.feedback, None);

        Ok(())
    }

    #[test]
    fn mark_arrival_registers_unknown_participant() {
        let mut ledger = roster();

        ledger.mark_arrival(user("dave"), true);

        assert_eq!(ledger.summary().total_count, 4);
        assert_eq!(
            ledger.get(user("dave")).map(|r| r.arrival),
            Some(Arrival::Arrived)
        );
    }

    #[test]
    fn complete_skips_unmarked_participants() -> TestResult {
        let mut ledger = roster();

        ledger.mark_arrival(user("alice"), true);
        ledger.mark_feedback(user("alice"), true)?;
        ledger.mark_arrival(user("bob"), false);

        assert_eq!(
            ledger.complete(),
            [
                ShowUp {
                    participant: user("alice"),
                    attended: true,
                },
                ShowUp {
                    participant: user("bob"),
                    attended: false,
                },
            ]
        );

        Ok(())
    }
}
