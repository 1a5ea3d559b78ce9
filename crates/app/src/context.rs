//! App Context

use std::sync::Arc;

use jiff::Timestamp;
use mingled::{
    attendance::{AttendanceLedger, ShowUp},
    catalog::Catalog,
    fixtures::{Demo, FixtureError},
    identity::UserUuid,
    profiles::{Profile, ProfileDirectory, ProfileError},
    signups::Applicant,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    session::{IdentityProvider, Session, SessionPhase},
    views::{Tab, View, route},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load demo data")]
    Fixtures(#[source] FixtureError),
}

/// Every store the app works with, plus the current session.
#[derive(Debug)]
pub struct AppContext {
    pub session: Session,
    pub catalog: Catalog,
    pub profiles: ProfileDirectory,
    pub attendance: AttendanceLedger,
}

impl AppContext {
    /// Empty stores, nobody signed in.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            session: Session::new(provider),
            catalog: Catalog::new(),
            profiles: ProfileDirectory::new(),
            attendance: AttendanceLedger::new(),
        }
    }

    /// Stores seeded with the bundled demo data, nobody signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo data cannot be loaded.
    pub fn demo(provider: Arc<dyn IdentityProvider>, now: Timestamp) -> Result<Self, AppInitError> {
        let demo = Demo::load(now).map_err(AppInitError::Fixtures)?;

        info!(
            activities = demo.catalog.len(),
            profiles = demo.profiles.len(),
            "loaded demo data"
        );

        Ok(Self {
            session: Session::new(provider),
            catalog: demo.catalog,
            profiles: demo.profiles,
            attendance: demo.attendance,
        })
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase(&self.profiles)
    }

    /// Screen to show for the active tab.
    #[must_use]
    pub fn view(&self, tab: Tab) -> View {
        route(self.phase(), tab)
    }

    /// Id of the signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<UserUuid> {
        self.session.identity().map(|identity| identity.id)
    }

    /// The signed-in user as an applicant, named after their profile. Falls
    /// back to the email address before the profile is complete.
    #[must_use]
    pub fn applicant(&self) -> Option<Applicant> {
        let identity = self.session.identity()?;

        let name = self
            .profiles
            .get(identity.id)
            .map_or_else(|| identity.email.clone(), Profile::display_name);

        Some(Applicant::new(identity.id, name))
    }

    /// Close the attendance roster and fold each marked participant into
    /// their show-up score.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::ProfileNotFound`] if a marked participant has
    /// no profile. Nothing is recorded in that case.
    pub fn complete_event(&mut self) -> Result<Vec<ShowUp>, ProfileError> {
        let outcomes = self.attendance.complete();

        if let Some(missing) = outcomes
            .iter()
            .find(|outcome| !self.profiles.contains(outcome.participant))
        {
            warn!(user_uuid = %missing.participant, "participant has no profile");

            return Err(ProfileError::ProfileNotFound(missing.participant));
        }

        for outcome in &outcomes {
            self.profiles
                .record_outcome(outcome.participant, outcome.attended)?;
        }

        let summary = self.attendance.summary();

        info!(
            attended = summary.attended_count,
            total = summary.total_count,
            "event completed"
        );

        self.attendance = AttendanceLedger::new();

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use mingled::{
        identity::Identity,
        profiles::{Gender, ProfileDraft},
    };
    use testresult::TestResult;

    use crate::session::{Credentials, MockIdentityProvider};

    use super::*;

    fn provider() -> Arc<dyn IdentityProvider> {
        let mut provider = MockIdentityProvider::new();

        provider
            .expect_sign_in()
            .returning(|credentials| Ok(Identity::for_email(&credentials.email)));
        provider.expect_sign_out().returning(|| Ok(()));

        Arc::new(provider)
    }

    fn profile_draft() -> ProfileDraft {
        ProfileDraft {
            first_name: Some("Alex".to_string()),
            last_name: Some("Kim".to_string()),
            date_of_birth: Some(jiff::civil::date(1994, 3, 8)),
            gender: Some(Gender::Other),
            age_min: Some(21),
            age_max: Some(40),
            max_distance_km: Some(10),
            ..ProfileDraft::default()
        }
    }

    #[tokio::test]
    async fn view_follows_onboarding() -> TestResult {
        let mut context = AppContext::new(provider());

        assert_eq!(context.view(Tab::Host), View::SignIn);

        context
            .session
            .sign_in(Credentials::new("alex@mingled.app", "pw"))
            .await?;

        assert_eq!(context.view(Tab::Host), View::ProfileSetup);

        let user = context.current_user().ok_or("not signed in")?;
        context.profiles.create(user, profile_draft())?;

        assert_eq!(context.view(Tab::Host), View::Host);

        context.session.sign_out();

        assert_eq!(context.view(Tab::Host), View::SignIn);
        assert_eq!(context.phase(), SessionPhase::Anonymous);

        context.session.end_provider_session().await;

        Ok(())
    }

    #[tokio::test]
    async fn applicant_uses_profile_name() -> TestResult {
        let mut context = AppContext::new(provider());

        assert_eq!(context.applicant(), None);

        context
            .session
            .sign_in(Credentials::new("alex@mingled.app", "pw"))
            .await?;

        assert_eq!(
            context.applicant().map(|applicant| applicant.name),
            Some("alex@mingled.app".to_string())
        );

        let user = context.current_user().ok_or("not signed in")?;
        context.profiles.create(user, profile_draft())?;

        assert_eq!(
            context.applicant().map(|applicant| applicant.name),
            Some("Alex Kim".to_string())
        );

        Ok(())
    }

    #[test]
    fn complete_event_updates_show_up_scores() -> TestResult {
        let mut context = AppContext::demo(provider(), Timestamp::UNIX_EPOCH)?;
        let participants: Vec<UserUuid> = context
            .attendance
            .records()
            .map(|record| record.participant)
            .collect();

        for (participant, arrived) in participants.iter().zip([true, true, false]) {
            context.attendance.mark_arrival(*participant, arrived);
        }

        let outcomes = context.complete_event()?;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(context.attendance.summary().total_count, 0);

        for outcome in outcomes {
            let profile = context
                .profiles
                .get(outcome.participant)
                .ok_or("profile missing")?;

            assert_eq!(profile.show_up.total, 1);
            assert_eq!(profile.show_up.attended, u32::from(outcome.attended));
        }

        Ok(())
    }

    #[test]
    fn complete_event_without_profile_records_nothing() -> TestResult {
        let mut context = AppContext::demo(provider(), Timestamp::UNIX_EPOCH)?;
        let stranger = mingled::identity::user_uuid_for_email("stranger@mingled.app");
        let regular = context
            .attendance
            .records()
            .next()
            .map(|record| record.participant)
            .ok_or("empty roster")?;

        context.attendance.mark_arrival(regular, true);
        context.attendance.mark_arrival(stranger, true);

        let result = context.complete_event();

        assert!(
            matches!(result, Err(ProfileError::ProfileNotFound(user)) if user == stranger),
            "expected missing profile, got {result:?}"
        );
        assert_eq!(
            context.profiles.get(regular).map(|p| p.show_up.total),
            Some(0)
        );

        Ok(())
    }
}
