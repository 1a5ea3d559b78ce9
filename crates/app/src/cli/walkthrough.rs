use std::io;

use clap::Args;
use jiff::{SignedDuration, Timestamp, civil::date};
use mingled::{
    activities::{ActivityDraft, ActivityKey, BudgetBand, Category},
    attendance::AttendanceLedger,
    identity::{Identity, UserUuid, user_uuid_for_email},
    profiles::{Gender, Intents, Interest, Profile, ProfileDraft},
    signups::{Applicant, Decision, SignupKey},
};
use mingled_app::{
    config::AppConfig,
    context::AppContext,
    views::{Tab, View},
};
use tabled::builder::Builder;
use tracing::info;

use crate::cli::{CredentialsArgs, host::write_applicants, output_error, signed_in, write_table};

const GUESTS: [&str; 4] = [
    "alice@mingled.app",
    "bob@mingled.app",
    "carol@mingled.app",
    "dave@mingled.app",
];

const GUEST_RANKS: [u8; 4] = [0, 4, 5, 2];

/// Applicants accepted by the walkthrough host, best ranked first.
const ACCEPTED: usize = 2;

#[derive(Debug, Args)]
pub(crate) struct WalkthroughArgs {
    #[command(flatten)]
    credentials: CredentialsArgs,
}

pub(crate) async fn run(
    config: &AppConfig,
    args: WalkthroughArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let mut context = signed_in(config, args.credentials).await?;

    play(&mut context, Timestamp::now(), out)?;

    context.session.sign_out();
    context.session.end_provider_session().await;

    step(out, "Signed out")
}

/// Run every step after sign-in against `context`.
pub(crate) fn play(
    context: &mut AppContext,
    now: Timestamp,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let identity = context
        .session
        .identity()
        .cloned()
        .ok_or("not signed in")?;

    step(out, &format!("Signed in as {}", identity.email))?;

    complete_profile(context, &identity, out)?;

    let activity = host_activity(context, identity.id, now, out)?;

    collect_applicants(context, identity.id, activity, out)?;
    review_applicants(context, activity, out)?;
    wrap_up(context, activity, out)
}

fn complete_profile(
    context: &mut AppContext,
    identity: &Identity,
    out: &mut impl io::Write,
) -> Result<(), String> {
    if context.view(Tab::Discover) != View::ProfileSetup {
        return Ok(());
    }

    let profile = context
        .profiles
        .create(identity.id, profile_for(&identity.email))
        .map_err(|error| format!("failed to complete profile: {error}"))?;

    step(
        out,
        &format!("Completed profile for {}", profile.display_name()),
    )
}

fn host_activity(
    context: &mut AppContext,
    host: UserUuid,
    now: Timestamp,
    out: &mut impl io::Write,
) -> Result<ActivityKey, String> {
    let activity = context
        .catalog
        .create(ActivityDraft {
            title: Some("Rooftop Board Games".to_string()),
            description: Some("Classic and new board games with a view.".to_string()),
            category: Some(Category::Other),
            starts_at: now.checked_add(SignedDuration::from_hours(2)).ok(),
            area: Some("Harbour".to_string()),
            max_spots: Some(3),
            budget: Some(BudgetBand::Free),
            ..ActivityDraft::new(host)
        })
        .map_err(|error| format!("failed to create activity: {error}"))?;

    info!(title = %activity.title, spots = activity.max_spots, "published activity");

    let message = format!(
        "Published \"{}\" with {} spots",
        activity.title, activity.max_spots
    );
    let key = activity.key;

    step(out, &message)?;

    Ok(key)
}

fn collect_applicants(
    context: &mut AppContext,
    host: UserUuid,
    activity: ActivityKey,
    out: &mut impl io::Write,
) -> Result<(), String> {
    for (email, rank) in GUESTS.into_iter().zip(GUEST_RANKS) {
        let user = user_uuid_for_email(email);

        if user == host {
            continue;
        }

        let name = context
            .profiles
            .get(user)
            .map_or_else(|| email.to_string(), Profile::display_name);

        match context.catalog.apply(activity, Applicant::new(user, name.clone())) {
            Ok(signup) => {
                context
                    .catalog
                    .set_rank(signup.key, rank)
                    .map_err(|error| format!("failed to rank {name}: {error}"))?;

                step(out, &format!("{name} applied"))?;
            }
            Err(error) => step(out, &format!("{name} could not apply: {error}"))?,
        }
    }

    write_applicants(out, &context.catalog, activity)
}

fn review_applicants(
    context: &mut AppContext,
    activity: ActivityKey,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let ranked: Vec<SignupKey> = context
        .catalog
        .ranked_view(activity)
        .into_iter()
        .map(|signup| signup.key)
        .collect();

    for (position, signup) in ranked.into_iter().enumerate() {
        let decision = if position < ACCEPTED {
            Decision::Accept
        } else {
            Decision::Reject
        };

        let reviewed = context
            .catalog
            .review(signup, decision)
            .map_err(|error| format!("failed to review applicant: {error}"))?;

        let message = format!("{} {}", reviewed.name, reviewed.state);

        step(out, &message)?;
    }

    Ok(())
}

fn wrap_up(
    context: &mut AppContext,
    activity: ActivityKey,
    out: &mut impl io::Write,
) -> Result<(), String> {
    context.attendance = AttendanceLedger::from_accepted(context.catalog.signups(), activity);

    let roster: Vec<(UserUuid, String)> = context
        .attendance
        .records()
        .map(|record| (record.participant, record.name.clone()))
        .collect();

    for (position, (participant, name)) in roster.iter().enumerate() {
        let arrived = position == 0;

        context.attendance.mark_arrival(*participant, arrived);

        if arrived {
            context
                .attendance
                .mark_feedback(*participant, true)
                .map_err(|error| format!("failed to record feedback: {error}"))?;

            step(out, &format!("{name} arrived, thumbs up"))?;
        } else {
            step(out, &format!("{name} did not show up"))?;

            if let Err(error) = context.attendance.mark_feedback(*participant, true) {
                step(out, &format!("Feedback for {name} refused: {error}"))?;
            }
        }
    }

    step(out, &context.attendance.summary().to_string())?;

    let outcomes = context
        .complete_event()
        .map_err(|error| format!("failed to complete event: {error}"))?;

    let mut builder = Builder::default();

    builder.push_record(["Member", "Attended", "Show-up score", "Reliable"]);

    for outcome in outcomes {
        let Some(profile) = context.profiles.get(outcome.participant) else {
            continue;
        };

        builder.push_record([
            profile.display_name(),
            yes_no(outcome.attended),
            profile
                .show_up
                .percent_points()
                .map_or_else(|| "-".to_string(), |points| format!("{points}%")),
            yes_no(profile.show_up.is_reliable()),
        ]);
    }

    write_table(out, builder)
}

fn yes_no(value: bool) -> String {
    String::from(if value { "yes" } else { "no" })
}

fn step(out: &mut impl io::Write, message: &str) -> Result<(), String> {
    writeln!(out, "==> {message}").map_err(output_error)
}

fn profile_for(email: &str) -> ProfileDraft {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    let first_name = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default();

    ProfileDraft {
        first_name: Some(first_name),
        last_name: Some("Member".to_string()),
        date_of_birth: Some(date(1995, 1, 1)),
        gender: Some(Gender::Other),
        intents: Intents {
            friend: true,
            dating: false,
        },
        interests: [Interest::ArtAndCulture, Interest::Gaming].into_iter().collect(),
        age_min: Some(18),
        age_max: Some(100),
        max_distance_km: Some(25),
    }
}
