use std::io;

use clap::Args;
use mingled::{
    activities::ActivityKey,
    catalog::Catalog,
    signups::{MAX_RANK, Rank},
};
use mingled_app::{
    config::AppConfig,
    context::AppContext,
    views::{Tab, View},
};
use tabled::builder::Builder;

use crate::cli::{CredentialsArgs, output_error, signed_in, write_table};

#[derive(Debug, Args)]
pub(crate) struct HostArgs {
    #[command(flatten)]
    credentials: CredentialsArgs,
}

pub(crate) async fn run(
    config: &AppConfig,
    args: HostArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let context = signed_in(config, args.credentials).await?;

    if context.view(Tab::Host) != View::Host {
        return Err("complete your profile before hosting; run `walkthrough`".to_string());
    }

    write_dashboard(out, &context)
}

pub(crate) fn write_dashboard(
    out: &mut impl io::Write,
    context: &AppContext,
) -> Result<(), String> {
    let user = context.current_user().ok_or("not signed in")?;
    let mut hosted = 0_usize;

    for activity in context.catalog.hosted_by(user) {
        hosted += 1;

        writeln!(
            out,
            "Applicants for \"{}\" ({} / {} spots filled, {} left)",
            activity.title,
            context.catalog.signups().accepted_count(activity.key),
            activity.max_spots,
            context.catalog.spots_left(activity)
        )
        .map_err(output_error)?;

        write_applicants(out, &context.catalog, activity.key)?;
    }

    if hosted == 0 {
        writeln!(out, "you are not hosting any activities").map_err(output_error)?;
    }

    Ok(())
}

/// Ranked applicants of one activity.
pub(crate) fn write_applicants(
    out: &mut impl io::Write,
    catalog: &Catalog,
    activity: ActivityKey,
) -> Result<(), String> {
    let ranked = catalog.ranked_view(activity);

    if ranked.is_empty() {
        return writeln!(out, "no applicants yet").map_err(output_error);
    }

    let mut builder = Builder::default();

    builder.push_record(["Applicant", "Rank", "State"]);

    for signup in ranked {
        builder.push_record([
            signup.name.clone(),
            stars(signup.rank),
            signup.state.to_string(),
        ]);
    }

    write_table(out, builder)
}

fn stars(rank: Rank) -> String {
    let filled = usize::from(rank.stars());
    let empty = usize::from(MAX_RANK.saturating_sub(rank.stars()));

    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}
