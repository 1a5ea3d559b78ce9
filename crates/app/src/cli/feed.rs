use std::io;

use clap::Args;
use mingled::activities::{Activity, CategoryFilter};
use mingled_app::{config::AppConfig, context::AppContext, session::SessionPhase};
use tabled::builder::Builder;

use crate::cli::{CredentialsArgs, output_error, signed_in, write_table};

#[derive(Debug, Args)]
pub(crate) struct FeedArgs {
    #[command(flatten)]
    credentials: CredentialsArgs,

    /// Category to show (all, cultural, sports, culinary, nightlife, outdoor, other)
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
}

pub(crate) async fn run(
    config: &AppConfig,
    args: FeedArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let context = signed_in(config, args.credentials).await?;

    if context.phase() == SessionPhase::Authenticated {
        writeln!(out, "profile not completed yet; run `walkthrough` to set one up")
            .map_err(output_error)?;
    }

    write_feed(out, &context, args.category)
}

pub(crate) fn write_feed(
    out: &mut impl io::Write,
    context: &AppContext,
    filter: CategoryFilter,
) -> Result<(), String> {
    let mut builder = Builder::default();

    builder.push_record(["Title", "Category", "Starts", "Area", "Spots left", "Budget", ""]);

    let mut shown = 0_usize;

    for activity in context.catalog.list(filter) {
        builder.push_record([
            activity.title.clone(),
            activity.category.to_string(),
            activity.starts_at.strftime("%Y-%m-%d %H:%M UTC").to_string(),
            activity.area.clone(),
            format!(
                "{}/{}",
                context.catalog.spots_left(activity),
                activity.max_spots
            ),
            activity.budget.description().to_string(),
            status(context, activity).to_string(),
        ]);

        shown += 1;
    }

    if shown == 0 {
        return writeln!(out, "no activities found").map_err(output_error);
    }

    write_table(out, builder)
}

fn status(context: &AppContext, activity: &Activity) -> &'static str {
    let full = context.catalog.is_full(activity);

    let Some(user) = context.current_user() else {
        return if full { "full" } else { "" };
    };

    if activity.host == user {
        "hosting"
    } else if context.catalog.signups().has_applied(activity.key, user) {
        "joined"
    } else if full {
        "full"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use mingled::activities::Category;
    use testresult::TestResult;

    use crate::cli::test::context_for;

    use super::*;

    #[tokio::test]
    async fn feed_lists_seeded_activities() -> TestResult {
        let context = context_for("bob@mingled.app").await?;
        let mut out = Vec::new();

        write_feed(&mut out, &context, CategoryFilter::All)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Coffee & Art Gallery Tour"));
        assert!(output.contains("Sunset Hiking Adventure"));
        assert!(output.contains("Premium (>€50)"));
        assert!(output.contains("joined"), "bob applied to two activities");

        Ok(())
    }

    #[tokio::test]
    async fn feed_reports_empty_category() -> TestResult {
        let context = context_for("bob@mingled.app").await?;
        let mut out = Vec::new();

        write_feed(&mut out, &context, CategoryFilter::Only(Category::Nightlife))?;

        assert_eq!(String::from_utf8(out)?, "no activities found\n");

        Ok(())
    }
}
