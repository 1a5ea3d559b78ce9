use std::{io, sync::Arc};

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;
use mingled_app::{
    config::AppConfig,
    context::AppContext,
    session::{Credentials, DemoIdentityProvider},
};
use tabled::{
    builder::Builder,
    settings::{Color, Style, Theme, object::Rows},
};

mod feed;
mod host;
mod walkthrough;

#[derive(Debug, Parser)]
#[command(name = "mingled-app", about = "Mingled demo CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and list activities
    Feed(feed::FeedArgs),

    /// Show ranked applicants for the activities you host
    Host(host::HostArgs),

    /// Host an activity, review applicants and wrap up attendance
    Walkthrough(walkthrough::WalkthroughArgs),
}

impl Cli {
    pub(crate) fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let mut out = io::stdout();

        match self.command {
            Commands::Feed(args) => feed::run(&self.config, args, &mut out).await,
            Commands::Host(args) => host::run(&self.config, args, &mut out).await,
            Commands::Walkthrough(args) => walkthrough::run(&self.config, args, &mut out).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CredentialsArgs {
    /// Email address to sign in with
    #[arg(long)]
    email: String,

    /// Password (any non-empty value is accepted)
    #[arg(long)]
    password: String,
}

/// Seed the demo stores and sign in.
pub(crate) async fn signed_in(
    config: &AppConfig,
    credentials: CredentialsArgs,
) -> Result<AppContext, String> {
    let provider = Arc::new(DemoIdentityProvider::new(config.auth.latency()));

    let mut context = AppContext::demo(provider, Timestamp::now())
        .map_err(|error| format!("failed to start app: {error}"))?;

    context
        .session
        .sign_in(Credentials::new(credentials.email, credentials.password))
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    Ok(context)
}

pub(crate) fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), String> {
    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}").map_err(output_error)
}

pub(crate) fn output_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

#[cfg(test)]
pub(crate) mod test {
    use std::time::Duration;

    use super::*;

    /// Demo stores with `email` signed in and no simulated latency.
    pub(crate) async fn context_for(email: &str) -> Result<AppContext, String> {
        let provider = Arc::new(DemoIdentityProvider::new(Duration::ZERO));

        let mut context = AppContext::demo(provider, Timestamp::UNIX_EPOCH)
            .map_err(|error| error.to_string())?;

        context
            .session
            .sign_in(Credentials::new(email, "pw"))
            .await
            .map_err(|error| error.to_string())?;

        Ok(context)
    }
}
