//! Mingled demo CLI

use std::process;

use clap::Parser;
use mingled_app::observability::init_subscriber;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_subscriber(&cli.config().logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
