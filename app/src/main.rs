//! Job feed browser
//!
//! Pages through the remote job feed and keeps bookmarked jobs in
//! `data/bookmarkedJobs.json`.

mod app;
mod cli;
mod render;
mod settings;
mod telemetry;

use anyhow::Context;
use clap::Parser;

use crate::app::App;
use crate::cli::Cli;
use crate::settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings =
        Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    telemetry::init_tracing(&settings.logging);

    let app = App::new(&settings, cli.ephemeral).await;
    let output = app.run(cli.command).await?;
    print!("{output}");
    Ok(())
}
