use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, LeaderboardService, QuizLoopService, SeriesService};
use tracing::{error, info};
use ui::{App, UiApp, build_app_context};

mod cli;
mod telemetry;

use cli::{Cli, Command};

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn series_service(&self) -> Arc<SeriesService> {
        self.services.series()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let backend = cli.storage_backend()?;
    let services = AppServices::open(&backend, Clock::default_clock()).await?;

    match cli.command() {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services: services.clone(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Application")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
        }
        Command::Seed => {
            if services.ensure_sample_series().await? {
                info!(%backend, "seeded sample series");
            } else {
                info!(%backend, "sample series already present");
            }
        }
    }

    services.close().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!("{err}");
        std::process::exit(2);
    }
}
