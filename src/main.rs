//! Medika CLI entry point.

use anyhow::Result;
use clap::Parser;
use medika::cli::{commands, Cli, Commands};
use medika::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("medika={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Chat { model } => {
            commands::run_chat(model.clone(), settings).await?;
        }

        Commands::Ask { text, model } => {
            commands::run_ask(text, model.clone(), settings).await?;
        }

        Commands::Route { text } => {
            commands::run_route(text)?;
        }

        Commands::Patients => {
            commands::run_patients(settings).await?;
        }

        Commands::Doctors => {
            commands::run_doctors(settings).await?;
        }

        Commands::AddDoctor {
            name,
            specialty,
            schedule,
        } => {
            commands::run_add_doctor(name, specialty, schedule, settings).await?;
        }

        Commands::Stats => {
            commands::run_stats(settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
