//! Snippetropolis CLI entry point.

use anyhow::Result;
use clap::Parser;
use snippetropolis::cli::{commands, preflight, Cli, Commands, Output};
use snippetropolis::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        Output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("snippetropolis={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Only commands that talk to the service need an API key
    let connect = || preflight::connect(&settings);

    // Execute command
    match &cli.command {
        Commands::CreateIndex { name, engines } => {
            commands::run_create_index(&connect()?, name, engines, &settings).await?;
        }

        Commands::UploadVideo {
            index_id,
            path,
            language,
            wait,
        } => {
            commands::run_upload_video(
                &connect()?,
                index_id,
                path,
                language.as_deref(),
                *wait,
                &settings,
            )
            .await?;
        }

        Commands::ListIndexes => {
            commands::run_list_indexes(&connect()?).await?;
        }

        Commands::ListVideos { index_id } => {
            commands::run_list_videos(&connect()?, index_id).await?;
        }

        Commands::Search {
            index_id,
            text,
            image,
            limit,
        } => {
            let client = connect()?;
            commands::run_search(&client, index_id, text.as_deref(), image.as_deref(), *limit)
                .await?;
        }

        Commands::Summarize {
            video_id,
            summary_type,
            instruction,
            language,
        } => {
            commands::run_summarize(
                &connect()?,
                video_id,
                summary_type,
                instruction.as_deref(),
                language.as_deref(),
            )
            .await?;
        }

        Commands::Ask { video_id, question } => {
            commands::run_ask(&connect()?, video_id, question).await?;
        }

        Commands::Chat { video_id, index } => {
            commands::run_chat(&connect()?, video_id, index.as_deref()).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
