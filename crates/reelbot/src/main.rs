use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use reelbot::cli::{Cli, Commands};
use reelbot::fetch::fetch_to_dir;
use reelbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use reelbot::{RUNNING_BANNER, STOPPED_BANNER};
use reelcore::extract::{ExtractionPool, YtDlpExtractor};
use reelcore::logging::{init_logger, install_panic_hook, log_startup_configuration};
use reelcore::Settings;

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the selected subcommand.
///
/// # Errors
/// Returns an error if initialization fails (settings, logging, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    install_panic_hook();

    // Load environment variables from .env if present
    let _ = dotenv();

    let settings = Arc::new(Settings::from_env()?);
    init_logger(&settings.log_file_path)?;

    match cli.command {
        Some(Commands::Fetch { url, output }) => run_cli_fetch(settings, url, output).await,
        Some(Commands::Run) => run_bot(settings).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(settings).await
        }
    }
}

/// Runs the bot with long polling until Ctrl-C
async fn run_bot(settings: Arc<Settings>) -> Result<()> {
    settings.require_token()?;
    log::info!("Starting bot...");
    log_startup_configuration(&settings);

    let bot = create_bot(&settings)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let extractor = Arc::new(YtDlpExtractor::from_settings(&settings));
    let pool = Arc::new(ExtractionPool::new(extractor, settings.max_concurrent_extractions));
    log::info!(
        "Extraction pool: {} ({} workers)",
        pool.extractor_name(),
        pool.max_concurrent()
    );

    let handler = schema(HandlerDeps::new(Arc::clone(&settings), pool));

    // Polling listener that drops updates queued while the bot was offline
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    log::info!("{}", RUNNING_BANNER);
    println!("{}", RUNNING_BANNER);

    Dispatcher::builder(bot, handler)
        // Every update runs in its own task, even several from the same chat
        .distribution_function(|_| None::<std::convert::Infallible>)
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("{}", STOPPED_BANNER);
    println!("{}", STOPPED_BANNER);
    Ok(())
}

/// Downloads one link locally and prints where the video went
async fn run_cli_fetch(settings: Arc<Settings>, url: String, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
    log_startup_configuration(&settings);

    let extractor = Arc::new(YtDlpExtractor::from_settings(&settings));
    let outcome = fetch_to_dir(&settings, extractor, &url, &output_dir).await?;

    println!("URL: {} ({})", url.trim(), outcome.family);
    println!("Title: {}", outcome.title);
    println!("Saved: {}", outcome.destination.display());
    println!("Size: {} bytes", outcome.size);
    println!("Caption: {}", outcome.caption.as_deref().unwrap_or("(none)"));
    Ok(())
}
