//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A panic hook that routes panics through the logger
//! - A startup summary of the yt-dlp configuration

use simplelog::*;
use std::path::Path;

use crate::config::Settings;
use crate::error::AppResult;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file (truncated on start)
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(AppError)` - Log file could not be created or a logger is already set
pub fn init_logger(log_file_path: &Path) -> AppResult<()> {
    let log_file = fs_err::File::create(log_file_path)?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])?;

    Ok(())
}

/// Logs panics instead of letting them vanish inside dispatcher tasks
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));
}

/// Logs the effective download configuration at startup
///
/// A missing cookies file is not fatal: public videos download fine without
/// one, so it is reported and the flag is simply left off.
pub fn log_startup_configuration(settings: &Settings) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("yt-dlp binary: {}", settings.ytdl_bin);
    log::info!("Working directories under: {}", settings.temp_dir.display());
    log::info!(
        "Reply delay: {}s, upload limit: {} bytes, extraction workers: {}",
        settings.reply_delay.as_secs(),
        settings.max_upload_bytes,
        settings.max_concurrent_extractions
    );

    match settings.cookies_file.as_deref() {
        Some(path) if path.exists() => log::info!("✅ YTDL_COOKIES_FILE: {}", path.display()),
        Some(path) => {
            log::error!("❌ YTDL_COOKIES_FILE: {} (FILE NOT FOUND!)", path.display());
            log::error!("   Current directory: {:?}", std::env::current_dir());
        }
        None => log::info!("YTDL_COOKIES_FILE: not set"),
    }

    if let Some(api_url) = settings.bot_api_url.as_deref() {
        log::info!("Bot API URL: {}", api_url);
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
