//! reelbot: Telegram front end for reelcore
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! drive [`telegram::schema`] directly.

pub mod cli;
pub mod fetch;
pub mod telegram;

/// Printed once polling starts
pub const RUNNING_BANNER: &str = "Bot is running…";

/// Printed after the dispatcher stops
pub const STOPPED_BANNER: &str = "Stopped.";
