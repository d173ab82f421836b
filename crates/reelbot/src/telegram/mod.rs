//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod messenger;

pub use bot::{create_bot, setup_bot_commands};
pub use handlers::{schema, HandlerDeps};
pub use messenger::TelegramMessenger;

pub type Bot = teloxide::Bot;
