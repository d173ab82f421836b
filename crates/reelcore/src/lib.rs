//! reelgrab core library
//!
//! Everything that does not depend on Telegram: URL classification, the
//! yt-dlp extraction adapter and its bounded worker pool, output selection,
//! the delivery gate and the per-message session handler. The bot crate
//! supplies a [`messenger::Messenger`] implementation and drives
//! [`session::SessionHandler`] from the dispatcher.

pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod logging;
pub mod messenger;
pub mod output;
pub mod session;
pub mod validation;

pub use config::Settings;
pub use error::{AppError, AppResult};
pub use session::{SessionHandler, SessionReport, SessionState};
