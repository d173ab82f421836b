//! Dispatcher schema and handler chain builders

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use reelcore::extract::ExtractionPool;
use reelcore::{SessionHandler, Settings};

use crate::telegram::bot::Command;
use crate::telegram::{Bot, TelegramMessenger};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub settings: Arc<Settings>,
    pub extraction_pool: Arc<ExtractionPool>,
}

impl HandlerDeps {
    pub fn new(settings: Arc<Settings>, extraction_pool: Arc<ExtractionPool>) -> Self {
        Self {
            settings,
            extraction_pool,
        }
    }

    /// Session handler replying through `bot`
    pub fn session(&self, bot: Bot) -> SessionHandler {
        SessionHandler::new(
            Arc::clone(&self.settings),
            Arc::clone(&self.extraction_pool),
            Arc::new(TelegramMessenger::new(bot)),
        )
    }
}

/// Creates the dispatcher schema.
///
/// Commands are matched first; any other text message starts a session.
/// Unknown commands and non-text messages are left to the default handler.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(command_handler(deps.clone()))
        .branch(message_handler(deps))
}

/// Whether `text` is a bot command rather than a link
pub fn is_command_text(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);
                match cmd {
                    Command::Start => {
                        if let Err(e) = deps.session(bot).greet(msg.chat.id.0).await {
                            log::error!("Failed to send greeting to chat {}: {}", msg.chat.id, e);
                        }
                    }
                }
                Ok(())
            }
        },
    ))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message| msg.text().filter(|text| !is_command_text(text)).map(str::to_owned))
        .endpoint(move |bot: Bot, msg: Message, text: String| {
            let deps = deps.clone();
            async move {
                let report = deps.session(bot).handle(msg.chat.id.0, &text).await;
                log::debug!("chat {}: session finished in state {}", report.chat_id, report.state);
                Ok(())
            }
        })
}
