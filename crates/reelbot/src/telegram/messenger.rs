//! `Messenger` backed by the Bot API

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, InputFile};

use reelcore::messenger::{ChatActivity, DeliveryError, Messenger, VideoReply};

use crate::telegram::Bot;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn chat_action(activity: ChatActivity) -> ChatAction {
    match activity {
        ChatActivity::Typing => ChatAction::Typing,
        ChatActivity::UploadVideo => ChatAction::UploadVideo,
    }
}

fn delivery_error(e: teloxide::RequestError) -> DeliveryError {
    DeliveryError::new(e.to_string())
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(delivery_error)?;
        Ok(())
    }

    async fn send_activity(&self, chat_id: i64, activity: ChatActivity) -> Result<(), DeliveryError> {
        self.bot
            .send_chat_action(ChatId(chat_id), chat_action(activity))
            .await
            .map_err(delivery_error)?;
        Ok(())
    }

    async fn send_video(&self, chat_id: i64, video: &VideoReply) -> Result<(), DeliveryError> {
        let mut request = self
            .bot
            .send_video(ChatId(chat_id), InputFile::file(video.path.clone()))
            .supports_streaming(video.supports_streaming);
        if let Some(caption) = &video.caption {
            request = request.caption(caption.clone());
        }
        request.await.map_err(delivery_error)?;
        Ok(())
    }
}
