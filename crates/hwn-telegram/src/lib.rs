//! Telegram adapter (teloxide).
//!
//! This crate implements the `hwn-core` MessagingPort over Telegram Bot API.

use std::time::Duration;

use async_trait::async_trait;

use teloxide::prelude::*;

use tokio::time::sleep;

use hwn_core::{
    domain::{ChatId, MessageId, MessageRef, Recipient},
    errors::Error,
    messaging::{MessagingCapabilities, MessagingPort},
    Result,
};

/// Telegram rejects longer text messages.
const MAX_MESSAGE_LEN: usize = 4096;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Build a bot whose HTTP calls time out after `timeout`.
    pub fn from_token(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("telegram client build failed: {e}")))?;
        Ok(Self::new(Bot::with_client(token, client)))
    }

    /// Username of the bot, for the startup log line.
    pub async fn username(&self) -> anyhow::Result<String> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    fn tg_chat(to: &Recipient) -> teloxide::types::Recipient {
        match to {
            Recipient::Id(id) => teloxide::types::Recipient::Id(teloxide::types::ChatId(id.0)),
            Recipient::ChannelUsername(name) => {
                teloxide::types::Recipient::ChannelUsername(name.clone())
            }
        }
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Delivery(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        tracing::warn!("telegram rate limit hit, retrying in {d:?}");
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: MAX_MESSAGE_LEN,
        }
    }

    async fn send_text(&self, to: &Recipient, text: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| self.bot.send_message(Self::tg_chat(to), text.to_string()))
            .await?;

        Ok(MessageRef {
            chat_id: ChatId(msg.chat.id.0),
            message_id: MessageId(msg.id.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_telegram_text_limit() {
        let messenger =
            TelegramMessenger::from_token("123:abc", Duration::from_secs(5)).unwrap();
        assert_eq!(messenger.capabilities().max_message_len, 4096);
    }

    #[test]
    fn maps_recipients_to_telegram() {
        assert_eq!(
            TelegramMessenger::tg_chat(&Recipient::Id(ChatId(-1001))),
            teloxide::types::Recipient::Id(teloxide::types::ChatId(-1001))
        );
        assert_eq!(
            TelegramMessenger::tg_chat(&Recipient::ChannelUsername("@my_channel".to_string())),
            teloxide::types::Recipient::ChannelUsername("@my_channel".to_string())
        );
    }

    #[test]
    fn request_errors_become_delivery_errors() {
        let err = TelegramMessenger::map_err(teloxide::RequestError::RetryAfter(
            Duration::from_secs(3),
        ));
        assert_eq!(err.kind(), "delivery");
    }
}
