use std::sync::Arc;

use crate::{domain::Recipient, messaging::MessagingPort};

/// Best-effort delivery of notifications to the configured chat.
///
/// Never fails: a delivery problem is logged and reported as `false` so the
/// poll loop keeps its schedule.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    recipient: Recipient,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, recipient: impl Into<Recipient>) -> Self {
        Self {
            messenger,
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub async fn deliver(&self, text: &str) -> bool {
        let limit = self.messenger.capabilities().max_message_len;
        let body = truncate_chars(text, limit);

        tracing::debug!("sending message to chat {}", self.recipient);
        match self.messenger.send_text(&self.recipient, &body).await {
            Ok(msg) => {
                tracing::info!(message_id = msg.message_id.0, "message delivered: {body}");
                true
            }
            Err(e) => {
                tracing::error!("could not deliver message {body:?}: {e}");
                false
            }
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if max == 0 || text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        domain::{ChatId, MessageId, MessageRef},
        errors::Error,
        messaging::MessagingCapabilities,
        Result,
    };

    struct FakeMessenger {
        fail: bool,
        max_len: usize,
        sends: Mutex<Vec<(Recipient, String)>>,
    }

    impl FakeMessenger {
        fn new(fail: bool, max_len: usize) -> Self {
            Self {
                fail,
                max_len,
                sends: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        fn capabilities(&self) -> MessagingCapabilities {
            MessagingCapabilities {
                max_message_len: self.max_len,
            }
        }

        async fn send_text(&self, to: &Recipient, text: &str) -> Result<MessageRef> {
            self.sends.lock().unwrap().push((to.clone(), text.to_string()));
            if self.fail {
                return Err(Error::Delivery("401 Unauthorized".to_string()));
            }
            Ok(MessageRef {
                chat_id: ChatId(-100),
                message_id: MessageId(1),
            })
        }
    }

    #[tokio::test]
    async fn reports_success_and_targets_configured_chat() {
        let fake = Arc::new(FakeMessenger::new(false, 4096));
        let notifier = Notifier::new(fake.clone(), ChatId(77));
        assert!(notifier.deliver("hello").await);
        assert_eq!(
            fake.sends.lock().unwrap().as_slice(),
            &[(Recipient::Id(ChatId(77)), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn delivers_to_channel_username() {
        let fake = Arc::new(FakeMessenger::new(false, 4096));
        let channel = Recipient::ChannelUsername("@my_channel".to_string());
        let notifier = Notifier::new(fake.clone(), channel.clone());
        assert!(notifier.deliver("hello").await);
        assert_eq!(fake.sends.lock().unwrap()[0].0, channel);
    }

    #[tokio::test]
    async fn swallows_delivery_failures() {
        let fake = Arc::new(FakeMessenger::new(true, 4096));
        let notifier = Notifier::new(fake.clone(), ChatId(1));
        assert!(!notifier.deliver("hello").await);
        assert_eq!(fake.sends.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn truncates_to_messenger_limit() {
        let fake = Arc::new(FakeMessenger::new(false, 5));
        let notifier = Notifier::new(fake.clone(), ChatId(1));
        assert!(notifier.deliver("Работа проверена").await);
        assert_eq!(fake.sends.lock().unwrap()[0].1, "Рабо…");
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 0), "abc");
        assert_eq!(truncate_chars("abcd", 3), "ab…");
    }
}
