use async_trait::async_trait;

use crate::{
    domain::{MessageRef, Recipient},
    Result,
};

/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

/// Port for delivering plain-text notifications.
///
/// Implementations map every transport failure into `Error::Delivery`.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, to: &Recipient, text: &str) -> Result<MessageRef>;
}
