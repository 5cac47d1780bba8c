//! Delivery channels for outgoing notifications.

pub mod twilio;

use async_trait::async_trait;

use crate::error::ProviderError;

/// Telephony gateway the dispatcher hands messages to.
///
/// Implementations own the originating number and provider credentials;
/// callers only supply the destination and the content. Transport-level
/// retry and timeouts are the implementation's concern, not the caller's.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message.
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ProviderError>;

    /// Place a voice call that reads `spoken_text` to the recipient.
    async fn place_call(&self, to: &str, spoken_text: &str) -> Result<(), ProviderError>;
}
