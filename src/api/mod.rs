use async_trait::async_trait;

pub mod telegram;

pub use telegram::TelegramClient;

/// Outbound push-delivery seam.
///
/// The event processor only cares whether the transport confirmed delivery;
/// everything else (endpoints, retries, error bodies) stays behind this
/// trait so tests can substitute a recording fake.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `chat_id`. Returns `true` only on confirmed delivery.
    async fn send_message(&self, chat_id: &str, text: &str) -> bool;
}
