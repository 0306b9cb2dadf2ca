//! Manager registry models

/// One entry of the manager registry: routes a payment method to the chat
/// that should receive notifications for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    pub id: String,
    pub payment: String,
    pub chat_id: Option<String>,
}
