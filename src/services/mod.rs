pub mod event_service;
pub mod message_service;
pub mod router_service;
pub mod subscription_service;
