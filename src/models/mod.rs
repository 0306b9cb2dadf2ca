//! Data models for the notification relay
//!
//! This module organizes the record, change-stream and registry types shared
//! across the db layer and the services.

pub mod change;
pub mod manager;
pub mod record;

// Re-export commonly used types for convenience
pub use change::{ChangeBatch, ChangeEvent, ChangeType};
pub use manager::Manager;
pub use record::{CollectionKind, RequestRecord, Status};
