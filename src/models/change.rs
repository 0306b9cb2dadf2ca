//! Change-stream models

use super::record::{CollectionKind, RequestRecord};

/// Kind of record-level change reported by the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Modified,
    Removed,
}

/// One record-level change carrying the full current snapshot (not a diff).
/// `Removed` changes carry an empty snapshot; they are filtered out before
/// processing anyway.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub change_type: ChangeType,
    pub record_id: String,
    pub record: RequestRecord,
}

/// A set of changes delivered together for one collection
#[derive(Debug, Clone)]
pub struct ChangeBatch {
    pub kind: CollectionKind,
    pub events: Vec<ChangeEvent>,
}
