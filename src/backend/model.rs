use crate::store::Position;

/// An event as it sits in a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub id: uuid::Uuid,
    pub stream: String,
    pub revision: u64,
    pub position: Position,
    pub event_type: String,
    pub data: Vec<u8>,
    pub metadata: Vec<u8>,
}

impl RecordedEvent {
    pub fn data_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.data)
    }

    pub fn metadata_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.metadata)
    }
}
