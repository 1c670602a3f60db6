//! What the convention layer needs from an event store.

use std::fmt;

use thiserror::Error;

use crate::event::EventId;

/// Global position of a written event. Later appends get larger positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub u64);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optimistic concurrency check applied to the target stream before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedRevision {
    #[default]
    Any,
    NoStream,
    StreamExists,
    /// Revision of the last event currently in the stream (first event is 0).
    Exact(u64),
}

impl ExpectedRevision {
    pub fn accepts(&self, current: Option<u64>) -> bool {
        match (self, current) {
            (Self::Any, _) => true,
            (Self::NoStream, None) => true,
            (Self::StreamExists, Some(_)) => true,
            (Self::Exact(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }
}

impl fmt::Display for ExpectedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::NoStream => f.write_str("no stream"),
            Self::StreamExists => f.write_str("stream exists"),
            Self::Exact(revision) => revision.fmt(f),
        }
    }
}

#[derive(Debug)]
pub struct AppendRequest {
    pub stream: String,
    pub event_id: EventId,
    pub event_type: String,
    pub data: Vec<u8>,
    pub metadata: Vec<u8>,
    pub expected: ExpectedRevision,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event store unavailable: {0}")]
    Connection(String),

    #[error("wrong expected revision on {stream}: expected {expected}, actual {}", fmt_revision(.actual))]
    WrongExpectedRevision {
        stream: String,
        expected: ExpectedRevision,
        actual: Option<u64>,
    },

    #[error("stream {0} not found")]
    StreamNotFound(String),

    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

fn fmt_revision(revision: &Option<u64>) -> String {
    match revision {
        Some(revision) => revision.to_string(),
        None => "no stream".to_owned(),
    }
}

/// Append side of an event store.
///
/// Errors are reported as-is to the caller of the client, nothing here retries.
pub trait EventStore {
    fn append(&self, request: AppendRequest) -> Result<Position, StoreError>;

    /// Releases the connection. Dropping the store does the same without a result.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}
