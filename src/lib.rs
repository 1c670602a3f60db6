//! Cross-language event conventions on top of an event store.
//!
//! Events written through this crate carry PascalCase field names, a lowercase
//! hyphenated `Id`, `Category-Id` stream names and a metadata document with
//! `Created` and `ClientHostName`, so a client in another language reads them
//! as if it had written them itself.
//!
//! ```rust,ignore
//! use plumberd::{Event, EventId, EventStoreClient, Fields, StreamName};
//!
//! struct RecordingStarted {
//!     id: EventId,
//!     recording_id: String,
//! }
//!
//! impl Event for RecordingStarted {
//!     fn event_type(&self) -> &str {
//!         "RecordingStarted"
//!     }
//!
//!     fn id(&self) -> &EventId {
//!         &self.id
//!     }
//!
//!     fn fields(&self) -> Fields {
//!         Fields::new().field("recording_id", self.recording_id.as_str())
//!     }
//! }
//!
//! let client = EventStoreClient::from_env()?;
//! let stream = StreamName::new("Recording", "12345")?;
//! let event = RecordingStarted { id: EventId::new(), recording_id: "rec-1".into() };
//! client.append_to_stream(&stream, &event, None)?;
//! client.close()?;
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod metadata;
pub mod store;
pub mod stream;

pub use backend::{model::RecordedEvent, sqlite::SqliteBackend};
pub use client::EventStoreClient;
pub use config::{ClientConfig, ConfigError, Database};
pub use error::{Error, Result, ValidationError};
pub use event::{is_public_field, to_pascal_case, Event, EventId, Fields};
pub use metadata::Metadata;
pub use store::{AppendRequest, EventStore, ExpectedRevision, Position, StoreError};
pub use stream::StreamName;
