//! Append orchestration: event and metadata in, one store write out.

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::backend::sqlite::SqliteBackend;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::metadata::Metadata;
use crate::store::{AppendRequest, EventStore, ExpectedRevision, Position};
use crate::stream::StreamName;

/// Writes events to a store using the shared conventions.
///
/// The store is acquired on construction and released by [`close`](Self::close)
/// or when the client is dropped. A client is meant for one caller at a time.
#[derive(Debug)]
pub struct EventStoreClient<S: EventStore = SqliteBackend> {
    store: S,
}

impl EventStoreClient<SqliteBackend> {
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(SqliteBackend::open(config)?))
    }

    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::connect(&config)
    }
}

impl<S: EventStore> EventStoreClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends `event` to `stream` whatever the stream's current revision.
    pub fn append_to_stream<E>(
        &self,
        stream: &StreamName,
        event: &E,
        metadata: Option<&Metadata>,
    ) -> Result<Position>
    where
        E: Event + ?Sized,
    {
        self.append_to_stream_expecting(stream, event, metadata, ExpectedRevision::Any)
    }

    #[instrument(skip_all, fields(stream = %stream, event_type = event.event_type(), event_id = %event.id()))]
    pub fn append_to_stream_expecting<E>(
        &self,
        stream: &StreamName,
        event: &E,
        metadata: Option<&Metadata>,
        expected: ExpectedRevision,
    ) -> Result<Position>
    where
        E: Event + ?Sized,
    {
        let data = encode("event body", &event.to_map())?;
        let metadata = match metadata {
            Some(metadata) => metadata.to_map(),
            None => Metadata::new().to_map(),
        };
        let metadata = encode("event metadata", &metadata)?;

        let position = self.store.append(AppendRequest {
            stream: stream.to_string(),
            event_id: *event.id(),
            event_type: event.event_type().to_owned(),
            data,
            metadata,
            expected,
        })?;
        debug!(%position, "appended event");
        Ok(position)
    }

    pub fn close(self) -> Result<()> {
        self.store.close()?;
        info!("event store client closed");
        Ok(())
    }
}

fn encode(what: &'static str, map: &Map<String, Value>) -> Result<Vec<u8>> {
    serde_json::to_vec(map).map_err(|source| Error::Encode { what, source })
}
