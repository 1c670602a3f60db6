use std::fmt::Debug;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, types::Type, TransactionBehavior};
use tracing::{debug, info, instrument};

use crate::backend::model::RecordedEvent;
use crate::config::{ClientConfig, Database};
use crate::error::Result;
use crate::store::{AppendRequest, EventStore, Position, StoreError};

pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
}

static CREATE_TABLE_STMT: &str = "CREATE TABLE IF NOT EXISTS events(
                position INTEGER PRIMARY KEY AUTOINCREMENT,
                stream TEXT NOT NULL,
                revision INTEGER NOT NULL,
                event_id TEXT NOT NULL,
                event_type TEXT NOT NULL,
                data BLOB NOT NULL,
                metadata BLOB NOT NULL,
                UNIQUE(stream, revision)
            )";

static CURRENT_REVISION_STMT: &str = "SELECT MAX(revision) FROM events WHERE stream = ?1";

static INSERT_EVENT_STMT: &str = "INSERT INTO events
                (stream, revision, event_id, event_type, data, metadata)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

static READ_STREAM_STMT: &str = "SELECT event_id, stream, revision, position, event_type, data, metadata
                FROM events WHERE stream = ?1 ORDER BY revision ASC";

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("pool", &self.pool.state())
            .finish()
    }
}

impl SqliteBackend {
    /// Private in-memory database, lives as long as the backend.
    pub fn in_memory() -> Result<Self> {
        Self::open(&ClientConfig::default())
    }

    #[instrument(skip_all, fields(database = ?config.database))]
    pub fn open(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let timeout = config.connect_timeout;
        let builder = Pool::builder().connection_timeout(timeout);
        let (manager, builder) = match &config.database {
            // every connection to :memory: is its own database, so the single
            // connection must never be reaped
            Database::Memory => (
                SqliteConnectionManager::memory(),
                builder.max_size(1).idle_timeout(None).max_lifetime(None),
            ),
            Database::File(path) => (
                SqliteConnectionManager::file(path),
                builder.max_size(config.pool_size),
            ),
        };
        let manager = manager.with_init(move |conn| conn.busy_timeout(timeout));
        let pool = builder.build(manager).map_err(StoreError::from)?;
        let backend = Self { pool };
        backend.init_tables()?;
        info!(max_size = backend.pool.max_size(), "opened sqlite event store");
        Ok(backend)
    }

    #[instrument]
    fn init_tables(&self) -> Result<(), StoreError> {
        let _span = tracing::debug_span!("creating tables").entered();
        self.pool.get()?.execute(CREATE_TABLE_STMT, params![])?;
        debug!(executed_query = CREATE_TABLE_STMT, "executed query");
        Ok(())
    }

    /// All events of `stream` in revision order.
    #[instrument]
    pub fn read_stream(&self, stream: &str) -> Result<Vec<RecordedEvent>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(READ_STREAM_STMT)?;
        let events = stmt
            .query_map(params![stream], |row| {
                let id: String = row.get(0)?;
                let id = uuid::Uuid::parse_str(&id).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                })?;
                Ok(RecordedEvent {
                    id,
                    stream: row.get(1)?,
                    revision: row.get::<_, i64>(2)? as u64,
                    position: Position(row.get::<_, i64>(3)? as u64),
                    event_type: row.get(4)?,
                    data: row.get(5)?,
                    metadata: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(executed_query = READ_STREAM_STMT, count = events.len(), "executed query");
        if events.is_empty() {
            return Err(StoreError::StreamNotFound(stream.to_owned()));
        }
        Ok(events)
    }
}

impl EventStore for SqliteBackend {
    #[instrument(skip_all, fields(stream = %request.stream, event_type = %request.event_type))]
    fn append(&self, request: AppendRequest) -> Result<Position, StoreError> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = tx
            .query_row(CURRENT_REVISION_STMT, params![request.stream], |row| {
                row.get::<_, Option<i64>>(0)
            })?
            .map(|revision| revision as u64);
        debug!(executed_query = CURRENT_REVISION_STMT, ?current, "executed query");

        if !request.expected.accepts(current) {
            return Err(StoreError::WrongExpectedRevision {
                stream: request.stream,
                expected: request.expected,
                actual: current,
            });
        }

        let revision = current.map_or(0, |revision| revision + 1);
        tx.execute(
            INSERT_EVENT_STMT,
            params![
                request.stream,
                revision as i64,
                request.event_id.to_string(),
                request.event_type,
                request.data,
                request.metadata,
            ],
        )?;
        let position = Position(tx.last_insert_rowid() as u64);
        tx.commit()?;
        debug!(executed_query = INSERT_EVENT_STMT, revision, %position, "executed query");
        Ok(position)
    }

    #[instrument]
    fn close(self) -> Result<(), StoreError> {
        info!(state = ?self.pool.state(), "closing sqlite event store");
        drop(self.pool);
        Ok(())
    }
}
