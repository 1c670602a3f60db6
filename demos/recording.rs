//! Writes a RecordingStarted / RecordingFinished pair to `Recording-<uuid>`.
//!
//! ```sh
//! PLUMBERD_CONNECTION_STRING=sqlite://recordings.db RUST_LOG=debug cargo run --example recording
//! ```

use plumberd::{Event, EventId, EventStoreClient, Fields, Metadata, StreamName};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct RecordingStarted {
    id: EventId,
    recording_id: String,
    camera_id: String,
}

impl Event for RecordingStarted {
    fn event_type(&self) -> &str {
        "RecordingStarted"
    }

    fn id(&self) -> &EventId {
        &self.id
    }

    fn fields(&self) -> Fields {
        Fields::new()
            .field("recording_id", self.recording_id.as_str())
            .field("camera_id", self.camera_id.as_str())
    }
}

struct RecordingFinished {
    id: EventId,
    recording_id: String,
    duration: f64,
    file_path: String,
}

impl Event for RecordingFinished {
    fn event_type(&self) -> &str {
        "RecordingFinished"
    }

    fn id(&self) -> &EventId {
        &self.id
    }

    fn fields(&self) -> Fields {
        Fields::new()
            .field("recording_id", self.recording_id.as_str())
            .field("duration", self.duration)
            .field("file_path", self.file_path.as_str())
    }
}

fn main() -> plumberd::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = EventStoreClient::from_env()?;
    let stream = StreamName::new("Recording", "b27f9322-7d73-4d98-a605-a731a2c373c6")?;

    let started = RecordingStarted {
        id: EventId::new(),
        recording_id: "rec-123".to_owned(),
        camera_id: "camera-01".to_owned(),
    };
    info!(event_id = %started.id, "writing RecordingStarted");
    client.append_to_stream(&stream, &started, None)?;

    let finished = RecordingFinished {
        id: EventId::new(),
        recording_id: "rec-123".to_owned(),
        duration: 120.5,
        file_path: "/recordings/rec-123.mp4".to_owned(),
    };
    let metadata = Metadata::new().with("camera_id", "camera-01");
    info!(event_id = %finished.id, "writing RecordingFinished");
    let position = client.append_to_stream(&stream, &finished, Some(&metadata))?;

    info!(%stream, %position, "events written");
    client.close()
}
