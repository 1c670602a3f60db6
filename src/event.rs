//! Event identity and the PascalCase field convention.
//!
//! Every event kind registers its fields explicitly through [`Event::fields`];
//! [`Event::to_map`] turns them into the body other clients expect.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field names starting with this marker never leave the process.
pub const PRIVATE_FIELD_MARKER: char = '_';

const ID_KEY: &str = "Id";

/// Unique identifier of one event instance.
///
/// Rendered as a lowercase, hyphenated UUID (`b27f9322-7d73-4d98-a605-a731a2c373c6`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // hyphenated() is lowercase
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventId").field(&self.to_string()).finish()
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered `(name, value)` pairs an event kind declares for serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A domain event that can be written with the shared conventions.
pub trait Event {
    /// Type name stored next to the body, usually the kind's name (`RecordingFinished`).
    fn event_type(&self) -> &str;

    /// Identifier assigned when the event was created.
    fn id(&self) -> &EventId;

    /// Kind-specific fields in snake_case, without the identifier.
    fn fields(&self) -> Fields;

    /// Body as written to the store: public fields under PascalCase keys plus `"Id"`.
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (name, value) in self.fields() {
            if is_public_field(&name) {
                map.insert(to_pascal_case(&name), value);
            }
        }
        // the identifier always wins over a registered `id` field
        map.insert(ID_KEY.to_owned(), Value::String(self.id().to_string()));
        map
    }
}

pub fn is_public_field(name: &str) -> bool {
    !name.starts_with(PRIVATE_FIELD_MARKER)
}

/// `recording_id` -> `RecordingId`, `duration` -> `Duration`, `id` -> `Id`.
///
/// Each underscore separated segment is title-cased: the first cased letter
/// after any uncased character is upper-cased and the rest lower-cased, so
/// `file2path` becomes `File2Path` and `a中b` becomes `A中B`. Empty segments
/// disappear.
pub fn to_pascal_case(name: &str) -> String {
    if name == "id" {
        return ID_KEY.to_owned();
    }
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_') {
        let mut at_word_start = true;
        for c in segment.chars() {
            if is_cased(c) {
                if at_word_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(c);
                at_word_start = true;
            }
        }
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}
