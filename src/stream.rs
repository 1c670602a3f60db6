use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DELIMITER: char = '-';

/// `Category-Id` stream name.
///
/// The category never contains the delimiter, the id may (`Task-b27f9322-7d73-...`),
/// so parsing on the first delimiter always gives back the original pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamName {
    category: String,
    stream_id: String,
}

impl StreamName {
    pub fn new(
        category: impl Into<String>,
        stream_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let category = category.into();
        let stream_id = stream_id.into();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if category.contains(DELIMITER) {
            return Err(ValidationError::CategoryContainsDelimiter(category));
        }
        if stream_id.is_empty() {
            return Err(ValidationError::EmptyStreamId);
        }
        Ok(Self {
            category,
            stream_id,
        })
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.split_once(DELIMITER) {
            Some((category, stream_id)) => Self::new(category, stream_id),
            None => Err(ValidationError::MissingDelimiter(s.to_owned())),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.category, DELIMITER, self.stream_id)
    }
}

impl FromStr for StreamName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StreamName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StreamName> for String {
    fn from(stream: StreamName) -> Self {
        stream.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "b27f9322-7d73-4d98-a605-a731a2c373c6";

    #[test]
    fn formats_category_and_id() {
        let stream = StreamName::new("Recording", "12345").unwrap();
        assert_eq!(stream.to_string(), "Recording-12345");
    }

    #[test]
    fn formats_uuid_id() {
        let stream = StreamName::new("Recording", UUID).unwrap();
        assert_eq!(
            stream.to_string(),
            "Recording-b27f9322-7d73-4d98-a605-a731a2c373c6"
        );
    }

    #[test]
    fn parses_on_first_delimiter() {
        let stream: StreamName = "Recording-12345".parse().unwrap();
        assert_eq!(stream.category(), "Recording");
        assert_eq!(stream.stream_id(), "12345");

        let stream = StreamName::parse(&format!("Task-{UUID}")).unwrap();
        assert_eq!(stream.category(), "Task");
        assert_eq!(stream.stream_id(), UUID);
    }

    #[test]
    fn round_trips() {
        for (category, id) in [("Recording", "1"), ("Task", UUID), ("A", "--")] {
            let stream = StreamName::new(category, id).unwrap();
            let parsed = StreamName::parse(&stream.to_string()).unwrap();
            assert_eq!(parsed, stream);
            assert_eq!(parsed.category(), category);
            assert_eq!(parsed.stream_id(), id);
        }
    }

    #[test]
    fn rejects_invalid_parts() {
        assert_eq!(
            StreamName::new("", "123"),
            Err(ValidationError::EmptyCategory)
        );
        assert_eq!(
            StreamName::new("Test", ""),
            Err(ValidationError::EmptyStreamId)
        );
        assert_eq!(
            StreamName::new("My-Category", "1"),
            Err(ValidationError::CategoryContainsDelimiter("My-Category".to_owned()))
        );
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(
            StreamName::parse("InvalidFormat"),
            Err(ValidationError::MissingDelimiter("InvalidFormat".to_owned()))
        );
        assert_eq!(StreamName::parse("-1"), Err(ValidationError::EmptyCategory));
        assert_eq!(
            StreamName::parse("Recording-"),
            Err(ValidationError::EmptyStreamId)
        );
    }

    #[test]
    fn serde_uses_string_form() {
        let stream = StreamName::new("Recording", "12345").unwrap();
        let json = serde_json::to_string(&stream).unwrap();
        assert_eq!(json, "\"Recording-12345\"");
        let back: StreamName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stream);
        assert!(serde_json::from_str::<StreamName>("\"nodelimiter\"").is_err());
    }
}
