//! Metadata written alongside an event body.

use std::collections::BTreeMap;
use std::env;
use std::fs;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::event::to_pascal_case;

const CREATED_KEY: &str = "Created";
const CLIENT_HOST_NAME_KEY: &str = "ClientHostName";
const UNKNOWN_HOST: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    created: Option<DateTime<Utc>>,
    client_host_name: Option<String>,
    extra: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a caller supplied pair. `test_id` is written as `TestId`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_client_host_name(mut self, host: impl Into<String>) -> Self {
        self.client_host_name = Some(host.into());
        self
    }

    pub fn created(&self) -> Option<&DateTime<Utc>> {
        self.created.as_ref()
    }

    pub fn client_host_name(&self) -> Option<&str> {
        self.client_host_name.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Wire document. `Created` and `ClientHostName` are filled in when unset
    /// and cannot be shadowed by caller pairs.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map: Map<String, Value> = self
            .extra
            .iter()
            .map(|(key, value)| (to_pascal_case(key), value.clone()))
            .collect();

        let created = self.created.unwrap_or_else(Utc::now);
        map.insert(
            CREATED_KEY.to_owned(),
            Value::String(created.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        let host = match &self.client_host_name {
            Some(host) => host.clone(),
            None => host_name(),
        };
        map.insert(CLIENT_HOST_NAME_KEY.to_owned(), Value::String(host));
        map
    }
}

/// Name of the machine writing events.
pub fn host_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .chain(fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_owned())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_owned())
}
