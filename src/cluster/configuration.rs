//! Client configuration handed to the cluster collaborator

use serde::Serialize;
use std::collections::BTreeMap;

/// Address of the cluster master
pub const MASTER_KEY: &str = "hbase.master";
/// Comma-separated coordination quorum
pub const QUORUM_KEY: &str = "hbase.zookeeper.quorum";
/// Retries the client library performs per operation
pub const CLIENT_RETRIES_KEY: &str = "hbase.client.retries.number";
/// Retries for establishing an IPC connection
pub const IPC_CONNECT_RETRIES_KEY: &str = "ipc.client.connect.max.retries";
/// REST gateway base URL
pub const REST_URL_KEY: &str = "hbase.rest.url";
/// REST gateway request timeout in seconds
pub const REST_TIMEOUT_KEY: &str = "hbase.rest.timeout.secs";

/// String key/value configuration, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    entries: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string value, replacing any previous value
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Set an integer value
    pub fn set_int<K: Into<String>>(&mut self, key: K, value: i64) -> &mut Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a value parsed as an integer; `None` if missing or not a number
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
