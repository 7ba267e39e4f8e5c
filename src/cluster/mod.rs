//! Cluster collaborator seam
//!
//! This module describes the external column-store client as two narrow traits:
//!
//! - [`ClusterConnector`]: builds admin handles from a [`Configuration`], opens
//!   table descriptors and reports the client library version
//! - [`ClusterAdmin`]: the admin handle capability set (list/exists/enabled/
//!   enable/disable/shutdown)
//!
//! # Implementations
//!
//! ```text
//! cluster/
//! ├── configuration  # Key/value client configuration
//! ├── memory         # In-process cluster, used as a test double
//! └── rest           # HBase REST gateway client (feature = "rest")
//! ```

mod configuration;
pub mod memory;

#[cfg(feature = "rest")]
pub mod rest;

pub use configuration::{
    Configuration, CLIENT_RETRIES_KEY, IPC_CONNECT_RETRIES_KEY, MASTER_KEY, QUORUM_KEY,
    REST_TIMEOUT_KEY, REST_URL_KEY,
};
pub use memory::{MemoryAdmin, MemoryCluster};

#[cfg(feature = "rest")]
pub use rest::{RestAdmin, RestGateway};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Read-only description of a table: its name and column families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    name: String,
    families: Vec<String>,
}

impl TableDescriptor {
    /// Create a descriptor; family order is preserved
    pub fn new<S: Into<String>>(name: S, families: Vec<String>) -> Self {
        Self {
            name: name.into(),
            families,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column-family names in family-iteration order
    pub fn families(&self) -> &[String] {
        &self.families
    }
}

/// Version information of the client library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub revision: String,
    pub date: String,
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, r{}, {}", self.version, self.revision, self.date)
    }
}

/// Failure to obtain an admin handle
#[derive(Debug)]
pub enum ConnectError {
    /// The cluster master/coordinator could not be reached
    MasterNotRunning(String),
    /// Any other collaborator failure
    Other(anyhow::Error),
}

impl std::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectError::MasterNotRunning(msg) => write!(f, "Master not running: {}", msg),
            ConnectError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConnectError {}

impl From<anyhow::Error> for ConnectError {
    fn from(err: anyhow::Error) -> Self {
        ConnectError::Other(err)
    }
}

/// Admin handle of a connected cluster
pub trait ClusterAdmin {
    /// Descriptors of all tables known to the cluster
    fn list_tables(&self) -> Result<Vec<TableDescriptor>>;

    /// Names of all tables known to the cluster
    fn list_table_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_tables()?
            .iter()
            .map(|t| t.name().to_string())
            .collect())
    }

    fn table_exists(&self, table: &str) -> Result<bool>;

    fn is_table_enabled(&self, table: &str) -> Result<bool>;

    fn enable_table(&self, table: &str) -> Result<()>;

    fn disable_table(&self, table: &str) -> Result<()>;

    /// Shut down the whole cluster
    fn shutdown(&self) -> Result<()>;
}

/// Entry point into a cluster client library
pub trait ClusterConnector {
    type Admin: ClusterAdmin;

    /// Build an admin handle for the cluster described by `config`
    fn connect_admin(
        &self,
        config: &Configuration,
    ) -> std::result::Result<Self::Admin, ConnectError>;

    /// Open `table` and read its descriptor
    fn table_descriptor(&self, config: &Configuration, table: &str) -> Result<TableDescriptor>;

    /// Version of the client library; needs no connection
    fn version_info(&self) -> VersionInfo;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_display() {
        let info = VersionInfo {
            version: "2.5.8".to_string(),
            revision: "a1b2c3".to_string(),
            date: "Mon Mar 4 2024".to_string(),
        };
        assert_eq!(info.to_string(), "2.5.8, ra1b2c3, Mon Mar 4 2024");
    }

    #[test]
    fn test_table_descriptor_order() {
        let desc = TableDescriptor::new(
            "users",
            vec!["meta".to_string(), "info".to_string(), "acl".to_string()],
        );
        assert_eq!(desc.name(), "users");
        assert_eq!(desc.families(), &["meta", "info", "acl"]);
    }

    #[test]
    fn test_connect_error_display() {
        let err = ConnectError::MasterNotRunning("master1:16000 refused".to_string());
        assert_eq!(err.to_string(), "Master not running: master1:16000 refused");
    }
}
