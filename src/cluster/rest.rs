//! HBase REST gateway collaborator
//!
//! Talks to the REST gateway ("Stargate") that fronts a cluster. The gateway
//! exposes table listing, schemas and existence checks; table state changes
//! and cluster shutdown are not part of its API, so those calls fail with a
//! descriptive error.
//!
//! The gateway URL is read from `hbase.rest.url`. When unset it is derived
//! from the master host (`http://{master}:8080`).

use super::{
    ClusterAdmin, ClusterConnector, Configuration, ConnectError, TableDescriptor, VersionInfo,
    MASTER_KEY, REST_TIMEOUT_KEY, REST_URL_KEY,
};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_REST_PORT: u16 = 8080;
pub const DEFAULT_REST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TableList {
    #[serde(default)]
    table: Vec<TableListEntry>,
}

#[derive(Debug, Deserialize)]
struct TableListEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    name: String,
    #[serde(rename = "ColumnSchema", default)]
    column_schema: Vec<ColumnSchema>,
}

#[derive(Debug, Deserialize)]
struct ColumnSchema {
    name: String,
}

/// Parse the gateway's table listing (`GET /`)
fn parse_table_list(body: &str) -> Result<Vec<String>> {
    let list: TableList = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse table list: {}", e))?;
    Ok(list.table.into_iter().map(|t| t.name).collect())
}

/// Parse a table schema (`GET /{table}/schema`)
fn parse_table_schema(body: &str) -> Result<TableDescriptor> {
    let schema: TableSchema = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse table schema: {}", e))?;
    Ok(TableDescriptor::new(
        schema.name,
        schema.column_schema.into_iter().map(|c| c.name).collect(),
    ))
}

/// Reject table names that cannot be placed into a URL path segment
fn check_table_name(table: &str) -> Result<()> {
    if table.is_empty() {
        return Err(anyhow!("Table name cannot be empty"));
    }
    if let Some(c) = table
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')))
    {
        return Err(anyhow!("Invalid character '{}' in table name '{}'", c, table));
    }
    Ok(())
}

/// Resolve the gateway base URL from the configuration
fn resolve_base_url(config: &Configuration) -> Result<String> {
    if let Some(url) = config.get(REST_URL_KEY) {
        return Ok(url.trim_end_matches('/').to_string());
    }

    let master = config
        .get(MASTER_KEY)
        .ok_or_else(|| anyhow!("Neither {} nor {} is set", REST_URL_KEY, MASTER_KEY))?;

    // strip the master RPC port, the gateway listens on its own
    let host = match master.rsplit_once(':') {
        Some((host, port)) if port.parse::<u16>().is_ok() => host,
        _ => master,
    };
    Ok(format!("http://{}:{}", host, DEFAULT_REST_PORT))
}

fn is_master_unreachable(err: &ureq::Error) -> bool {
    matches!(
        err,
        ureq::Error::StatusCode(500..=599)
            | ureq::Error::Io(_)
            | ureq::Error::Timeout(_)
            | ureq::Error::HostNotFound
            | ureq::Error::ConnectionFailed
    )
}

/// Thin HTTP client bound to one gateway
#[derive(Debug, Clone)]
struct GatewayClient {
    base_url: String,
    agent: ureq::Agent,
}

impl GatewayClient {
    fn from_config(config: &Configuration) -> Result<Self> {
        let base_url = resolve_base_url(config)?;
        let timeout = config
            .get_int(REST_TIMEOUT_KEY)
            .and_then(|t| u64::try_from(t).ok())
            .unwrap_or(DEFAULT_REST_TIMEOUT_SECS);

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout)))
            .build()
            .into();

        Ok(Self { base_url, agent })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str, accept: &str) -> std::result::Result<String, ureq::Error> {
        let url = self.url(path);
        debug!(url = url.as_str(), "GET");
        self.agent
            .get(&url)
            .header("Accept", accept)
            .call()?
            .body_mut()
            .read_to_string()
    }

    fn get_json(&self, path: &str) -> Result<String> {
        self.get(path, "application/json")
            .map_err(|e| anyhow!("GET {} failed: {}", self.url(path), e))
    }

    fn schema(&self, table: &str) -> Result<TableDescriptor> {
        check_table_name(table)?;
        parse_table_schema(&self.get_json(&format!("{}/schema", table))?)
    }

    fn unsupported<T>(&self, operation: &str) -> Result<T> {
        Err(anyhow!(
            "{} is not available through the REST gateway at {}",
            operation,
            self.base_url
        ))
    }
}

/// Connector for a cluster reached through its REST gateway
#[derive(Debug, Clone, Default)]
pub struct RestGateway;

impl RestGateway {
    pub fn new() -> Self {
        Self
    }
}

/// Admin handle backed by the REST gateway
#[derive(Debug, Clone)]
pub struct RestAdmin {
    client: GatewayClient,
}

impl ClusterAdmin for RestAdmin {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        self.list_table_names()?
            .iter()
            .map(|name| self.client.schema(name))
            .collect()
    }

    /// Names only, without a schema request per table
    fn list_table_names(&self) -> Result<Vec<String>> {
        parse_table_list(&self.client.get_json("/")?)
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        check_table_name(table)?;
        let path = format!("{}/exists", table);
        match self.client.get(&path, "text/plain") {
            Ok(_) => Ok(true),
            Err(ureq::Error::StatusCode(404)) => Ok(false),
            Err(e) => Err(anyhow!("GET {} failed: {}", self.client.url(&path), e)),
        }
    }

    fn is_table_enabled(&self, _table: &str) -> Result<bool> {
        self.client.unsupported("Checking table state")
    }

    fn enable_table(&self, _table: &str) -> Result<()> {
        self.client.unsupported("Enabling tables")
    }

    fn disable_table(&self, _table: &str) -> Result<()> {
        self.client.unsupported("Disabling tables")
    }

    fn shutdown(&self) -> Result<()> {
        self.client.unsupported("Cluster shutdown")
    }
}

impl ClusterConnector for RestGateway {
    type Admin = RestAdmin;

    fn connect_admin(
        &self,
        config: &Configuration,
    ) -> std::result::Result<RestAdmin, ConnectError> {
        let client = GatewayClient::from_config(config)?;

        match client.get("/version/cluster", "text/plain") {
            Ok(version) => {
                info!(
                    gateway = client.base_url.as_str(),
                    cluster_version = version.trim(),
                    "connected to REST gateway"
                );
                Ok(RestAdmin { client })
            }
            Err(e) if is_master_unreachable(&e) => Err(ConnectError::MasterNotRunning(format!(
                "cluster behind {} is not reachable: {}",
                client.base_url, e
            ))),
            Err(e) => Err(ConnectError::Other(anyhow!(
                "Failed to query cluster version from {}: {}",
                client.base_url,
                e
            ))),
        }
    }

    fn table_descriptor(&self, config: &Configuration, table: &str) -> Result<TableDescriptor> {
        GatewayClient::from_config(config)?.schema(table)
    }

    /// Revision and date are captured by the build script
    fn version_info(&self) -> VersionInfo {
        VersionInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision: env!("HBADMIN_GIT_REVISION").to_string(),
            date: env!("HBADMIN_BUILD_DATE").to_string(),
        }
    }
}
