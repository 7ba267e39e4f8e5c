//! In-process cluster
//!
//! `MemoryCluster` keeps a handful of tables in shared memory and behaves like a
//! small cluster: tables can be enabled and disabled, the master can be marked
//! as down, and a shutdown stops every later admin call. Clones share state, so
//! a test can hand one clone to a session and inspect another.

use super::{
    ClusterAdmin, ClusterConnector, Configuration, ConnectError, TableDescriptor, VersionInfo,
    MASTER_KEY,
};
use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone)]
struct MemoryTable {
    descriptor: TableDescriptor,
    enabled: bool,
}

#[derive(Debug)]
struct ClusterState {
    tables: Vec<MemoryTable>,
    master_running: bool,
    shut_down: bool,
    version: VersionInfo,
    connect_attempts: usize,
    last_configuration: Option<Configuration>,
}

/// Shared in-memory cluster
#[derive(Debug, Clone)]
pub struct MemoryCluster {
    state: Arc<Mutex<ClusterState>>,
}

impl Default for MemoryCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCluster {
    /// Create a running cluster with no tables
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ClusterState {
                tables: Vec::new(),
                master_running: true,
                shut_down: false,
                version: VersionInfo {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    revision: "memory".to_string(),
                    date: "in-process".to_string(),
                },
                connect_attempts: 0,
                last_configuration: None,
            })),
        }
    }

    /// Add an enabled table with the given column families
    pub fn with_table(self, name: &str, families: &[&str]) -> Self {
        self.add_table(name, families);
        self
    }

    /// Mark the master as not running; connect attempts will fail
    pub fn with_master_down(self) -> Self {
        self.set_master_running(false);
        self
    }

    /// Override the reported client version
    pub fn with_version(self, version: VersionInfo) -> Self {
        self.lock().version = version;
        self
    }

    pub fn add_table(&self, name: &str, families: &[&str]) {
        let descriptor =
            TableDescriptor::new(name, families.iter().map(|f| f.to_string()).collect());
        self.lock().tables.push(MemoryTable {
            descriptor,
            enabled: true,
        });
    }

    pub fn set_master_running(&self, running: bool) {
        self.lock().master_running = running;
    }

    /// Check whether `shutdown` was issued against this cluster
    pub fn is_shut_down(&self) -> bool {
        self.lock().shut_down
    }

    /// Number of admin handles requested so far
    pub fn connect_attempts(&self) -> usize {
        self.lock().connect_attempts
    }

    /// Configuration passed with the most recent connect attempt
    pub fn last_configuration(&self) -> Option<Configuration> {
        self.lock().last_configuration.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ClusterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_table<T>(
        &self,
        table: &str,
        f: impl FnOnce(&mut MemoryTable) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.lock();
        if state.shut_down {
            return Err(anyhow!("cluster is shut down"));
        }
        match state
            .tables
            .iter_mut()
            .find(|t| t.descriptor.name() == table)
        {
            Some(t) => f(t),
            None => Err(anyhow!("table not found: {}", table)),
        }
    }

    fn ensure_running(&self) -> Result<()> {
        if self.lock().shut_down {
            return Err(anyhow!("cluster is shut down"));
        }
        Ok(())
    }
}

/// Admin handle onto a [`MemoryCluster`]
#[derive(Debug, Clone)]
pub struct MemoryAdmin {
    cluster: MemoryCluster,
}

impl ClusterAdmin for MemoryAdmin {
    fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        self.cluster.ensure_running()?;
        Ok(self
            .cluster
            .lock()
            .tables
            .iter()
            .map(|t| t.descriptor.clone())
            .collect())
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        self.cluster.ensure_running()?;
        Ok(self
            .cluster
            .lock()
            .tables
            .iter()
            .any(|t| t.descriptor.name() == table))
    }

    fn is_table_enabled(&self, table: &str) -> Result<bool> {
        self.cluster.update_table(table, |t| Ok(t.enabled))
    }

    fn enable_table(&self, table: &str) -> Result<()> {
        self.cluster.update_table(table, |t| {
            if t.enabled {
                return Err(anyhow!("table {} is not disabled", table));
            }
            t.enabled = true;
            Ok(())
        })
    }

    fn disable_table(&self, table: &str) -> Result<()> {
        self.cluster.update_table(table, |t| {
            if !t.enabled {
                return Err(anyhow!("table {} is not enabled", table));
            }
            t.enabled = false;
            Ok(())
        })
    }

    fn shutdown(&self) -> Result<()> {
        let mut state = self.cluster.lock();
        if state.shut_down {
            return Err(anyhow!("cluster is shut down"));
        }
        state.shut_down = true;
        state.master_running = false;
        debug!("memory cluster shut down");
        Ok(())
    }
}

impl ClusterConnector for MemoryCluster {
    type Admin = MemoryAdmin;

    fn connect_admin(&self, config: &Configuration) -> Result<MemoryAdmin, ConnectError> {
        let mut state = self.lock();
        state.connect_attempts += 1;
        state.last_configuration = Some(config.clone());

        if !state.master_running {
            return Err(ConnectError::MasterNotRunning(format!(
                "no master running at {}",
                config.get(MASTER_KEY).unwrap_or("<unset>")
            )));
        }
        debug!(master = config.get(MASTER_KEY), "memory admin handle created");

        Ok(MemoryAdmin {
            cluster: self.clone(),
        })
    }

    fn table_descriptor(&self, _config: &Configuration, table: &str) -> Result<TableDescriptor> {
        self.update_table(table, |t| Ok(t.descriptor.clone()))
    }

    fn version_info(&self) -> VersionInfo {
        self.lock().version.clone()
    }
}
