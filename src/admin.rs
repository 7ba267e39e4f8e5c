//! Administrative operations
//!
//! Each operation is a single delegation to the cluster admin handle. Most go
//! through the session guard; `table_exists`, `hbase_version`, `table_name` and
//! `get_all_columns` do not, and each documents what it does instead.

use crate::cluster::{ClusterAdmin, ClusterConnector, TableDescriptor};
use crate::error::{AdminError, AdminResult};
use crate::session::AdminSession;
use tracing::{info, warn};

/// Name of a table descriptor
pub fn table_name(descriptor: &TableDescriptor) -> &str {
    descriptor.name()
}

impl<C: ClusterConnector> AdminSession<C> {
    /// Names of all tables, in the order the cluster reports them
    pub fn list_tables(&self) -> AdminResult<Vec<String>> {
        self.guarded("list_tables", |admin| admin.list_table_names())
    }

    /// Descriptors of all tables, including their column families
    pub fn describe_tables(&self) -> AdminResult<Vec<TableDescriptor>> {
        self.guarded("describe_tables", |admin| admin.list_tables())
    }

    /// Check whether `table` exists
    ///
    /// Returns `Ok(false)` rather than `NotConnected` when there is no
    /// connection.
    pub fn table_exists(&self, table: &str) -> AdminResult<bool> {
        match self.state().admin() {
            Some(admin) => admin.table_exists(table).map_err(AdminError::Cluster),
            None => Ok(false),
        }
    }

    pub fn table_enabled(&self, table: &str) -> AdminResult<bool> {
        self.guarded("table_enabled", |admin| admin.is_table_enabled(table))
    }

    pub fn enable_table(&self, table: &str) -> AdminResult<()> {
        self.guarded("enable_table", |admin| admin.enable_table(table))?;
        info!(table, "table enabled");
        Ok(())
    }

    pub fn disable_table(&self, table: &str) -> AdminResult<()> {
        self.guarded("disable_table", |admin| admin.disable_table(table))?;
        info!(table, "table disabled");
        Ok(())
    }

    /// Shut down the whole cluster
    pub fn shutdown_cluster(&self) -> AdminResult<()> {
        self.guarded("shutdown_cluster", |admin| admin.shutdown())?;
        warn!(host = self.host(), "cluster shutdown requested");
        Ok(())
    }

    /// Client library version as `"{version}, r{revision}, {date}"`
    ///
    /// Works in every connection state.
    pub fn hbase_version(&self) -> String {
        self.connector().version_info().to_string()
    }

    /// Column-family names of `table`, in family-iteration order
    ///
    /// Opens the table with the current configuration. No admin handle is
    /// needed, so this also works after a connect that found the master down.
    pub fn get_all_columns(&self, table: &str) -> AdminResult<Vec<String>> {
        let configuration = self
            .configuration()
            .ok_or(AdminError::MissingConfiguration)?;
        let descriptor = self
            .connector()
            .table_descriptor(configuration, table)
            .map_err(AdminError::Cluster)?;
        Ok(descriptor.families().to_vec())
    }
}
