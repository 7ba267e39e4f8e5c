//! Admin session: connection lifecycle and guard
//!
//! An [`AdminSession`] owns everything a connection needs: the connector used
//! to reach the cluster, a base configuration, and the current
//! [`ConnectionState`]. Connecting and disconnecting take `&mut self`, guarded
//! operations take `&self`, so a session can never be disconnected between a
//! guard check and the operation it protects.
//!
//! # Example
//!
//! ```rust
//! use hbadmin::cluster::MemoryCluster;
//! use hbadmin::AdminSession;
//!
//! let cluster = MemoryCluster::new().with_table("users", &["info", "meta"]);
//! let mut session = AdminSession::new(cluster);
//!
//! assert!(session.list_tables().unwrap_err().is_not_connected());
//!
//! let status = session.connect("master1", "zk1,zk2").unwrap();
//! assert!(status.is_connected());
//! assert_eq!(session.list_tables().unwrap(), vec!["users".to_string()]);
//! ```

mod state;

pub use state::{ConnectStatus, ConnectionState, SessionStatus};

use crate::cluster::{
    ClusterConnector, Configuration, ConnectError, CLIENT_RETRIES_KEY, IPC_CONNECT_RETRIES_KEY,
    MASTER_KEY, QUORUM_KEY,
};
use crate::error::{AdminError, AdminResult};
use crate::logging::{apply_external_verbosity, ExternalVerbosity};
use chrono::Utc;
use tracing::{error, info, warn};

/// Retries the client library performs per operation
pub const CLIENT_RETRIES: i64 = 7;
/// Retries the client library performs when opening an IPC connection
pub const IPC_CONNECT_RETRIES: i64 = 3;

/// Administrative connection to one cluster
pub struct AdminSession<C: ClusterConnector> {
    connector: C,
    base: Configuration,
    state: ConnectionState<C::Admin>,
    external_verbosity: Option<ExternalVerbosity>,
}

impl<C: ClusterConnector> AdminSession<C> {
    /// Create a disconnected session
    pub fn new(connector: C) -> Self {
        Self::with_base_configuration(connector, Configuration::new())
    }

    /// Create a disconnected session whose connections start from `base`
    ///
    /// Entries set by [`AdminSession::connect`] take precedence over `base`.
    pub fn with_base_configuration(connector: C, base: Configuration) -> Self {
        Self {
            connector,
            base,
            state: ConnectionState::Disconnected,
            external_verbosity: None,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn state(&self) -> &ConnectionState<C::Admin> {
        &self.state
    }

    /// Current cluster configuration, present after any connect attempt
    pub fn configuration(&self) -> Option<&Configuration> {
        self.state.configuration()
    }

    pub fn host(&self) -> Option<&str> {
        self.state.host()
    }

    /// True iff both a configuration and an admin handle are held
    pub fn connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    /// External logger verbosity applied by the most recent connect attempt
    pub fn external_verbosity(&self) -> Option<ExternalVerbosity> {
        self.external_verbosity
    }

    /// Connect to the master at `host` using the coordination `quorum`
    ///
    /// An existing connection is closed first. If the master is not running
    /// the configuration is kept (see [`ConnectionState::Configured`]) and
    /// [`ConnectStatus::MasterNotRunning`] is returned. Any other collaborator
    /// failure leaves the session disconnected and is returned as an error.
    pub fn connect(&mut self, host: &str, quorum: &str) -> AdminResult<ConnectStatus> {
        if self.connected() {
            self.disconnect()?;
        }

        let configuration = self.build_configuration(host, quorum);
        let verbosity = ExternalVerbosity::from_env();
        apply_external_verbosity(verbosity);
        self.external_verbosity = Some(verbosity);

        info!(host, quorum, "connecting to cluster master");
        match self.connector.connect_admin(&configuration) {
            Ok(admin) => {
                self.state = ConnectionState::Connected {
                    host: host.to_string(),
                    configuration,
                    admin,
                    connected_at: Utc::now(),
                };
                Ok(ConnectStatus::Connected)
            }
            Err(ConnectError::MasterNotRunning(message)) => {
                error!(host, "master not running: {}", message);
                self.state = ConnectionState::Configured {
                    host: host.to_string(),
                    configuration,
                };
                Ok(ConnectStatus::MasterNotRunning { message })
            }
            Err(ConnectError::Other(e)) => {
                self.state = ConnectionState::Disconnected;
                Err(AdminError::Cluster(e))
            }
        }
    }

    /// Connect again to the host and quorum of the retained configuration
    pub fn reconnect(&mut self) -> AdminResult<ConnectStatus> {
        let (host, quorum) = match (self.state.host(), self.state.configuration()) {
            (Some(host), Some(configuration)) => (
                host.to_string(),
                configuration.get(QUORUM_KEY).unwrap_or_default().to_string(),
            ),
            _ => {
                warn!("reconnect: no previous connection to retry");
                return Err(AdminError::NotConnected);
            }
        };
        self.connect(&host, &quorum)
    }

    /// Drop the admin handle, configuration and host
    pub fn disconnect(&mut self) -> AdminResult<()> {
        if !self.connected() {
            warn!("disconnect: not connected to a cluster");
            return Err(AdminError::NotConnected);
        }
        if let Some(host) = self.state.host() {
            info!(host, "disconnecting from cluster master");
        }
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    /// Run `op` against the admin handle, or return `NotConnected`
    ///
    /// Collaborator errors raised by `op` are returned unchanged in
    /// [`AdminError::Cluster`].
    pub fn guarded<T, F>(&self, operation: &str, op: F) -> AdminResult<T>
    where
        F: FnOnce(&C::Admin) -> anyhow::Result<T>,
    {
        match self.state.admin() {
            Some(admin) => op(admin).map_err(AdminError::Cluster),
            None => {
                warn!("{}: not connected to a cluster, connect to a master first", operation);
                Err(AdminError::NotConnected)
            }
        }
    }

    fn build_configuration(&self, host: &str, quorum: &str) -> Configuration {
        let mut configuration = self.base.clone();
        configuration
            .set(MASTER_KEY, host)
            .set(QUORUM_KEY, quorum)
            .set_int(CLIENT_RETRIES_KEY, CLIENT_RETRIES)
            .set_int(IPC_CONNECT_RETRIES_KEY, IPC_CONNECT_RETRIES);
        configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::MemoryCluster;
    use crate::logging::DEBUG_ENV;

    #[test]
    fn test_new_session_is_disconnected() {
        let session = AdminSession::new(MemoryCluster::new());
        assert!(!session.connected());
        assert!(session.configuration().is_none());
        assert!(session.host().is_none());
    }

    #[test]
    fn test_connect_sets_configuration() {
        let cluster = MemoryCluster::new();
        let mut session = AdminSession::new(cluster.clone());

        let status = session.connect("master1", "zk1,zk2").unwrap();
        assert_eq!(status, ConnectStatus::Connected);
        assert!(session.connected());
        assert_eq!(session.host(), Some("master1"));

        let conf = cluster.last_configuration().unwrap();
        assert_eq!(conf.get(MASTER_KEY), Some("master1"));
        assert_eq!(conf.get(QUORUM_KEY), Some("zk1,zk2"));
        assert_eq!(conf.get_int(CLIENT_RETRIES_KEY), Some(7));
        assert_eq!(conf.get_int(IPC_CONNECT_RETRIES_KEY), Some(3));
    }

    #[test]
    fn test_base_configuration_is_layered() {
        let cluster = MemoryCluster::new();
        let mut base = Configuration::new();
        base.set("hbase.rest.url", "http://gw:8080")
            .set(MASTER_KEY, "ignored");

        let mut session = AdminSession::with_base_configuration(cluster.clone(), base);
        session.connect("master1", "zk1").unwrap();

        let conf = cluster.last_configuration().unwrap();
        assert_eq!(conf.get("hbase.rest.url"), Some("http://gw:8080"));
        assert_eq!(conf.get(MASTER_KEY), Some("master1"));
    }

    #[test]
    fn test_disconnect() {
        let mut session = AdminSession::new(MemoryCluster::new());
        session.connect("master1", "zk1").unwrap();

        session.disconnect().unwrap();
        assert!(!session.connected());
        assert!(session.configuration().is_none());
        assert!(session.host().is_none());
        assert!(session.disconnect().unwrap_err().is_not_connected());
    }

    #[test]
    fn test_master_not_running_keeps_configuration() {
        let cluster = MemoryCluster::new().with_master_down();
        let mut session = AdminSession::new(cluster);

        let status = session.connect("master1", "zk1").unwrap();
        assert!(!status.is_connected());
        assert!(matches!(status, ConnectStatus::MasterNotRunning { .. }));
        assert!(!session.connected());
        assert!(session.configuration().is_some());
        assert_eq!(session.status().state, "configured");

        // the guard requires an admin handle, so disconnect is refused too
        assert!(session.disconnect().unwrap_err().is_not_connected());
    }

    #[test]
    fn test_reconnect_after_master_restart() {
        let cluster = MemoryCluster::new().with_master_down();
        let mut session = AdminSession::new(cluster.clone());

        session.connect("master1", "zk1,zk2").unwrap();
        assert!(!session.connected());

        cluster.set_master_running(true);
        assert!(session.reconnect().unwrap().is_connected());
        assert_eq!(session.host(), Some("master1"));
        assert_eq!(
            cluster.last_configuration().unwrap().get(QUORUM_KEY),
            Some("zk1,zk2")
        );
        assert_eq!(cluster.connect_attempts(), 2);
    }

    #[test]
    fn test_reconnect_without_previous_connection() {
        let mut session = AdminSession::new(MemoryCluster::new());
        assert!(session.reconnect().unwrap_err().is_not_connected());
    }

    // the only test that touches the debug flag
    #[test]
    fn test_connect_applies_debug_flag() {
        let mut session = AdminSession::new(MemoryCluster::new());
        assert_eq!(session.external_verbosity(), None);

        std::env::set_var(DEBUG_ENV, "true");
        session.connect("master1", "zk1").unwrap();
        assert_eq!(session.external_verbosity(), Some(ExternalVerbosity::Debug));

        std::env::set_var(DEBUG_ENV, "yes");
        session.connect("master1", "zk1").unwrap();
        assert_eq!(session.external_verbosity(), Some(ExternalVerbosity::Error));

        std::env::remove_var(DEBUG_ENV);
        let mut down = AdminSession::new(MemoryCluster::new().with_master_down());
        down.connect("master1", "zk1").unwrap();
        assert_eq!(down.external_verbosity(), Some(ExternalVerbosity::Error));
    }

    #[test]
    fn test_guard() {
        let mut session = AdminSession::new(MemoryCluster::new());
        let res = session.guarded("noop", |_| Ok(1));
        assert!(res.unwrap_err().is_not_connected());

        session.connect("master1", "zk1").unwrap();
        assert_eq!(session.guarded("noop", |_| Ok(1)).unwrap(), 1);

        let err = session
            .guarded::<(), _>("fail", |_| Err(anyhow::anyhow!("region server down")))
            .unwrap_err();
        assert!(matches!(err, AdminError::Cluster(_)));
        assert_eq!(err.to_string(), "region server down");
    }
}
