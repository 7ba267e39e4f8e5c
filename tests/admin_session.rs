//! Admin session integration tests
//!
//! Drives a full session against the in-memory cluster:
//! - guard behavior before, during and after a connection
//! - reconnect and master-down handling
//! - version formatting in every state
//! - column family lookup

use hbadmin::cluster::{MemoryCluster, QUORUM_KEY};
use hbadmin::{AdminError, AdminSession, ConnectStatus, VersionInfo};

fn cluster() -> MemoryCluster {
    MemoryCluster::new()
        .with_table("users", &["info", "meta"])
        .with_table("events", &["d", "raw"])
        .with_version(VersionInfo {
            version: "2.5.8".to_string(),
            revision: "3d4e5f".to_string(),
            date: "Tue Apr 2 2024".to_string(),
        })
}

fn assert_guarded_ops_not_connected(session: &AdminSession<MemoryCluster>) {
    assert!(session.list_tables().unwrap_err().is_not_connected());
    assert!(session.describe_tables().unwrap_err().is_not_connected());
    assert!(session.table_enabled("users").unwrap_err().is_not_connected());
    assert!(session.enable_table("users").unwrap_err().is_not_connected());
    assert!(session.disable_table("users").unwrap_err().is_not_connected());
    assert!(session.shutdown_cluster().unwrap_err().is_not_connected());
}

fn assert_version_format(version: &str) {
    let parts: Vec<&str> = version.split(", ").collect();
    assert_eq!(parts.len(), 3, "unexpected version string: {}", version);
    assert!(parts[1].starts_with('r'));
}

// =============================================================================
// Connection lifecycle
// =============================================================================

#[test]
fn test_never_connected_session() {
    let mut session = AdminSession::new(cluster());

    assert!(!session.connected());
    assert_guarded_ops_not_connected(&session);
    assert!(session.disconnect().unwrap_err().is_not_connected());
    assert!(!session.table_exists("users").unwrap());
}

#[test]
fn test_connect_then_disconnect() {
    let mut session = AdminSession::new(cluster());

    assert_eq!(
        session.connect("master1", "zk1,zk2").unwrap(),
        ConnectStatus::Connected
    );
    assert!(session.connected());
    assert_eq!(session.list_tables().unwrap(), vec!["users", "events"]);

    session.disconnect().unwrap();
    assert!(!session.connected());
    assert_guarded_ops_not_connected(&session);
}

#[test]
fn test_connect_twice_replaces_connection() {
    let cluster = cluster();
    let mut session = AdminSession::new(cluster.clone());

    session.connect("master1", "zk1").unwrap();
    session.connect("master2", "zk2,zk3").unwrap();

    assert!(session.connected());
    assert_eq!(session.host(), Some("master2"));
    assert_eq!(
        session.configuration().unwrap().get(QUORUM_KEY),
        Some("zk2,zk3")
    );
    assert_eq!(cluster.connect_attempts(), 2);
    assert_eq!(session.list_tables().unwrap().len(), 2);
}

#[test]
fn test_master_not_running() {
    let cluster = cluster().with_master_down();
    let mut session = AdminSession::new(cluster.clone());

    let status = session.connect("master1", "zk1").unwrap();
    assert!(!status.is_connected());
    assert!(!session.connected());
    assert!(session.configuration().is_some());
    assert_guarded_ops_not_connected(&session);

    // master comes back, the retained configuration is enough to retry
    cluster.set_master_running(true);
    assert!(session.reconnect().unwrap().is_connected());
    assert!(session.table_enabled("users").unwrap());
}

// =============================================================================
// Operations
// =============================================================================

#[test]
fn test_version_in_every_state() {
    let mut session = AdminSession::new(cluster());
    assert_eq!(session.hbase_version(), "2.5.8, r3d4e5f, Tue Apr 2 2024");

    session.connect("master1", "zk1").unwrap();
    assert_version_format(&session.hbase_version());

    session.disconnect().unwrap();
    assert_version_format(&session.hbase_version());

    let default = AdminSession::new(MemoryCluster::new());
    assert_version_format(&default.hbase_version());
}

#[test]
fn test_get_all_columns_order() {
    let mut session = AdminSession::new(cluster());
    session.connect("master1", "zk1,zk2").unwrap();

    assert_eq!(session.get_all_columns("users").unwrap(), vec!["info", "meta"]);
    assert_eq!(session.get_all_columns("events").unwrap(), vec!["d", "raw"]);
}

#[test]
fn test_table_state_changes() {
    let mut session = AdminSession::new(cluster());
    session.connect("master1", "zk1").unwrap();

    session.disable_table("events").unwrap();
    assert!(!session.table_enabled("events").unwrap());
    assert!(session.table_enabled("users").unwrap());

    let err = session.enable_table("users").unwrap_err();
    assert!(matches!(err, AdminError::Cluster(_)));

    session.enable_table("events").unwrap();
    assert!(session.table_enabled("events").unwrap());
}

#[test]
fn test_shutdown_cluster() {
    let cluster = cluster();
    let mut session = AdminSession::new(cluster.clone());
    session.connect("master1", "zk1").unwrap();

    session.shutdown_cluster().unwrap();
    assert!(cluster.is_shut_down());

    // the collaborator now rejects both calls and new connections
    assert!(matches!(session.list_tables(), Err(AdminError::Cluster(_))));
    assert!(!session.reconnect().unwrap().is_connected());
}
