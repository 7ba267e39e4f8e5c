#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! hbadmin - administrative client for HBase-style clusters
//!
//! hbadmin opens an administrative connection to a cluster master and exposes
//! the handful of operations an operator needs: listing tables, checking,
//! enabling and disabling them, reading column families, reporting the client
//! version and shutting the cluster down. It can be used as both a
//! command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `rest` | REST gateway collaborator | `ureq` |
//! | `cli` | CLI binary with table output (default) | `rest` + `clap`, `tabled`, `tracing-subscriber` |
//!
//! # Architecture
//!
//! - **[`cluster`]**: the collaborator seam ([`ClusterConnector`],
//!   [`ClusterAdmin`]), client [`Configuration`] and the bundled
//!   implementations
//! - **[`session`]**: [`AdminSession`], the connection state and its guard
//! - **[`admin`]**: the administrative operations on [`AdminSession`]
//! - **[`config`]**: configuration file and environment loading
//! - **[`logging`]**: tracing setup and external logger verbosity
//! - **[`output`]**: output formats shared by the CLI commands
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hbadmin::{AdminSession, RestGateway};
//!
//! let mut session = AdminSession::new(RestGateway::new());
//! if session.connect("master1", "zk1,zk2,zk3")?.is_connected() {
//!     for table in session.list_tables()? {
//!         println!("{}: {:?}", table, session.get_all_columns(&table)?);
//!     }
//! }
//! println!("{}", session.hbase_version());
//! session.disconnect()?;
//! ```

pub mod admin;
pub mod cluster;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;

pub use admin::table_name;
pub use cluster::{
    ClusterAdmin, ClusterConnector, Configuration, ConnectError, MemoryCluster, TableDescriptor,
    VersionInfo,
};
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use output::OutputFormat;
pub use session::{AdminSession, ConnectStatus, ConnectionState, SessionStatus};

#[cfg(feature = "rest")]
pub use cluster::RestGateway;
