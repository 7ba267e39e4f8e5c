//! Connection state of an admin session

use crate::cluster::{Configuration, QUORUM_KEY};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a session currently holds
///
/// `Configured` is the state a connect attempt leaves behind when the master
/// is not running: the configuration is kept so the same cluster can be
/// retried with [`crate::AdminSession::reconnect`], but there is no admin
/// handle and guarded operations report `NotConnected`.
#[derive(Debug)]
pub enum ConnectionState<A> {
    Disconnected,
    Configured {
        host: String,
        configuration: Configuration,
    },
    Connected {
        host: String,
        configuration: Configuration,
        admin: A,
        connected_at: DateTime<Utc>,
    },
}

impl<A> Default for ConnectionState<A> {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

impl<A> ConnectionState<A> {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn host(&self) -> Option<&str> {
        match self {
            ConnectionState::Disconnected => None,
            ConnectionState::Configured { host, .. } | ConnectionState::Connected { host, .. } => {
                Some(host.as_str())
            }
        }
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        match self {
            ConnectionState::Disconnected => None,
            ConnectionState::Configured { configuration, .. }
            | ConnectionState::Connected { configuration, .. } => Some(configuration),
        }
    }

    pub fn admin(&self) -> Option<&A> {
        match self {
            ConnectionState::Connected { admin, .. } => Some(admin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Configured { .. } => "configured",
            ConnectionState::Connected { .. } => "connected",
        }
    }

    /// Serializable snapshot of this state
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.name().to_string(),
            host: self.host().map(str::to_string),
            quorum: self
                .configuration()
                .and_then(|c| c.get(QUORUM_KEY))
                .map(str::to_string),
            connected_at: match self {
                ConnectionState::Connected { connected_at, .. } => Some(*connected_at),
                _ => None,
            },
        }
    }
}

/// Outcome of a connect attempt that reached the collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectStatus {
    /// An admin handle was obtained
    Connected,
    /// The master was not running; the configuration is retained
    MasterNotRunning { message: String },
}

impl ConnectStatus {
    /// True when both configuration and admin handle ended up set
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectStatus::Connected)
    }
}

/// Session status for display
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quorum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
}

impl SessionStatus {
    /// Field/value pairs for line-oriented output; absent values show as `-`
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        vec![
            ("state", self.state.clone()),
            ("host", or_dash(&self.host)),
            ("quorum", or_dash(&self.quorum)),
            (
                "connected_at",
                self.connected_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }
}
