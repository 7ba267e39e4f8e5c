//! Error types for administrative operations
//!
//! Only two failures are handled locally by this crate: operations issued
//! without a connection ([`AdminError::NotConnected`]) and connection attempts
//! against a cluster whose master is not running (reported through
//! [`crate::session::ConnectStatus`]). Everything else the collaborator raises
//! is carried unchanged inside [`AdminError::Cluster`].

/// Result alias used by the admin facade
pub type AdminResult<T> = std::result::Result<T, AdminError>;

/// Errors returned by [`crate::AdminSession`] operations
#[derive(Debug)]
pub enum AdminError {
    /// A guarded operation was invoked while no admin handle is held
    NotConnected,
    /// An operation needed the cluster configuration but none is set
    MissingConfiguration,
    /// Failure raised by the cluster collaborator, propagated as-is
    Cluster(anyhow::Error),
}

impl AdminError {
    /// Check if this is the not-connected result
    pub fn is_not_connected(&self) -> bool {
        matches!(self, AdminError::NotConnected)
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminError::NotConnected => {
                write!(f, "Not connected to a cluster, connect to a master first")
            }
            AdminError::MissingConfiguration => {
                write!(f, "No cluster configuration set, connect to a master first")
            }
            AdminError::Cluster(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdminError::Cluster(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        AdminError::Cluster(err)
    }
}
