//! SQLite storage gateway and schema synchronization.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection used by repositories.
//! - Create, upgrade or force-recreate the `restaurants`/`menus` schema.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Repositories refuse connections whose schema is not synchronized.
//! - Gateways are explicit handles; there is no process-wide connection.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod config;
mod gateway;
pub mod migrations;

pub use config::{default_storage_path, GatewayConfig, RestaurantDeletePolicy, Storage};
pub use gateway::{Gateway, SyncOptions};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Storage path rejected before SQLite was asked to open it.
    InvalidStoragePath {
        path: PathBuf,
        reason: &'static str,
    },
    /// SQLite could not open, create or configure the storage target.
    Connection {
        target: String,
        source: rusqlite::Error,
    },
    /// A schema synchronization step failed.
    Schema {
        step: &'static str,
        source: rusqlite::Error,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Whether this error means the storage target could not be opened.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidStoragePath { .. } | Self::Connection { .. }
        )
    }

    /// Whether this error came from schema synchronization.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Schema { .. } | Self::UnsupportedSchemaVersion { .. }
        )
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStoragePath { path, reason } => {
                write!(f, "invalid storage path `{}`: {reason}", path.display())
            }
            Self::Connection { target, source } => {
                write!(f, "failed to open database `{target}`: {source}")
            }
            Self::Schema { step, source } => write!(f, "schema sync failed at {step}: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidStoragePath { .. } => None,
            Self::Connection { source, .. } => Some(source),
            Self::Schema { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
