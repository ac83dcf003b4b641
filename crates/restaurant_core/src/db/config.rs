//! Gateway configuration.
//!
//! Defaults point at `db.sqlite` next to the crate manifest and keep
//! restaurant deletion restricted while menus still reference it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "db.sqlite";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Returns the fixed storage location relative to the application root.
pub fn default_storage_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_DB_FILE_NAME)
}

/// Where the gateway keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Storage {
    /// Embedded database file, created on first open.
    File { path: PathBuf },
    /// Private in-memory database that disappears with the gateway.
    Memory,
}

impl Default for Storage {
    fn default() -> Self {
        Self::File {
            path: default_storage_path(),
        }
    }
}

/// What destroying a restaurant does to the menus it owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantDeletePolicy {
    /// Refuse to delete a restaurant that still owns menus.
    ///
    /// Under this policy `destroy` on an existing restaurant only returns `1`
    /// when it owns no menus; otherwise it fails with
    /// `RepoError::RestaurantHasMenus` and removes nothing.
    #[default]
    Restrict,
    /// Delete owned menus together with the restaurant.
    Cascade,
}

/// Configuration consumed by [`crate::db::Gateway::initialize`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub storage: Storage,
    /// Milliseconds SQLite waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    pub on_restaurant_delete: RestaurantDeletePolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            storage: Storage::default(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            on_restaurant_delete: RestaurantDeletePolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// File-backed configuration with default settings.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: Storage::File { path: path.into() },
            ..Self::default()
        }
    }

    /// In-memory configuration with default settings.
    pub fn in_memory() -> Self {
        Self {
            storage: Storage::Memory,
            ..Self::default()
        }
    }

    pub fn with_delete_policy(mut self, policy: RestaurantDeletePolicy) -> Self {
        self.on_restaurant_delete = policy;
        self
    }
}
