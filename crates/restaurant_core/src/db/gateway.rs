//! Connection bootstrap and schema sync entry points.
//!
//! # Responsibility
//! - Validate the configured storage target and open it.
//! - Configure connection pragmas required by repositories.
//! - Synchronize the schema on request.
//!
//! # Invariants
//! - Returned gateways have `foreign_keys=ON`.
//! - Opening never touches schema or data; only `sync_schema` does.

use super::migrations::{apply_migrations, current_version, latest_version};
use super::{DbError, DbResult, GatewayConfig, Storage};
use crate::repo::menu_repo::SqliteMenuRepository;
use crate::repo::restaurant_repo::SqliteRestaurantRepository;
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Options for [`Gateway::sync_schema`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Drop and recreate all managed tables. Destroys data.
    pub force: bool,
}

/// The single configured connection mediating all storage access.
pub struct Gateway {
    conn: Connection,
    config: GatewayConfig,
}

impl Gateway {
    /// Opens the configured storage target.
    ///
    /// Opening an existing file is non-destructive, so calling this again
    /// for the same path yields another handle over the same data.
    ///
    /// # Errors
    /// - `InvalidStoragePath` when the path is empty, its parent directory is
    ///   missing, or the file is read-only.
    /// - `Connection` when SQLite cannot open or configure the target.
    pub fn initialize(config: GatewayConfig) -> DbResult<Self> {
        let started_at = Instant::now();
        let mode = storage_mode(&config.storage);
        info!("event=gateway_init module=db status=start mode={mode}");

        match open_connection(&config) {
            Ok(conn) => {
                info!(
                    "event=gateway_init module=db status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn, config })
            }
            Err(err) => {
                error!(
                    "event=gateway_init module=db status=error mode={mode} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Creates the tables for every declared entity.
    ///
    /// With `force`, existing tables are dropped first. Only test setup
    /// should pass `force: true`.
    pub fn sync_schema(&mut self, options: SyncOptions) -> DbResult<()> {
        let started_at = Instant::now();
        info!(
            "event=schema_sync module=db status=start force={}",
            options.force
        );

        match apply_migrations(&mut self.conn, options.force) {
            Ok(applied) => {
                info!(
                    "event=schema_sync module=db status=ok force={} applied={} version={} duration_ms={}",
                    options.force,
                    applied,
                    latest_version(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=schema_sync module=db status=error force={} duration_ms={} error={}",
                    options.force,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Schema version currently recorded in storage.
    pub fn schema_version(&self) -> DbResult<u32> {
        current_version(&self.conn)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Restaurant repository bound to this gateway.
    pub fn restaurants(&self) -> RepoResult<SqliteRestaurantRepository<'_>> {
        SqliteRestaurantRepository::try_new(self)
    }

    /// Menu repository bound to this gateway.
    pub fn menus(&self) -> RepoResult<SqliteMenuRepository<'_>> {
        SqliteMenuRepository::try_new(self)
    }
}

fn open_connection(config: &GatewayConfig) -> DbResult<Connection> {
    let (conn, target) = match &config.storage {
        Storage::File { path } => {
            validate_storage_path(path)?;
            let target = path.display().to_string();
            let conn = Connection::open(path).map_err(|source| DbError::Connection {
                target: target.clone(),
                source,
            })?;
            (conn, target)
        }
        Storage::Memory => {
            let target = ":memory:".to_string();
            let conn = Connection::open_in_memory().map_err(|source| DbError::Connection {
                target: target.clone(),
                source,
            })?;
            (conn, target)
        }
    };

    configure_connection(&conn, config)
        .map_err(|source| DbError::Connection { target, source })?;
    Ok(conn)
}

fn configure_connection(conn: &Connection, config: &GatewayConfig) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    // Reads the file header so a non-database file fails here.
    conn.query_row("PRAGMA schema_version;", [], |_| Ok(()))?;
    Ok(())
}

fn validate_storage_path(path: &Path) -> DbResult<()> {
    let invalid = |reason: &'static str| DbError::InvalidStoragePath {
        path: path.to_path_buf(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("path is empty"));
    }
    if path.is_dir() {
        return Err(invalid("path is a directory"));
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(invalid("parent directory does not exist"));
    }

    if let Ok(metadata) = std::fs::metadata(path) {
        if metadata.permissions().readonly() {
            return Err(invalid("file is read-only"));
        }
    }

    Ok(())
}

fn storage_mode(storage: &Storage) -> &'static str {
    match storage {
        Storage::File { .. } => "file",
        Storage::Memory => "memory",
    }
}
