//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically, optionally after dropping the
//!   managed tables.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - `MANAGED_TABLES` is ordered so dependents drop before their parents.

use crate::db::{DbError, DbResult};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Tables owned by this crate, children first.
pub const MANAGED_TABLES: &[&str] = &["menus", "restaurants"];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded on the connection.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(|source| DbError::Schema {
            step: "read_user_version",
            source,
        })
}

/// Brings the schema to [`latest_version`].
///
/// With `force`, every managed table is dropped and the version reset before
/// migrations run, so the result is an empty schema. Returns the number of
/// migrations applied.
pub fn apply_migrations(conn: &mut Connection, force: bool) -> DbResult<usize> {
    let latest = latest_version();
    let tx = conn.transaction().map_err(|source| DbError::Schema {
        step: "begin",
        source,
    })?;

    if force {
        drop_managed_tables(&tx)?;
    }

    let current = current_version(&tx)?;
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let mut applied = 0;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }

        tx.execute_batch(migration.sql)
            .map_err(|source| DbError::Schema {
                step: "apply_migration",
                source,
            })?;
        set_version(&tx, migration.version)?;
        applied += 1;
    }

    tx.commit().map_err(|source| DbError::Schema {
        step: "commit",
        source,
    })?;
    Ok(applied)
}

fn drop_managed_tables(tx: &Transaction<'_>) -> DbResult<()> {
    for table in MANAGED_TABLES {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))
            .map_err(|source| DbError::Schema {
                step: "drop_table",
                source,
            })?;
    }
    set_version(tx, 0)
}

fn set_version(tx: &Transaction<'_>, version: u32) -> DbResult<()> {
    tx.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|source| DbError::Schema {
            step: "write_user_version",
            source,
        })
}
