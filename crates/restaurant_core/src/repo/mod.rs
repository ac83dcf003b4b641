//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the uniform create/find/destroy contract shared by entities.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate payloads before any SQL mutation.
//! - Lookups report absence as `Ok(None)`, never as an error.
//! - Repositories are only built over a synchronized schema.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::restaurant::RestaurantId;
use crate::model::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod menu_repo;
pub mod restaurant_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// A menu referenced a restaurant that does not exist.
    UnknownRestaurant(RestaurantId),
    /// Restaurant deletion refused under the `Restrict` policy.
    RestaurantHasMenus {
        id: RestaurantId,
        menu_count: i64,
    },
    UninitializedSchema {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownRestaurant(id) => write!(f, "restaurant not found: {id}"),
            Self::RestaurantHasMenus { id, menu_count } => write!(
                f,
                "restaurant {id} still owns {menu_count} menu(s); delete policy is restrict"
            ),
            Self::UninitializedSchema {
                expected_version,
                actual_version,
            } => write!(
                f,
                "schema version {actual_version} does not match expected {expected_version}; sync the schema first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Uniform persistence contract for one entity kind.
pub trait EntityRepository {
    type Id: Copy;
    type Record;
    type NewRecord;
    type Filter: Default;

    /// Validates and inserts one row, returning it with its new identifier.
    fn create(&self, new: &Self::NewRecord) -> RepoResult<Self::Record>;

    /// Inserts every payload in order, all or nothing.
    fn bulk_create(&self, batch: &[Self::NewRecord]) -> RepoResult<Vec<Self::Record>>;

    /// Returns matching rows in identifier order.
    fn find_all(&self, filter: &Self::Filter) -> RepoResult<Vec<Self::Record>>;

    fn find_by_id(&self, id: Self::Id) -> RepoResult<Option<Self::Record>>;

    /// Deletes the row backing `record` and returns how many rows went away.
    fn destroy(&self, record: &Self::Record) -> RepoResult<usize>;
}

pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedSchema {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}
