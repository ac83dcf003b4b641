//! Restaurant repository over the `restaurants` table.
//!
//! # Invariants
//! - `destroy` honors the gateway's `RestaurantDeletePolicy`.
//! - Bulk inserts run in one immediate transaction.

use super::{ensure_table_ready, EntityRepository, RepoError, RepoResult};
use crate::db::{Gateway, RestaurantDeletePolicy};
use crate::model::restaurant::{NewRestaurant, Restaurant, RestaurantId};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use rusqlite::{Transaction, TransactionBehavior};

const RESTAURANT_SELECT_SQL: &str = "SELECT
    id,
    name,
    location,
    cuisine,
    createdAt,
    updatedAt
FROM restaurants";

const RESTAURANT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "location",
    "cuisine",
    "createdAt",
    "updatedAt",
];

/// Query options for listing restaurants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    /// Exact cuisine match.
    pub cuisine: Option<String>,
}

/// SQLite-backed restaurant repository.
pub struct SqliteRestaurantRepository<'conn> {
    conn: &'conn Connection,
    delete_policy: RestaurantDeletePolicy,
}

impl<'conn> SqliteRestaurantRepository<'conn> {
    pub fn try_new(gateway: &'conn Gateway) -> RepoResult<Self> {
        ensure_table_ready(gateway.connection(), "restaurants", RESTAURANT_COLUMNS)?;
        Ok(Self {
            conn: gateway.connection(),
            delete_policy: gateway.config().on_restaurant_delete,
        })
    }

    pub fn delete_policy(&self) -> RestaurantDeletePolicy {
        self.delete_policy
    }
}

impl EntityRepository for SqliteRestaurantRepository<'_> {
    type Id = RestaurantId;
    type Record = Restaurant;
    type NewRecord = NewRestaurant;
    type Filter = RestaurantFilter;

    fn create(&self, new: &NewRestaurant) -> RepoResult<Restaurant> {
        new.validate()?;
        insert_restaurant(self.conn, new)
    }

    fn bulk_create(&self, batch: &[NewRestaurant]) -> RepoResult<Vec<Restaurant>> {
        for new in batch {
            new.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut created = Vec::with_capacity(batch.len());
        for new in batch {
            created.push(insert_restaurant(&tx, new)?);
        }
        tx.commit()?;

        info!(
            "event=bulk_create module=repo status=ok entity=restaurant count={}",
            created.len()
        );
        Ok(created)
    }

    fn find_all(&self, filter: &RestaurantFilter) -> RepoResult<Vec<Restaurant>> {
        let mut sql = format!("{RESTAURANT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(cuisine) = &filter.cuisine {
            sql.push_str(" AND cuisine = ?");
            bind_values.push(Value::Text(cuisine.clone()));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut restaurants = Vec::new();
        while let Some(row) = rows.next()? {
            restaurants.push(parse_restaurant_row(row)?);
        }

        Ok(restaurants)
    }

    fn find_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        load_restaurant(self.conn, id)
    }

    fn destroy(&self, record: &Restaurant) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let menu_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM menus WHERE restaurantId = ?1;",
            [record.id],
            |row| row.get(0),
        )?;

        if menu_count > 0 {
            match self.delete_policy {
                RestaurantDeletePolicy::Restrict => {
                    return Err(RepoError::RestaurantHasMenus {
                        id: record.id,
                        menu_count,
                    });
                }
                RestaurantDeletePolicy::Cascade => {
                    tx.execute("DELETE FROM menus WHERE restaurantId = ?1;", [record.id])?;
                }
            }
        }

        let removed = tx.execute("DELETE FROM restaurants WHERE id = ?1;", [record.id])?;
        tx.commit()?;

        info!(
            "event=restaurant_destroy module=repo status=ok removed={} cascaded_menus={}",
            removed,
            if removed > 0 { menu_count } else { 0 }
        );
        Ok(removed)
    }
}

fn insert_restaurant(conn: &Connection, new: &NewRestaurant) -> RepoResult<Restaurant> {
    conn.execute(
        "INSERT INTO restaurants (name, location, cuisine) VALUES (?1, ?2, ?3);",
        params![new.name, new.location, new.cuisine],
    )?;
    let id = conn.last_insert_rowid();
    debug!("event=restaurant_create module=repo status=ok id={id}");

    load_restaurant(conn, id)?.ok_or_else(|| {
        RepoError::InvalidData(format!("restaurant {id} vanished right after insert"))
    })
}

fn load_restaurant(conn: &Connection, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
    let mut stmt = conn.prepare(&format!("{RESTAURANT_SELECT_SQL} WHERE id = ?1;"))?;
    let restaurant = stmt
        .query_row([id], |row| Ok(parse_restaurant_row(row)))
        .optional()?;
    restaurant.transpose()
}

fn parse_restaurant_row(row: &Row<'_>) -> RepoResult<Restaurant> {
    Ok(Restaurant {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
        cuisine: row.get("cuisine")?,
        created_at: row.get("createdAt")?,
        updated_at: row.get("updatedAt")?,
    })
}
