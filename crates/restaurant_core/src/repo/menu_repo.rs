//! Menu repository over the `menus` table.

use super::{ensure_table_ready, EntityRepository, RepoError, RepoResult};
use crate::db::Gateway;
use crate::model::menu::{Menu, MenuId, NewMenu};
use crate::model::restaurant::RestaurantId;
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use rusqlite::{Transaction, TransactionBehavior};

const MENU_SELECT_SQL: &str = "SELECT
    id,
    name,
    price,
    restaurantId,
    createdAt,
    updatedAt
FROM menus";

const MENU_COLUMNS: &[&str] = &[
    "id",
    "name",
    "price",
    "restaurantId",
    "createdAt",
    "updatedAt",
];

/// Query options for listing menus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Only menus owned by this restaurant.
    pub restaurant_id: Option<RestaurantId>,
}

impl MenuFilter {
    pub fn for_restaurant(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id: Some(restaurant_id),
        }
    }
}

/// SQLite-backed menu repository.
pub struct SqliteMenuRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMenuRepository<'conn> {
    pub fn try_new(gateway: &'conn Gateway) -> RepoResult<Self> {
        ensure_table_ready(gateway.connection(), "menus", MENU_COLUMNS)?;
        Ok(Self {
            conn: gateway.connection(),
        })
    }
}

impl EntityRepository for SqliteMenuRepository<'_> {
    type Id = MenuId;
    type Record = Menu;
    type NewRecord = NewMenu;
    type Filter = MenuFilter;

    fn create(&self, new: &NewMenu) -> RepoResult<Menu> {
        new.validate()?;
        insert_menu(self.conn, new)
    }

    fn bulk_create(&self, batch: &[NewMenu]) -> RepoResult<Vec<Menu>> {
        for new in batch {
            new.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut created = Vec::with_capacity(batch.len());
        for new in batch {
            created.push(insert_menu(&tx, new)?);
        }
        tx.commit()?;

        info!(
            "event=bulk_create module=repo status=ok entity=menu count={}",
            created.len()
        );
        Ok(created)
    }

    fn find_all(&self, filter: &MenuFilter) -> RepoResult<Vec<Menu>> {
        let mut sql = format!("{MENU_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(restaurant_id) = filter.restaurant_id {
            sql.push_str(" AND restaurantId = ?");
            bind_values.push(Value::Integer(restaurant_id));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut menus = Vec::new();
        while let Some(row) = rows.next()? {
            menus.push(parse_menu_row(row)?);
        }

        Ok(menus)
    }

    fn find_by_id(&self, id: MenuId) -> RepoResult<Option<Menu>> {
        load_menu(self.conn, id)
    }

    fn destroy(&self, record: &Menu) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM menus WHERE id = ?1;", [record.id])?;
        Ok(removed)
    }
}

fn insert_menu(conn: &Connection, new: &NewMenu) -> RepoResult<Menu> {
    ensure_restaurant_exists(conn, new.restaurant_id)?;

    conn.execute(
        "INSERT INTO menus (name, price, restaurantId) VALUES (?1, ?2, ?3);",
        params![new.name, new.price, new.restaurant_id],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        "event=menu_create module=repo status=ok id={id} restaurant_id={}",
        new.restaurant_id
    );

    load_menu(conn, id)?
        .ok_or_else(|| RepoError::InvalidData(format!("menu {id} vanished right after insert")))
}

fn ensure_restaurant_exists(conn: &Connection, restaurant_id: RestaurantId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = ?1);",
        [restaurant_id],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::UnknownRestaurant(restaurant_id))
    }
}

fn load_menu(conn: &Connection, id: MenuId) -> RepoResult<Option<Menu>> {
    let mut stmt = conn.prepare(&format!("{MENU_SELECT_SQL} WHERE id = ?1;"))?;
    let menu = stmt
        .query_row([id], |row| Ok(parse_menu_row(row)))
        .optional()?;
    menu.transpose()
}

fn parse_menu_row(row: &Row<'_>) -> RepoResult<Menu> {
    let id: MenuId = row.get("id")?;
    let price: f64 = row.get("price")?;
    if !price.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "invalid price `{price}` in menus.price for menu {id}"
        )));
    }

    Ok(Menu {
        id,
        name: row.get("name")?,
        price,
        restaurant_id: row.get("restaurantId")?,
        created_at: row.get("createdAt")?,
        updated_at: row.get("updatedAt")?,
    })
}
