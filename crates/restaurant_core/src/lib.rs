//! Restaurant and menu persistence over an embedded SQLite file.
//! This crate owns the record shapes, the storage gateway and the CRUD contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;

pub use db::{
    default_storage_path, DbError, DbResult, Gateway, GatewayConfig, RestaurantDeletePolicy,
    Storage, SyncOptions,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::menu::{Menu, MenuId, NewMenu};
pub use model::restaurant::{NewRestaurant, Restaurant, RestaurantId};
pub use model::ValidationError;
pub use repo::menu_repo::{MenuFilter, SqliteMenuRepository};
pub use repo::restaurant_repo::{RestaurantFilter, SqliteRestaurantRepository};
pub use repo::{EntityRepository, RepoError, RepoResult};
pub use seed::{seed_menus, seed_menus_for, seed_restaurants, MenuSeed, SeedError, SeedResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
