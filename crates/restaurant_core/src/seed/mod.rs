//! Fixed seed fixtures for bulk-insert scenarios.
//!
//! Fixtures are compiled in as JSON. Menu fixtures carry no owner; callers
//! bind one with [`MenuSeed::for_restaurant`] so the reference always points
//! at a restaurant that exists.

use crate::model::menu::NewMenu;
use crate::model::restaurant::{NewRestaurant, RestaurantId};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const RESTAURANTS_JSON: &str = include_str!("restaurants.json");
const MENUS_JSON: &str = include_str!("menus.json");

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug)]
pub struct SeedError {
    fixture: &'static str,
    source: serde_json::Error,
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to decode seed fixture `{}`: {}", self.fixture, self.source)
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Menu field-set without an owning restaurant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuSeed {
    pub name: String,
    pub price: f64,
}

impl MenuSeed {
    pub fn for_restaurant(&self, restaurant_id: RestaurantId) -> NewMenu {
        NewMenu::new(self.name.clone(), self.price, restaurant_id)
    }
}

/// Restaurant fixtures in file order.
pub fn seed_restaurants() -> SeedResult<Vec<NewRestaurant>> {
    decode("restaurants.json", RESTAURANTS_JSON)
}

/// Menu fixtures in file order.
pub fn seed_menus() -> SeedResult<Vec<MenuSeed>> {
    decode("menus.json", MENUS_JSON)
}

/// Menu fixtures bound to one restaurant.
pub fn seed_menus_for(restaurant_id: RestaurantId) -> SeedResult<Vec<NewMenu>> {
    Ok(seed_menus()?
        .iter()
        .map(|seed| seed.for_restaurant(restaurant_id))
        .collect())
}

fn decode<T: for<'de> Deserialize<'de>>(fixture: &'static str, raw: &str) -> SeedResult<T> {
    serde_json::from_str(raw).map_err(|source| SeedError { fixture, source })
}
