//! Ordered restaurant/menu scenarios against one shared database file.
//!
//! The schema is force-synced once up front and scenarios run in sequence,
//! so later steps see rows written by earlier ones.

use restaurant_core::{
    seed_menus_for, seed_restaurants, EntityRepository, Gateway, GatewayConfig, MenuFilter,
    NewMenu, NewRestaurant, RestaurantFilter, SyncOptions,
};

#[test]
fn restaurant_and_menu_models() {
    let dir = tempfile::tempdir().unwrap();
    let mut gateway = Gateway::initialize(GatewayConfig::file(dir.path().join("db.sqlite"))).unwrap();
    gateway.sync_schema(SyncOptions { force: true }).unwrap();

    can_create_a_restaurant(&gateway);
    can_create_a_menu(&gateway);
    can_find_restaurants(&gateway);
    can_find_menus(&gateway);
    can_delete_restaurants(&gateway);
    can_delete_menus(&gateway);
}

fn can_create_a_restaurant(gateway: &Gateway) {
    let restaurants = gateway.restaurants().unwrap();

    let restaurant = restaurants
        .create(&NewRestaurant::new(
            "The Great Restaurant",
            "123 Food St",
            "Italian",
        ))
        .unwrap();

    assert!(restaurant.id > 0);
    assert_eq!(restaurant.name, "The Great Restaurant");
    assert_eq!(restaurant.location, "123 Food St");
    assert_eq!(restaurant.cuisine, "Italian");
}

fn can_create_a_menu(gateway: &Gateway) {
    let restaurants = gateway.restaurants().unwrap();
    let menus = gateway.menus().unwrap();

    let restaurant = restaurants
        .create(&NewRestaurant::new(
            "The Tasty Diner",
            "456 Eatery Lane",
            "American",
        ))
        .unwrap();
    let menu = menus
        .create(&NewMenu::new("Lunch Menu", 15.99, restaurant.id))
        .unwrap();

    assert!(menu.id > 0);
    assert_eq!(menu.name, "Lunch Menu");
    assert_eq!(menu.price, 15.99);
    assert_eq!(menu.restaurant_id, restaurant.id);
}

fn can_find_restaurants(gateway: &Gateway) {
    let restaurants = gateway.restaurants().unwrap();
    let seeds = seed_restaurants().unwrap();

    restaurants.bulk_create(&seeds).unwrap();

    let found = restaurants.find_all(&RestaurantFilter::default()).unwrap();
    assert!(found.len() >= seeds.len());
    assert!(!found[0].name.is_empty());
}

fn can_find_menus(gateway: &Gateway) {
    let restaurants = gateway.restaurants().unwrap();
    let menus = gateway.menus().unwrap();

    let restaurant = restaurants
        .create(&NewRestaurant::new("The Diner", "789 Street Rd", "Mexican"))
        .unwrap();
    menus
        .bulk_create(&seed_menus_for(restaurant.id).unwrap())
        .unwrap();

    let found = menus
        .find_all(&MenuFilter::for_restaurant(restaurant.id))
        .unwrap();
    assert!(!found.is_empty());
    assert!(!found[0].name.is_empty());
    assert!(found.iter().all(|menu| menu.restaurant_id == restaurant.id));
}

fn can_delete_restaurants(gateway: &Gateway) {
    let restaurants = gateway.restaurants().unwrap();

    let restaurant = restaurants
        .create(&NewRestaurant::new("Delete Me Restaurant", "Somewhere", "Any"))
        .unwrap();

    assert_eq!(restaurants.destroy(&restaurant).unwrap(), 1);
    assert!(restaurants.find_by_id(restaurant.id).unwrap().is_none());
}

fn can_delete_menus(gateway: &Gateway) {
    let restaurants = gateway.restaurants().unwrap();
    let menus = gateway.menus().unwrap();

    let restaurant = restaurants
        .create(&NewRestaurant::new(
            "Menu Deletion Restaurant",
            "Another Place",
            "Italian",
        ))
        .unwrap();
    let menu = menus
        .create(&NewMenu::new("Special Menu", 29.99, restaurant.id))
        .unwrap();

    assert_eq!(menus.destroy(&menu).unwrap(), 1);
    assert!(menus.find_by_id(menu.id).unwrap().is_none());
}
