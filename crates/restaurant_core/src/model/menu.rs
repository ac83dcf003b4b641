//! Menu record.
//!
//! A menu belongs to exactly one restaurant through `restaurant_id`.

use super::restaurant::RestaurantId;
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned menu identifier.
pub type MenuId = i64;

/// Persisted menu row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: MenuId,
    pub name: String,
    pub price: f64,
    pub restaurant_id: RestaurantId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Fields required to create a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenu {
    pub name: String,
    pub price: f64,
    pub restaurant_id: RestaurantId,
}

impl NewMenu {
    pub fn new(name: impl Into<String>, price: f64, restaurant_id: RestaurantId) -> Self {
        Self {
            name: name.into(),
            price,
            restaurant_id,
        }
    }

    /// Checks that every required field is present and numeric.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("menu", "name", &self.name)?;
        if !self.price.is_finite() {
            return Err(ValidationError::NonFinitePrice(self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NewMenu;
    use crate::model::ValidationError;

    #[test]
    fn validate_rejects_blank_name() {
        let err = NewMenu::new("   ", 9.5, 1).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::BlankField {
                entity: "menu",
                field: "name",
            }
        );
    }

    #[test]
    fn validate_rejects_non_finite_price() {
        let err = NewMenu::new("Dinner", f64::INFINITY, 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinitePrice(_)));
        assert!(NewMenu::new("Dinner", f64::NAN, 1).validate().is_err());
    }

    #[test]
    fn payload_uses_camel_case_reference_field() {
        let json = serde_json::to_value(NewMenu::new("Lunch Menu", 15.99, 7)).unwrap();
        assert_eq!(json["restaurantId"], 7);
        assert_eq!(json["price"], 15.99);
    }

    #[test]
    fn deserialize_rejects_mistyped_price() {
        let result = serde_json::from_value::<NewMenu>(serde_json::json!({
            "name": "Lunch Menu",
            "price": "cheap",
            "restaurantId": 1
        }));
        assert!(result.is_err());
    }
}
