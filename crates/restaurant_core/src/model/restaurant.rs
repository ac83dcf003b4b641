//! Restaurant record.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned restaurant identifier.
pub type RestaurantId = i64;

/// Persisted restaurant row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub location: String,
    pub cuisine: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Fields required to create a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub location: String,
    pub cuisine: String,
}

impl NewRestaurant {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        cuisine: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            cuisine: cuisine.into(),
        }
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("restaurant", "name", &self.name)?;
        require_text("restaurant", "location", &self.location)?;
        require_text("restaurant", "cuisine", &self.cuisine)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NewRestaurant;
    use crate::model::ValidationError;

    #[test]
    fn validate_accepts_complete_payload() {
        NewRestaurant::new("The Great Restaurant", "123 Food St", "Italian")
            .validate()
            .unwrap();
    }

    #[test]
    fn validate_reports_first_blank_field() {
        let err = NewRestaurant::new("Somewhere Nice", "  ", "")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::BlankField {
                entity: "restaurant",
                field: "location",
            }
        );
    }

    #[test]
    fn deserialize_rejects_missing_required_field() {
        let result = serde_json::from_value::<NewRestaurant>(serde_json::json!({
            "name": "No Cuisine",
            "location": "Nowhere"
        }));
        assert!(result.is_err());
    }
}
