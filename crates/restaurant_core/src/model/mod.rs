//! Record shapes for restaurants and menus.
//!
//! # Responsibility
//! - Define persisted records (`Restaurant`, `Menu`) and their creation
//!   payloads (`NewRestaurant`, `NewMenu`).
//! - Enforce required-field checks before anything reaches storage.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never change afterwards.
//! - Payloads carry no identifier; records always carry one.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod menu;
pub mod restaurant;

/// Required-field violation detected before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// Price is NaN or infinite.
    NonFinitePrice(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} is required and cannot be blank")
            }
            Self::NonFinitePrice(value) => {
                write!(f, "menu.price must be a finite number, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}
