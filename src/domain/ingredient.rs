//! Ingredient catalog entry

use super::ids::IngredientId;
use super::unit::Unit;
use serde::{Deserialize, Serialize};

/// A shared catalog entry stored under `INGREDIENTS/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,

    pub name: String,

    /// Default quantity suggested when the ingredient is added to a recipe
    #[serde(default)]
    pub quantity: f64,

    /// Units that make sense for this ingredient
    #[serde(rename = "unit", default)]
    pub units: Vec<Unit>,
}

impl Ingredient {
    pub fn new(id: IngredientId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            quantity: 0.0,
            units: Vec::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }

    /// Whether `unit` is applicable to this ingredient
    pub fn accepts(&self, unit: Unit) -> bool {
        self.units.contains(&unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingredient_stored_shape() {
        let ingredient = Ingredient::new(IngredientId::new("i1").unwrap(), "Farine")
            .with_quantity(100.0)
            .with_units(vec![Unit::Gram, Unit::Kilogram]);

        let value = serde_json::to_value(&ingredient).unwrap();
        assert_eq!(
            value,
            json!({"id": "i1", "name": "Farine", "quantity": 100.0, "unit": ["g", "kg"]})
        );
        assert!(ingredient.accepts(Unit::Kilogram));
        assert!(!ingredient.accepts(Unit::Litre));
    }

    #[test]
    fn test_ingredient_defaults_when_fields_missing() {
        let ingredient: Ingredient = serde_json::from_value(json!({"id": "i2", "name": "Sel"})).unwrap();
        assert_eq!(ingredient.quantity, 0.0);
        assert!(ingredient.units.is_empty());
    }
}
