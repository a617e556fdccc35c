//! Units of measure for recipe parts and ingredients

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Mass,
    Volume,
    Count,
    Spoon,
    Pinch,
}

/// Unit-of-measure code stored on recipe parts
///
/// The stored representation is the short code (`"g"`, `"cs"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "cs")]
    Tablespoon,
    #[serde(rename = "cc")]
    Teaspoon,
    #[serde(rename = "pincee")]
    Pinch,
    #[serde(rename = "unite")]
    Piece,
}

impl Unit {
    /// Every unit, in display order
    pub const ALL: [Unit; 8] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Millilitre,
        Unit::Litre,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Pinch,
        Unit::Piece,
    ];

    /// Short code as stored in documents
    pub fn code(self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Tablespoon => "cs",
            Unit::Teaspoon => "cc",
            Unit::Pinch => "pincee",
            Unit::Piece => "unite",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Unit::Gram => "Grammes",
            Unit::Kilogram => "Kilogrammes",
            Unit::Millilitre => "Millilitres",
            Unit::Litre => "Litres",
            Unit::Tablespoon => "Cuillère à soupe",
            Unit::Teaspoon => "Cuillère à café",
            Unit::Pinch => "Pincée",
            Unit::Piece => "Unité",
        }
    }

    pub fn kind(self) -> UnitKind {
        match self {
            Unit::Gram | Unit::Kilogram => UnitKind::Mass,
            Unit::Millilitre | Unit::Litre => UnitKind::Volume,
            Unit::Tablespoon | Unit::Teaspoon => UnitKind::Spoon,
            Unit::Pinch => UnitKind::Pinch,
            Unit::Piece => UnitKind::Count,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.code() == s)
            .ok_or_else(|| {
                let codes: Vec<&str> = Unit::ALL.iter().map(|u| u.code()).collect();
                format!("Unknown unit '{s}'. Must be one of: {}", codes.join(", "))
            })
    }
}
