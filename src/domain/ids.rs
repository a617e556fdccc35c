//! Domain identifier types with validation
//!
//! Each identifier doubles as the last segment of a document path, so it must
//! be non-blank and must not contain `/`. Cosmos DB also refuses `\`, `?`
//! and `#` in item ids, so those are rejected on every backend. Validation
//! also runs when an identifier is decoded from a stored document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters no path segment may contain
const RESERVED_CHARS: [char; 4] = ['/', '\\', '?', '#'];

pub(crate) fn validate_segment(kind: &str, id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err(format!("{kind} cannot be empty"));
    }
    if let Some(c) = id.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return Err(format!("{kind} cannot contain '{c}': {id}"));
    }
    Ok(())
}

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting blank values and reserved characters
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                validate_segment($kind, &id)?;
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

document_id!(
    /// Recipe identifier, unique within the `RECIPES` collection
    ///
    /// # Examples
    ///
    /// ```
    /// use cookbook::domain::ids::RecipeId;
    ///
    /// let id = RecipeId::new("r1").unwrap();
    /// assert_eq!(id.as_str(), "r1");
    /// assert!(RecipeId::new("  ").is_err());
    /// ```
    RecipeId,
    "Recipe ID"
);

document_id!(
    /// Ingredient identifier in the shared `INGREDIENTS` catalog
    IngredientId,
    "Ingredient ID"
);

document_id!(
    /// User identifier, equal to the authentication provider's subject id
    UserId,
    "User ID"
);

impl RecipeId {
    /// Generates a fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_recipe_id_valid() {
        let id = RecipeId::new("r1").unwrap();
        assert_eq!(id.as_str(), "r1");
        assert_eq!(id.to_string(), "r1");
    }

    #[test]
    fn test_ids_reject_blank() {
        assert!(RecipeId::new("").is_err());
        assert!(IngredientId::new("   ").is_err());
        assert!(UserId::from_str("").is_err());
    }

    #[test]
    fn test_ids_reject_path_separator() {
        let err = UserId::new("a/b").unwrap_err();
        assert!(err.contains("cannot contain '/'"));
    }

    #[test_case("a\\b" ; "backslash")]
    #[test_case("tarte?v=2" ; "question mark")]
    #[test_case("tarte#1" ; "hash")]
    fn test_ids_reject_reserved_characters(raw: &str) {
        assert!(RecipeId::new(raw).is_err());
        assert!(serde_json::from_str::<RecipeId>(&serde_json::to_string(raw).unwrap()).is_err());
    }

    #[test]
    fn test_generated_recipe_ids_are_unique() {
        let a = RecipeId::generate();
        let b = RecipeId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = IngredientId::new("i1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"i1\"");
        let back: IngredientId = serde_json::from_str("\"i1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_decoding_validates() {
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
